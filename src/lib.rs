pub mod config;
pub mod dataset;
pub mod export;
pub mod http_client;
pub mod impact;
pub mod logging;
pub mod player;
pub mod query;
pub mod repl;
pub mod riot_api;
pub mod roster;
