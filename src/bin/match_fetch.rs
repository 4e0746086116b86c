use anyhow::{Context, Result};

use vct_analyst::config::{arg_value, env_string};
use vct_analyst::logging::init_logging;
use vct_analyst::riot_api::{RiotApi, RiotApiConfig, fetch_player_matches};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let game_name = arg_value(&args, "name")
        .or_else(|| env_string("RIOT_GAME_NAME"))
        .context("player name missing (use --name or RIOT_GAME_NAME)")?;
    let tag_line = arg_value(&args, "tag")
        .or_else(|| env_string("RIOT_TAG_LINE"))
        .context("tag line missing (use --tag or RIOT_TAG_LINE)")?;
    let print_raw = args.iter().any(|a| a == "--raw");

    let api = RiotApi::from_config(RiotApiConfig::from_env()?)?;

    println!("Fetching matches for {game_name}#{tag_line}");
    let summary = fetch_player_matches(&api, &game_name, &tag_line, |puuid, detail| {
        println!("{}", detail.summary_line());
        if let Some(line) = detail.player(puuid) {
            println!(
                "  {} ({}): {}/{}/{} K/D {:.2} ACS {}",
                line.game_name,
                line.character_id,
                line.kills,
                line.deaths,
                line.assists,
                line.kd_ratio(),
                line.acs()
                    .map(|v| format!("{v:.0}"))
                    .unwrap_or_else(|| "n/a".to_string())
            );
        }
        if print_raw {
            println!("{}", detail.raw);
        }
    });

    let Some(puuid) = summary.puuid.as_deref() else {
        println!("Could not resolve {game_name}#{tag_line}; nothing fetched.");
        return Ok(());
    };
    println!("PUUID: {puuid}");
    println!(
        "Matches: {} listed, {} fetched, {} failed",
        summary.match_ids,
        summary.fetched,
        summary.failed.len()
    );
    for match_id in summary.failed.iter().take(8) {
        println!(" - {match_id}");
    }
    Ok(())
}
