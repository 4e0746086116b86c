use std::env;
use std::path::PathBuf;

use crate::dataset::DEFAULT_DATA_FILE;
use crate::roster::DEFAULT_TOP_N;

const MAX_TOP_N: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalystConfig {
    pub data_path: PathBuf,
    pub top_n: usize,
    pub export_dir: Option<PathBuf>,
    pub export_xlsx: Option<PathBuf>,
}

impl AnalystConfig {
    pub fn from_env() -> Self {
        let data_path = env_string("VCT_PLAYER_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let top_n = env_string("VCT_TOP_N")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOP_N)
            .clamp(1, MAX_TOP_N);
        Self {
            data_path,
            top_n,
            export_dir: env_string("VCT_EXPORT_DIR").map(PathBuf::from),
            export_xlsx: env_string("VCT_EXPORT_XLSX").map(PathBuf::from),
        }
    }

    /// Applies `--data`, `--top` and `--export-dir` style overrides.
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(path) = arg_value(args, "data") {
            self.data_path = PathBuf::from(path);
        }
        if let Some(n) = arg_value(args, "top").and_then(|v| v.parse::<usize>().ok()) {
            self.top_n = n.clamp(1, MAX_TOP_N);
        }
        if let Some(dir) = arg_value(args, "export-dir") {
            self.export_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = arg_value(args, "export-xlsx") {
            self.export_xlsx = Some(PathBuf::from(path));
        }
        self
    }
}

/// Trimmed, non-empty environment value.
pub fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Looks up `--name=value` or `--name value`.
pub fn arg_value(args: &[String], name: &str) -> Option<String> {
    let flag = format!("--{name}");
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
