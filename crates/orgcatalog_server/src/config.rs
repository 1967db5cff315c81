//! Server settings from flags or `ORGCATALOG_*` environment variables.
//!
//! # Invariants
//! - The API key is mandatory and never blank.
//! - Flags win over environment variables; both fall back to documented
//!   defaults when unset.

use clap::{ArgAction, Parser};
use orgcatalog_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "ORGCATALOG_API_KEY";
pub const BIND_VAR: &str = "ORGCATALOG_BIND";
pub const DB_PATH_VAR: &str = "ORGCATALOG_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ORGCATALOG_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ORGCATALOG_LOG_DIR";
pub const SEED_VAR: &str = "ORGCATALOG_SEED";

/// Organization catalog HTTP server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "orgcatalog_server", version)]
pub struct ServerConfig {
    /// Secret expected in the `X-API-Key` header
    #[arg(long, env = API_KEY_VAR, hide_env_values = true, value_parser = non_blank)]
    pub api_key: String,

    /// Listen address
    #[arg(long, env = BIND_VAR, default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// SQLite database file, created and migrated when missing
    #[arg(long, env = DB_PATH_VAR, default_value = "catalog.sqlite3")]
    pub db_path: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, env = LOG_LEVEL_VAR, default_value_t = default_log_level().to_string())]
    pub log_level: String,

    /// Absolute directory for rolling log files; file logging stays off when unset
    #[arg(long, env = LOG_DIR_VAR)]
    pub log_dir: Option<PathBuf>,

    /// Seed an empty database at startup (1|true|on|yes)
    #[arg(
        long,
        env = SEED_VAR,
        action = ArgAction::Set,
        default_value = "false",
        value_parser = parse_switch
    )]
    pub seed: bool,
}

fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("must not be blank".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        other => Err(format!("expected 1|true|on|yes or 0|false|off|no, got `{other}`")),
    }
}
