//! Daemon configuration from environment variables

use dynaq_api_rpc::server::DEFAULT_RPC_PORT;
use dynaq_core::application::assignment::parse_expression_list;
use dynaq_core::application::constants::DEFAULT_MAX_INDIRECTION_DEPTH;

const DEFAULT_DB_PATH: &str = "~/.dynaq/assignments.db";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub log_format: LogFormat,
    pub max_indirection_depth: usize,
    /// Queues registered at startup (`DYNAQ_QUEUES`, comma-separated)
    pub seed_queues: Vec<String>,
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a closure over a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("DYNAQ_DB_PATH")
            .unwrap_or_else(|| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

        let rpc_host = lookup("DYNAQ_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = lookup("DYNAQ_RPC_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RPC_PORT);

        let log_format = match lookup("DYNAQ_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let max_indirection_depth = lookup("DYNAQ_MAX_INDIRECTION_DEPTH")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_MAX_INDIRECTION_DEPTH);

        let seed_queues = lookup("DYNAQ_QUEUES")
            .map(|s| parse_expression_list(&s))
            .unwrap_or_default();

        Self {
            db_path,
            rpc_host,
            rpc_port,
            log_format,
            max_indirection_depth,
            seed_queues,
        }
    }

    /// sqlx connection string for `db_path`
    pub fn database_url(&self) -> String {
        if self.db_path.starts_with("sqlite:") {
            self.db_path.clone()
        } else {
            format!("sqlite://{}", self.db_path)
        }
    }
}
