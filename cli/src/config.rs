use serde::Deserialize;

/// Process configuration, read from the environment with the `LEDGER_`
/// prefix (e.g. `LEDGER_LISTEN_PORT=8080`). Storage and auth fields are
/// carried here for the RPC/persistence boundary this binary stands in for;
/// the demo wiring below only consumes `log_level`.
#[derive(Debug, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_storage_dsn")]
    pub storage_dsn: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    pub auth_token: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_dsn() -> String {
    "memory://".to_string()
}

fn default_listen_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LedgerConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("LEDGER_").from_env()
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            storage_dsn: default_storage_dsn(),
            listen_port: default_listen_port(),
            auth_token: None,
            log_level: default_log_level(),
        }
    }
}
