use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tool server identity
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name reported in the `initialize` handshake.
    #[serde(default = "d_name")]
    pub name: String,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "d_log_filter")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: d_name(),
            log_filter: d_log_filter(),
        }
    }
}

fn d_name() -> String {
    "figchunk".into()
}
fn d_log_filter() -> String {
    "info,fc_server=debug".into()
}
