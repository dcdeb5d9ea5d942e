use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Figma REST connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Environment variable holding the personal access token.
    #[serde(default = "d_token_env")]
    pub token_env: String,
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
    #[serde(default = "d_3")]
    pub max_retries: u32,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            token_env: d_token_env(),
            timeout_ms: 30_000,
            max_retries: 3,
        }
    }
}

impl FigmaConfig {
    /// Resolve the access token from the configured environment variable.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "https://api.figma.com".into()
}
fn d_token_env() -> String {
    "FIGMA_ACCESS_TOKEN".into()
}
fn d_30000() -> u64 {
    30_000
}
fn d_3() -> u32 {
    3
}
