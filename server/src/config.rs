use serde::Deserialize;
use shared::CredentialPool;

#[derive(Deserialize)]
pub struct Env {
    github_token1: Option<String>,
    github_token2: Option<String>,
    /// Comma separated list of additional tokens
    #[serde(default)]
    github_tokens: Vec<String>,
    #[serde(default)]
    pub all_time_default: bool,
}

impl Env {
    /// Tokens are tried in the order GITHUB_TOKEN1, GITHUB_TOKEN2, GITHUB_TOKENS.
    pub fn credential_pool(&self) -> anyhow::Result<CredentialPool> {
        let secrets = self
            .github_token1
            .iter()
            .chain(self.github_token2.iter())
            .chain(self.github_tokens.iter())
            .cloned();

        CredentialPool::new(secrets).ok_or_else(|| {
            anyhow::anyhow!(
                "No GitHub token configured, set GITHUB_TOKEN1, GITHUB_TOKEN2 or GITHUB_TOKENS"
            )
        })
    }
}
