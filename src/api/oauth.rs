use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::OauthConfig;
use crate::Error;

const TOKEN_URL: &str = "https://www.strava.com/api/v3/oauth/token";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

/// Exchanges the stored refresh token for a fresh access/refresh pair and
/// rewrites the tokens file. A missing tokens file is seeded from the
/// configured environment variable first.
#[tracing::instrument(level = "trace", skip(cfg))]
pub async fn refresh_tokens(cfg: &OauthConfig) -> Result<(), Error> {
    let client_id = read_env(&cfg.client_id_var)?;
    let client_secret = read_env(&cfg.client_secret_var)?;

    if !cfg.tokens_path.exists() {
        let seed_token = read_env(&cfg.refresh_token_var)?;
        info!(path = %cfg.tokens_path.display(), "Seeding tokens file from environment");
        write_tokens(
            &cfg.tokens_path,
            &StoredTokens {
                access_token: String::new(),
                refresh_token: seed_token,
            },
        )?;
    }

    let tokens: StoredTokens = serde_json::from_str(&fs::read_to_string(&cfg.tokens_path)?)?;

    info!("Refreshing Strava access tokens");
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .query(&[
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", tokens.refresh_token.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let refreshed = response.json::<TokenResponse>().await?;
    write_tokens(
        &cfg.tokens_path,
        &StoredTokens {
            access_token: refreshed.access_token,
            refresh_token: refreshed.refresh_token,
        },
    )?;

    info!(path = %cfg.tokens_path.display(), "Stored refreshed Strava tokens");
    Ok(())
}

fn read_env(var: &str) -> Result<String, Error> {
    env::var(var).map_err(|e| format!("Failed to read env var {var}: {e}").into())
}

fn write_tokens(path: &Path, tokens: &StoredTokens) -> Result<(), Error> {
    fs::write(path, serde_json::to_string(tokens)?)?;
    Ok(())
}
