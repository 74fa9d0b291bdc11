use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::error::NotifyError;
use crate::fmt;

const WEBHOOK_BASE_URL: &str = "https://hooks.slack.com/services";

#[derive(Debug, Serialize)]
pub struct SlackMessage<'a> {
    pub username: &'a str,
    pub icon_emoji: &'a str,
    pub text: &'a str,
}

// The webhook URL embeds the token, so it is never logged.
#[tracing::instrument(level = "trace", skip(cfg, text))]
pub(crate) async fn post(cfg: &AppConfig, text: &str) -> Result<(), NotifyError> {
    let url = fmt!("{WEBHOOK_BASE_URL}/{}", cfg.webhook_token);
    info!(chars = text.len(), "Posting leaderboard to Slack");

    let response = reqwest::Client::new()
        .post(url)
        .json(&SlackMessage {
            username: &cfg.bot_username,
            icon_emoji: &cfg.bot_icon_emoji,
            text,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(NotifyError::Rejected(status));
    }

    info!("Posted leaderboard to Slack");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_webhook_field_names() {
        let message = SlackMessage {
            username: "Strava",
            icon_emoji: ":strava:",
            text: "hello",
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "Strava",
                "icon_emoji": ":strava:",
                "text": "hello",
            })
        );
    }
}
