use std::path::PathBuf;
use std::{env, fs};

use serde::Deserialize;

use crate::leaderboard::report::ReportStyle;
use crate::util::dates;

#[derive(Debug, Deserialize, Clone)]
struct FileConfig {
    pub club_id: String,
    pub title: String,
    pub webhook_token_var: String,
    pub bot_username: String,
    pub bot_icon_emoji: String,
    pub week_offset: u32,
    pub store_path: String,
    pub report_style: ReportStyle,
    pub log: FileLogConfig,
    pub oauth: FileOauthConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct FileLogConfig {
    pub level: String,
    pub path: String,
    pub json_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileOauthConfig {
    pub client_id_var: String,
    pub client_secret_var: String,
    pub refresh_token_var: String,
    pub tokens_path: String,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct OauthConfig {
    pub client_id_var: String,
    pub client_secret_var: String,
    pub refresh_token_var: String,
    pub tokens_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub club_id: String,
    pub title: String,
    pub webhook_token: String,
    pub bot_username: String,
    pub bot_icon_emoji: String,
    pub week_offset: u32,
    pub store_path: PathBuf,
    pub report_style: ReportStyle,
    pub log: LogConfig,
    pub oauth: OauthConfig,
}

fn expand_tilde(path: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    if path.starts_with("~/") {
        let home = env::var("HOME")?;
        Ok(PathBuf::from(path.replacen("~", &home, 1)))
    } else {
        Ok(PathBuf::from(path))
    }
}

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let exe_path = env::current_exe()?;
    let config_path = match exe_path.parent() {
        Some(dir) => dir.join("stravaboard.toml"),
        _ => return Err("failed to determine executable directory".into()),
    };

    if !config_path.exists() || !config_path.is_file() {
        return Err(format!(
            "Config file does not exist or is not a file: {}",
            config_path.display()
        )
        .into());
    }
    let s = fs::read_to_string(&config_path)?;
    let cfg: FileConfig = toml::from_str(&s)?;

    let store_path = expand_tilde(&cfg.store_path)?;
    if let Some(parent) = store_path.parent() {
        if !parent.exists() {
            return Err(format!(
                "Totals store directory does not exist: {}",
                parent.display()
            )
            .into());
        }
    }
    if store_path.exists() && !store_path.is_file() {
        return Err(format!("Totals store path is not a file: {}", &cfg.store_path).into());
    }

    let webhook_token = env::var(&cfg.webhook_token_var).map_err(|e| {
        format!(
            "Failed to read webhook token from env var {}: {}",
            &cfg.webhook_token_var, e
        )
    })?;

    Ok(AppConfig {
        club_id: cfg.club_id,
        title: cfg.title,
        webhook_token,
        bot_username: cfg.bot_username,
        bot_icon_emoji: cfg.bot_icon_emoji,
        week_offset: cfg.week_offset,
        store_path,
        report_style: cfg.report_style,
        log: build_log_config(cfg.log)?,
        oauth: build_oauth_config(cfg.oauth)?,
    })
}

fn build_log_config(
    file_log: FileLogConfig,
) -> Result<LogConfig, Box<dyn std::error::Error + Send + Sync>> {
    let path = log_file_replacements(&file_log.path)?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            return Err(format!("Log file directory does not exist: {}", parent.display()).into());
        }
    }
    if path.exists() && !path.is_file() {
        return Err(format!("Log path exists but is not a file: {}", &file_log.path).into());
    }

    let json_path = log_file_replacements(&file_log.json_path)?;
    if let Some(parent) = json_path.parent() {
        if !parent.exists() {
            return Err(format!("Log file directory does not exist: {}", parent.display()).into());
        }
    }
    if json_path.exists() && !json_path.is_file() {
        return Err(format!("Log path exists but is not a file: {}", &file_log.json_path).into());
    }

    Ok(LogConfig {
        level: file_log.level,
        path,
        json_path,
    })
}

fn build_oauth_config(
    file_oauth: FileOauthConfig,
) -> Result<OauthConfig, Box<dyn std::error::Error + Send + Sync>> {
    let tokens_path = expand_tilde(&file_oauth.tokens_path)?;
    if let Some(parent) = tokens_path.parent() {
        if !parent.exists() {
            return Err(format!(
                "Tokens file directory does not exist: {}",
                parent.display()
            )
            .into());
        }
    }

    Ok(OauthConfig {
        client_id_var: file_oauth.client_id_var,
        client_secret_var: file_oauth.client_secret_var,
        refresh_token_var: file_oauth.refresh_token_var,
        tokens_path,
    })
}

fn log_file_replacements(
    cfg_path: &str,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let date_str = dates::local_date_yyyy_mm_dd();
    let replaced = cfg_path.replace("{DATE}", &date_str);
    expand_tilde(&replaced)
}
