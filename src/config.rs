use serde::{Deserialize, Serialize};
use std::env;

use crate::engine::{IngestMode, MAX_HISTORY};
use crate::error::{AppError, AppResult};

/// 闲置超时上限（30 天），同时保证换算为 `chrono::Duration` 不溢出
pub const MAX_SESSION_IDLE_TIMEOUT_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// 中奖历史容量
    pub max_history: usize,
    /// 第一行视为表头并跳过
    pub skip_header: bool,
    pub ingest_mode: IngestMode,
    /// 上传新文件时清空中奖历史
    pub clear_history_on_upload: bool,
    /// 历史已满时拒绝继续抽奖（否则淘汰最旧记录）
    pub stop_when_full: bool,
    pub search_debounce_ms: i64,
    /// 固定随机种子（仅用于演示 / 复现）
    pub rng_seed: Option<u64>,
    pub max_upload_bytes: usize,
    pub session_idle_timeout_secs: i64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            skip_header: true,
            ingest_mode: IngestMode::TwoColumn,
            clear_history_on_upload: true,
            stop_when_full: false,
            search_debounce_ms: 300,
            rng_seed: None,
            max_upload_bytes: 10 * 1024 * 1024,
            session_idle_timeout_secs: 12 * 3600,
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件可选：不存在时使用默认值，再由环境变量覆盖
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{config_path} not found, using defaults and environment");
                Config::default()
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_env_overrides(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides<F>(&mut self, get_env: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse_into<T: std::str::FromStr>(value: Option<String>, slot: &mut T) {
            if let Some(v) = value
                && let Ok(parsed) = v.parse()
            {
                *slot = parsed;
            }
        }

        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        parse_into(get_env("SERVER_PORT"), &mut self.server.port);
        parse_into(get_env("DRAW_MAX_HISTORY"), &mut self.draw.max_history);
        parse_into(get_env("DRAW_SKIP_HEADER"), &mut self.draw.skip_header);
        if let Some(v) = get_env("DRAW_INGEST_MODE") {
            self.draw.ingest_mode = match v.as_str() {
                "two_column" => IngestMode::TwoColumn,
                "single_column" => IngestMode::SingleColumn,
                other => {
                    return Err(AppError::ConfigError(format!(
                        "Unknown DRAW_INGEST_MODE: {other}"
                    )));
                }
            };
        }
        parse_into(
            get_env("DRAW_CLEAR_HISTORY_ON_UPLOAD"),
            &mut self.draw.clear_history_on_upload,
        );
        parse_into(get_env("DRAW_STOP_WHEN_FULL"), &mut self.draw.stop_when_full);
        parse_into(
            get_env("DRAW_SEARCH_DEBOUNCE_MS"),
            &mut self.draw.search_debounce_ms,
        );
        if let Some(v) = get_env("DRAW_RNG_SEED")
            && let Ok(seed) = v.parse()
        {
            self.draw.rng_seed = Some(seed);
        }
        parse_into(
            get_env("DRAW_MAX_UPLOAD_BYTES"),
            &mut self.draw.max_upload_bytes,
        );
        parse_into(
            get_env("DRAW_SESSION_IDLE_TIMEOUT_SECS"),
            &mut self.draw.session_idle_timeout_secs,
        );
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        let invalid = |msg: String| -> AppResult<()> { Err(AppError::ConfigError(msg)) };
        if self.draw.max_history == 0 {
            return invalid("draw.max_history must be positive".into());
        }
        if self.draw.search_debounce_ms < 0 {
            return invalid("draw.search_debounce_ms must not be negative".into());
        }
        if !(1..=MAX_SESSION_IDLE_TIMEOUT_SECS).contains(&self.draw.session_idle_timeout_secs) {
            return invalid(format!(
                "draw.session_idle_timeout_secs must be between 1 and {MAX_SESSION_IDLE_TIMEOUT_SECS}"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.draw.max_history, 30);
        assert!(config.draw.skip_header);
        assert_eq!(config.draw.ingest_mode, IngestMode::TwoColumn);
        assert_eq!(config.draw.search_debounce_ms, 300);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [draw]
            stop_when_full = true
            ingest_mode = "single_column"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.draw.stop_when_full);
        assert_eq!(config.draw.ingest_mode, IngestMode::SingleColumn);
        assert_eq!(config.draw.max_history, 30);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "9999"),
            ("DRAW_MAX_HISTORY", "5"),
            ("DRAW_CLEAR_HISTORY_ON_UPLOAD", "false"),
            ("DRAW_RNG_SEED", "42"),
            ("DRAW_SEARCH_DEBOUNCE_MS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.draw.max_history, 5);
        assert!(!config.draw.clear_history_on_upload);
        assert_eq!(config.draw.rng_seed, Some(42));
        // 无法解析的值保持默认
        assert_eq!(config.draw.search_debounce_ms, 300);
    }

    #[test]
    fn test_unknown_ingest_mode_rejected() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|name| {
            (name == "DRAW_INGEST_MODE").then(|| "three_column".to_string())
        });
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            Config::parse("[draw]\nmax_history = \"many\""),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_zero_history_rejected() {
        let mut config = Config::default();
        config.draw.max_history = 0;
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_idle_timeout_range() {
        for secs in [0, -1, MAX_SESSION_IDLE_TIMEOUT_SECS + 1, i64::MAX] {
            let mut config = Config::default();
            config.draw.session_idle_timeout_secs = secs;
            assert!(
                matches!(config.validate(), Err(AppError::ConfigError(_))),
                "{secs} accepted"
            );
        }

        let mut config = Config::default();
        config
            .apply_env_overrides(|name| {
                (name == "DRAW_SESSION_IDLE_TIMEOUT_SECS").then(|| i64::MAX.to_string())
            })
            .unwrap();
        assert!(config.validate().is_err());

        config.draw.session_idle_timeout_secs = MAX_SESSION_IDLE_TIMEOUT_SECS;
        assert!(config.validate().is_ok());
        assert!(Config::default().validate().is_ok());
    }
}
