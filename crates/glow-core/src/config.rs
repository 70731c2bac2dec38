//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML) → `GLOW__` 환경 변수 순서로 덮어씁니다.
//!
//! ```toml
//! [api]
//! base_url = "https://aliceglow-backend.onrender.com"
//! timeout_secs = 30
//!
//! [session]
//! storage_path = "/home/alice/.aliceglow/storage.json"
//! demo_mode = false
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{GlowError, GlowResult};

/// 백엔드 기본 주소.
pub const DEFAULT_API_BASE: &str = "https://aliceglow-backend.onrender.com";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 백엔드 API 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 세션 설정
    #[serde(default)]
    pub session: SessionConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 백엔드 API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// 백엔드 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 세션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// 토큰을 보관하는 키-값 파일 경로
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// 데모 모드 (백엔드 없이 데모 데이터와 데모 사용자로 동작)
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_storage_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aliceglow")
        .join("storage.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            demo_mode: false,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 필터 (예: "info", "glow_auth=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 출력 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> GlowResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("GLOW")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> GlowResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(GlowError::Config("api.base_url이 비어 있습니다".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(GlowError::Config(
                "api.timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.session.demo_mode);
        assert!(config.session.storage_path.ends_with(".aliceglow/storage.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:8080\"\ntimeout_secs = 5\n\n[session]\ndemo_mode = true"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.session.demo_mode);
        // 파일에 없는 섹션은 기본값 유지
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(GlowError::Config(_))));

        config.api.timeout_secs = 10;
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
