//! tracing 기반 로깅 초기화.
//!
//! CLI는 표준 출력을 결과 표시에 사용하므로 로그는 표준 에러로 보냅니다.
//! 출력 형식은 세 가지입니다:
//! - **pretty**: 개발용 여러 줄 형식
//! - **json**: 로그 수집용 JSON 형식
//! - **compact**: 한 줄 형식 (기본값)

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 사람이 읽기 쉬운 여러 줄 형식
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 옵션.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// 설정 파일의 `[logging]` 섹션으로부터 생성합니다.
    ///
    /// `LOG_FORMAT` 환경 변수가 있으면 형식을 덮어씁니다.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| settings.format.clone())
            .parse()
            .unwrap_or_default();

        Self {
            level: settings.level.clone(),
            format,
        }
    }

    /// 레벨을 덮어씁니다 (`glow -v` 는 `debug`).
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정의 레벨보다 우선합니다.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_from_settings_falls_back_to_compact() {
        let settings = LoggingConfig {
            level: "debug".to_string(),
            format: "unknown".to_string(),
        };
        let config = LogConfig::from_settings(&settings).with_level("trace");
        assert_eq!(config.level, "trace");
        // LOG_FORMAT이 없는 환경에서는 알 수 없는 형식이 기본값으로 대체됨
        if std::env::var("LOG_FORMAT").is_err() {
            assert_eq!(config.format, LogFormat::Compact);
        }
    }
}
