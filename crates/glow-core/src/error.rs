//! 콘솔 공통 에러 타입.
//!
//! 크레이트 경계를 넘는 에러를 하나의 열거형으로 모읍니다.

use thiserror::Error;

/// 콘솔 공통 에러.
#[derive(Debug, Error)]
pub enum GlowError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 입력 검증 실패
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 자격증명 저장소 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 인증 에러
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 권한 부족
    #[error("권한 부족: {0}")]
    Forbidden(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),
}

/// 콘솔 작업을 위한 Result 타입.
pub type GlowResult<T> = Result<T, GlowError>;

impl GlowError {
    /// 다시 로그인해야 해결되는 에러인지 확인합니다.
    pub fn requires_login(&self) -> bool {
        matches!(self, GlowError::Auth(_))
    }
}

impl From<serde_json::Error> for GlowError {
    fn from(err: serde_json::Error) -> Self {
        GlowError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for GlowError {
    fn from(err: config::ConfigError) -> Self {
        GlowError::Config(err.to_string())
    }
}
