//! 백엔드 호출 에러.

use glow_core::GlowError;

/// 백엔드 호출 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 - 세션이 폐기되었으므로 로그인 화면으로 이동해야 함
    #[error("인증이 필요합니다. 다시 로그인하세요")]
    Unauthorized,
    /// 그 외 실패 응답
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 연결/타임아웃 등
    #[error("네트워크 에러: {0}")]
    Network(String),
    /// 응답 본문 해석 실패
    #[error("응답 해석 실패: {0}")]
    Decode(String),
}

/// 백엔드 호출 Result 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 로그인 화면으로 이동해야 하는 에러인지 확인.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP 상태 코드 (있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<ApiError> for GlowError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => GlowError::Auth(err.to_string()),
            ApiError::Server { status: 404, message } => GlowError::NotFound(message),
            ApiError::Server { .. } | ApiError::Network(_) => GlowError::Network(err.to_string()),
            ApiError::Decode(msg) => GlowError::Serialization(msg),
        }
    }
}
