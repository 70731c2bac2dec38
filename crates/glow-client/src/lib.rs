//! AliceGlow 백엔드 클라이언트.
//!
//! 콘솔의 모든 데이터 조회/변경은 [`ConsoleApi`]를 거칩니다.
//!
//! - [`HttpApi`]: 실제 백엔드 (Bearer 토큰, 401 시 세션 폐기)
//! - [`DemoApi`]: 백엔드 없이 동작하는 메모리 데모 데이터
//!
//! [`connect`]는 세션의 데모 모드 여부에 따라 둘 중 하나를 선택합니다.

mod api;
mod dashboard;
mod demo;
mod error;
mod http;

use std::sync::Arc;

use glow_auth::SessionStore;
use glow_core::ApiConfig;

pub use api::{ConsoleApi, LoginRequest, LoginResponse};
pub use dashboard::load_dashboard;
pub use demo::DemoApi;
pub use error::{ApiError, ApiResult};
pub use http::HttpApi;

/// 설정과 세션에 맞는 백엔드를 생성합니다.
pub fn connect(config: &ApiConfig, session: Arc<SessionStore>) -> ApiResult<Arc<dyn ConsoleApi>> {
    if session.is_demo() {
        tracing::info!("Demo mode enabled; using in-memory backend");
        return Ok(Arc::new(DemoApi::new()));
    }
    Ok(Arc::new(HttpApi::new(config, session)?))
}
