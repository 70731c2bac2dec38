//! 콘솔 실행 컨텍스트.
//!
//! 세션 저장소와 백엔드를 한 번 구성해 모든 명령이 공유합니다.
//! 명령은 실행 전에 자신의 화면 경로를 [`RouteGuard`]로 검사받습니다.

use std::sync::Arc;

use glow_auth::{
    AuthError, AuthorizationGate, CredentialStorage, FileStorage, GuardDecision, MemoryStorage,
    Permission, Role, Route, RouteGuard, SessionOptions, SessionStore,
};
use glow_client::{connect, ApiError, ConsoleApi};
use glow_core::{AppConfig, GlowError};
use tracing::{debug, info};

/// 명령 실행 전 접근 검사 실패.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("🔒 {from} 에 접근할 수 없습니다. {to} 로 이동합니다")]
    Redirect { from: Route, to: Route },
    #[error("⛔ {0}")]
    Forbidden(#[from] AuthError),
}

/// 콘솔 실행 컨텍스트.
pub struct Console {
    session: Arc<SessionStore>,
    api: Arc<dyn ConsoleApi>,
}

impl Console {
    /// 설정으로 세션과 백엔드를 구성합니다.
    ///
    /// 데모 모드에서는 토큰을 파일에 남기지 않습니다.
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn CredentialStorage> = if config.session.demo_mode {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(FileStorage::new(&config.session.storage_path))
        };

        let options = SessionOptions::default().with_demo_mode(config.session.demo_mode);
        let session = Arc::new(SessionStore::initialize(storage, options));
        let api = connect(&config.api, session.clone())?;

        info!(backend = api.name(), base_url = %config.api.base_url, "Console ready");
        Ok(Self::with_parts(session, api))
    }

    /// 이미 구성된 세션과 백엔드로 생성합니다.
    pub fn with_parts(session: Arc<SessionStore>, api: Arc<dyn ConsoleApi>) -> Self {
        Self { session, api }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &dyn ConsoleApi {
        self.api.as_ref()
    }

    /// 화면 진입 검사.
    pub fn enter(&self, route: Route) -> Result<AuthorizationGate, CliError> {
        let gate = self.session.gate();
        match RouteGuard::check(&gate, route) {
            GuardDecision::Allow => {
                debug!(route = %route, "Route allowed");
                Ok(gate)
            }
            GuardDecision::Redirect(to) => {
                debug!(route = %route, redirect = %to, "Route redirected");
                Err(CliError::Redirect { from: route, to })
            }
        }
    }

    /// 화면 진입 후 작업 권한까지 검사합니다.
    pub fn authorize(&self, route: Route, permission: Permission) -> Result<Role, CliError> {
        Ok(self.enter(route)?.require(permission)?)
    }
}

/// 실패를 사용자 메시지와 종료 코드로 변환합니다.
pub fn report(err: &anyhow::Error) -> (String, i32) {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return (cli.to_string(), 2);
    }

    if let Some(api) = err.downcast_ref::<ApiError>() {
        return match api {
            ApiError::Unauthorized => (
                format!(
                    "🔒 세션이 만료되었습니다. {} 로 이동합니다 (glow login)",
                    Route::Login
                ),
                3,
            ),
            other => (format!("❌ {}", other), 1),
        };
    }

    if let Some(GlowError::Validation(msg)) = err.downcast_ref::<GlowError>() {
        return (format!("⚠️  입력 오류: {}", msg), 1);
    }

    (format!("❌ {:#}", err), 1)
}
