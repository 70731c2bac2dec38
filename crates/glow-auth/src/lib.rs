//! 세션 및 권한 관리.
//!
//! 백엔드가 발급한 토큰을 보관하고, 토큰에서 사용자 신원과 역할을 도출해
//! 콘솔 전체에 권한 판단 근거를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`token`]: 토큰 페이로드 디코딩 (서명 검증은 백엔드 담당)
//! - [`Role`], [`Permission`]: 역할 및 권한 정의
//! - [`CredentialStorage`]: 토큰 영구 저장소 (파일/메모리)
//! - [`SessionStore`]: 로그인/로그아웃 및 신원 도출
//! - [`AuthorizationGate`]: `is_admin` / `is_authenticated` 판단
//! - [`RouteGuard`]: 화면 접근 허용 또는 리다이렉트 결정
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let storage = Arc::new(FileStorage::new(&config.session.storage_path));
//! let session = Arc::new(SessionStore::initialize(storage, SessionOptions::default()));
//!
//! match RouteGuard::check(&session.gate(), Route::Users) {
//!     GuardDecision::Allow => show_users(),
//!     GuardDecision::Redirect(target) => navigate(target.path()),
//! }
//! ```

mod gate;
mod guard;
mod identity;
mod roles;
mod session;
mod storage;
pub mod token;

pub use gate::{AuthError, AuthorizationGate};
pub use guard::{navigation, GuardDecision, NavItem, Route, RouteGuard};
pub use identity::Identity;
pub use roles::{Permission, Role};
pub use session::{Clock, Invalidation, SessionOptions, SessionStore, SystemClock};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError, TOKEN_STORAGE_KEY};
pub use token::{Claims, DecodeFailure, TokenError};
