//! 세션 저장소.
//!
//! 현재 토큰과 그로부터 도출한 신원을 보관하는 단일 소유 상태입니다.
//! 전역 변수 대신 `Arc<SessionStore>` 핸들로 필요한 곳에 전달합니다.
//!
//! # 상태 전이
//!
//! ```text
//!            login(유효)
//! Anonymous ───────────────> Authenticated
//!     ↑                           │
//!     │  logout / 401 / 만료 감지 / 디코딩 실패
//!     └───────────────────────────┘
//! ```
//!
//! 만료되었거나 디코딩할 수 없는 토큰은 발견 즉시 저장소에서 삭제되므로
//! 호출자는 `Authenticated` 상태에서 유효하지 않은 토큰을 볼 수 없습니다.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::storage::{CredentialStorage, TOKEN_STORAGE_KEY};
use crate::token::{self, Claims};
use crate::{AuthorizationGate, Identity};

/// 현재 시각 제공자.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 세션이 익명 상태로 전환된 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// 사용자가 로그아웃함
    LoggedOut,
    /// 토큰을 디코딩할 수 없음
    Malformed,
    /// 토큰 만료
    Expired,
    /// 백엔드가 401로 거부함
    Rejected,
}

impl Invalidation {
    /// 사용자에게 보여줄 메시지.
    pub fn message(&self) -> &'static str {
        match self {
            Invalidation::LoggedOut => "로그아웃되었습니다",
            Invalidation::Malformed => "세션 정보가 올바르지 않아 로그아웃되었습니다",
            Invalidation::Expired => "세션이 만료되었습니다. 다시 로그인하세요",
            Invalidation::Rejected => "서버가 세션을 거부했습니다. 다시 로그인하세요",
        }
    }
}

/// 세션 저장소 옵션.
#[derive(Clone)]
pub struct SessionOptions {
    clock: Arc<dyn Clock>,
    demo_mode: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            demo_mode: false,
        }
    }
}

impl SessionOptions {
    /// 시계를 교체합니다 (테스트용).
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 데모 모드 설정.
    ///
    /// 활성화하면 유효한 토큰이 없을 때 [`Identity::demo`]를 신원으로 제공합니다.
    /// 유효한 토큰이 있으면 항상 토큰의 신원이 우선합니다.
    #[must_use]
    pub fn with_demo_mode(mut self, enabled: bool) -> Self {
        self.demo_mode = enabled;
        self
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    claims: Option<Claims>,
    identity: Option<Identity>,
    last_invalidation: Option<Invalidation>,
}

/// 세션 저장소.
pub struct SessionStore {
    storage: Arc<dyn CredentialStorage>,
    clock: Arc<dyn Clock>,
    demo_mode: bool,
    state: RwLock<SessionState>,
    identity_tx: watch::Sender<Option<Identity>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("SessionStore")
            .field("demo_mode", &self.demo_mode)
            .field("has_token", &state.token.is_some())
            .field("identity", &state.identity)
            .finish()
    }
}

impl SessionStore {
    /// 저장소에서 토큰을 읽어 세션을 초기화합니다.
    ///
    /// 저장소 읽기에 실패하면 익명 상태로 시작합니다.
    pub fn initialize(storage: Arc<dyn CredentialStorage>, options: SessionOptions) -> Self {
        let persisted = storage.get(TOKEN_STORAGE_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read persisted credential");
            None
        });

        let initial = options.demo_mode.then(Identity::demo);
        let (identity_tx, _) = watch::channel(initial);

        let store = Self {
            storage,
            clock: options.clock,
            demo_mode: options.demo_mode,
            state: RwLock::new(SessionState::default()),
            identity_tx,
        };

        if let Some(token) = persisted {
            debug!("Restoring persisted session");
            let mut state = store.write_state();
            store.derive(&mut state, token);
        }

        store
    }

    /// 새 토큰으로 로그인합니다.
    ///
    /// 저장소에 먼저 기록한 뒤 메모리 상태를 갱신합니다. 저장소 기록 실패는
    /// 경고만 남기고 진행합니다. 토큰이 유효하지 않으면 즉시 익명 상태로
    /// 돌아가며, 결과로 현재 신원을 반환합니다.
    pub fn login(&self, token: impl Into<String>) -> Option<Identity> {
        let token = token.into();
        if let Err(e) = self.storage.set(TOKEN_STORAGE_KEY, &token) {
            warn!(error = %e, "Failed to persist credential; continuing in memory");
        }

        let mut state = self.write_state();
        self.derive(&mut state, token);
        self.visible_identity(&state)
    }

    /// 로그아웃합니다. 여러 번 호출해도 결과는 같습니다.
    pub fn logout(&self) {
        let mut state = self.write_state();
        if state.token.is_some() {
            info!("Session logged out");
        }
        self.invalidate(&mut state, Invalidation::LoggedOut);
    }

    /// 백엔드가 401을 반환했을 때 세션을 폐기합니다.
    pub fn expire_from_server(&self) {
        let mut state = self.write_state();
        warn!("Backend rejected the session credential");
        self.invalidate(&mut state, Invalidation::Rejected);
    }

    /// 현재 신원.
    ///
    /// 호출할 때마다 만료 여부를 다시 확인합니다.
    pub fn current_identity(&self) -> Option<Identity> {
        self.check_expiry();
        self.visible_identity(&self.read_state())
    }

    /// 현재 토큰 (만료 확인 후).
    pub fn current_token(&self) -> Option<String> {
        self.check_expiry();
        self.read_state().token.clone()
    }

    /// 현재 권한 판단 스냅샷.
    pub fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::from_identity(self.current_identity().as_ref())
    }

    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        self.gate().is_admin()
    }

    /// 인증 여부.
    pub fn is_authenticated(&self) -> bool {
        self.gate().is_authenticated()
    }

    /// 데모 모드 여부.
    pub fn is_demo(&self) -> bool {
        self.demo_mode
    }

    /// 마지막으로 익명 상태로 전환된 사유.
    ///
    /// 유효한 로그인 이후에는 `None`입니다.
    pub fn last_invalidation(&self) -> Option<Invalidation> {
        self.check_expiry();
        self.read_state().last_invalidation
    }

    /// 신원 변경 구독.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_tx.subscribe()
    }

    fn check_expiry(&self) {
        let now = self.clock.now();
        let expired = |state: &SessionState| {
            state
                .claims
                .as_ref()
                .is_some_and(|claims| claims.is_expired_at(now))
        };

        if !expired(&self.read_state()) {
            return;
        }

        let mut state = self.write_state();
        // 잠금을 다시 잡는 사이 다른 호출이 처리했을 수 있음
        if expired(&state) {
            info!("Session credential expired");
            self.invalidate(&mut state, Invalidation::Expired);
        }
    }

    fn derive(&self, state: &mut SessionState, token: String) {
        let claims = match token::decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(reason = e.reason(), "Credential could not be decoded");
                warn!("Discarding malformed credential");
                self.invalidate(state, Invalidation::Malformed);
                return;
            }
        };

        if claims.is_expired_at(self.clock.now()) {
            warn!(exp = ?claims.exp, "Discarding expired credential");
            self.invalidate(state, Invalidation::Expired);
            return;
        }

        let identity = Identity::from_claims(&claims);
        info!(email = %identity.email, role = %identity.role, "Session authenticated");

        state.token = Some(token);
        state.claims = Some(claims);
        state.identity = Some(identity);
        state.last_invalidation = None;
        self.publish(state);
    }

    fn invalidate(&self, state: &mut SessionState, reason: Invalidation) {
        if let Err(e) = self.storage.remove(TOKEN_STORAGE_KEY) {
            warn!(error = %e, "Failed to remove persisted credential");
        }

        state.token = None;
        state.claims = None;
        state.identity = None;
        state.last_invalidation = Some(reason);
        self.publish(state);
    }

    fn visible_identity(&self, state: &SessionState) -> Option<Identity> {
        match &state.identity {
            Some(identity) => Some(identity.clone()),
            None if self.demo_mode => Some(Identity::demo()),
            None => None,
        }
    }

    fn publish(&self, state: &SessionState) {
        let next = self.visible_identity(state);
        self.identity_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, Role};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    /// 테스트용 조작 가능한 시계.
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 22, 12, 0, 0).unwrap()
    }

    fn token(payload: serde_json::Value) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.sig",
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    fn store_with(storage: Arc<MemoryStorage>, clock: Arc<ManualClock>) -> SessionStore {
        SessionStore::initialize(storage, SessionOptions::default().with_clock(clock))
    }

    #[test]
    fn test_admin_scenario() {
        let clock = ManualClock::at(base_time());
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), clock);

        let exp = (base_time() + Duration::hours(1)).timestamp();
        let identity = session.login(token(serde_json::json!({
            "exp": exp,
            "perfils": ["ADMIN", "USER"],
            "email": "a@b.com"
        })));

        assert_eq!(
            identity,
            Some(Identity {
                role: Role::Admin,
                email: "a@b.com".into(),
                name: String::new(),
            })
        );
        assert!(session.is_admin());
        assert!(session.is_authenticated());
        assert!(storage.get(TOKEN_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_user_scenario_without_exp() {
        let session = store_with(Arc::new(MemoryStorage::new()), ManualClock::at(base_time()));

        session.login(token(serde_json::json!({ "role": "USER", "sub": "x@y.com" })));

        let identity = session.current_identity().unwrap();
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.email, "x@y.com");
        assert_eq!(identity.name, "");
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_malformed_login_stays_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), ManualClock::at(base_time()));

        assert_eq!(session.login("abc"), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.current_token(), None);
        assert_eq!(session.last_invalidation(), Some(Invalidation::Malformed));
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_expired_login_clears_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), ManualClock::at(base_time()));

        let exp = (base_time() - Duration::seconds(1)).timestamp();
        assert_eq!(session.login(token(serde_json::json!({ "exp": exp }))), None);
        assert_eq!(session.last_invalidation(), Some(Invalidation::Expired));
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_passive_expiry_on_read() {
        let clock = ManualClock::at(base_time());
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), clock.clone());

        let exp = (base_time() + Duration::minutes(10)).timestamp();
        session.login(token(serde_json::json!({ "exp": exp, "email": "a@b.com" })));
        assert!(session.is_authenticated());

        clock.advance(Duration::minutes(11));

        assert!(!session.is_authenticated());
        assert_eq!(session.current_token(), None);
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
        assert_eq!(session.last_invalidation(), Some(Invalidation::Expired));
    }

    #[test]
    fn test_exp_boundary_uses_milliseconds() {
        let clock = ManualClock::at(base_time());
        let session = store_with(Arc::new(MemoryStorage::new()), clock.clone());

        // exp * 1000 == now 이면 아직 유효
        session.login(token(serde_json::json!({ "exp": base_time().timestamp() })));
        assert!(session.is_authenticated());

        clock.advance(Duration::milliseconds(1));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), ManualClock::at(base_time()));
        session.login(token(serde_json::json!({ "email": "a@b.com" })));

        session.logout();
        let after_once = (session.current_identity(), session.current_token());
        session.logout();
        let after_twice = (session.current_identity(), session.current_token());

        assert_eq!(after_once, after_twice);
        assert_eq!(after_twice, (None, None));
        assert_eq!(session.last_invalidation(), Some(Invalidation::LoggedOut));
    }

    #[test]
    fn test_initialize_restores_and_validates() {
        let valid = token(serde_json::json!({ "perfils": ["ADMIN"] }));
        let storage = Arc::new(MemoryStorage::with_entry(TOKEN_STORAGE_KEY, &valid));
        let session = store_with(storage, ManualClock::at(base_time()));
        assert!(session.is_admin());
        assert_eq!(session.current_token(), Some(valid));

        let storage = Arc::new(MemoryStorage::with_entry(TOKEN_STORAGE_KEY, "garbage"));
        let session = store_with(storage.clone(), ManualClock::at(base_time()));
        assert!(!session.is_authenticated());
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_server_rejection() {
        let storage = Arc::new(MemoryStorage::new());
        let session = store_with(storage.clone(), ManualClock::at(base_time()));
        session.login(token(serde_json::json!({ "email": "a@b.com" })));

        session.expire_from_server();
        assert!(!session.is_authenticated());
        assert_eq!(session.last_invalidation(), Some(Invalidation::Rejected));
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_demo_mode() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::initialize(
            storage,
            SessionOptions::default()
                .with_clock(ManualClock::at(base_time()))
                .with_demo_mode(true),
        );

        assert_eq!(session.current_identity(), Some(Identity::demo()));
        assert!(session.is_admin());
        assert_eq!(session.current_token(), None);

        // 실제 토큰이 우선
        session.login(token(serde_json::json!({ "role": "USER", "email": "u@b.com" })));
        assert!(!session.is_admin());

        session.logout();
        assert_eq!(session.current_identity(), Some(Identity::demo()));
    }

    #[tokio::test]
    async fn test_subscribe_receives_transitions() {
        let session = store_with(Arc::new(MemoryStorage::new()), ManualClock::at(base_time()));
        let mut rx = session.subscribe();
        assert_eq!(*rx.borrow_and_update(), None);

        session.login(token(serde_json::json!({ "email": "a@b.com" })));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|i| i.email.clone()), Some("a@b.com".to_string()));

        session.logout();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);

        // 이미 익명 상태에서 로그아웃하면 알림 없음
        session.logout();
        assert!(!rx.has_changed().unwrap());
    }
}
