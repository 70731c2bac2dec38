//! 화면 접근 제어.
//!
//! 각 화면은 관리자 전용 여부를 선언하고, 이동할 때마다 [`RouteGuard`]가
//! 현재 권한으로 허용 또는 리다이렉트를 결정합니다. 결정은 캐시하지 않습니다.

use crate::AuthorizationGate;

/// 콘솔 화면.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Products,
    Sales,
    Users,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Dashboard,
        Route::Products,
        Route::Sales,
        Route::Users,
    ];

    /// 화면 경로.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Products => "/products",
            Route::Sales => "/sales",
            Route::Users => "/users",
        }
    }

    /// 경로에서 화면 찾기. 끝의 `/`는 무시합니다.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// 메뉴 제목.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Products => "Produtos",
            Route::Sales => "Vendas",
            Route::Users => "Usuários",
        }
    }

    /// 로그인 없이 접근 가능한 화면인지.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// 관리자 전용 화면인지.
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Users)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// 접근 판단 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// 화면 접근 정책.
pub struct RouteGuard;

impl RouteGuard {
    /// 보호된 화면에 대한 판단.
    ///
    /// - 미인증: 로그인 화면으로
    /// - 관리자 전용 화면에 일반 사용자: 기본 화면(`/`)으로
    pub fn decide(gate: &AuthorizationGate, requires_admin: bool) -> GuardDecision {
        if !gate.is_authenticated() {
            GuardDecision::Redirect(Route::Login)
        } else if requires_admin && !gate.is_admin() {
            GuardDecision::Redirect(Route::Dashboard)
        } else {
            GuardDecision::Allow
        }
    }

    /// 화면 이동 판단.
    pub fn check(gate: &AuthorizationGate, route: Route) -> GuardDecision {
        if route.is_public() {
            return GuardDecision::Allow;
        }
        Self::decide(gate, route.requires_admin())
    }

    /// 경로 문자열로 이동 판단. 알 수 없는 경로는 기본 화면 규칙을 따릅니다.
    pub fn check_path(gate: &AuthorizationGate, path: &str) -> GuardDecision {
        match Route::from_path(path) {
            Some(route) => Self::check(gate, route),
            None => match Self::check(gate, Route::Dashboard) {
                GuardDecision::Allow => GuardDecision::Redirect(Route::Dashboard),
                redirect => redirect,
            },
        }
    }
}

/// 사이드바 메뉴 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

/// 현재 권한으로 보이는 메뉴 목록.
///
/// 관리자 전용 항목은 관리자에게만 보이며, 익명 사용자에게는 메뉴가 없습니다.
pub fn navigation(gate: &AuthorizationGate) -> Vec<NavItem> {
    if !gate.is_authenticated() {
        return Vec::new();
    }

    [Route::Dashboard, Route::Products, Route::Sales, Route::Users]
        .into_iter()
        .filter(|route| !route.requires_admin() || gate.is_admin())
        .map(|route| NavItem {
            title: route.title(),
            route,
        })
        .collect()
}
