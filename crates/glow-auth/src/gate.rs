//! 권한 판단.
//!
//! 세션 신원에서 `is_admin` / `is_authenticated`를 도출하는 값 타입입니다.
//! 독립된 상태를 갖지 않으며 필요할 때마다 [`SessionStore::gate`]로 새로 얻습니다.
//!
//! [`SessionStore::gate`]: crate::SessionStore::gate

use glow_core::GlowError;

use crate::{Identity, Permission, Role};

/// 권한 에러.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("로그인이 필요합니다")]
    NotAuthenticated,
    #[error("권한이 부족합니다: {}", .0.description())]
    InsufficientPermission(Permission),
}

impl From<AuthError> for GlowError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => GlowError::Auth(err.to_string()),
            AuthError::InsufficientPermission(_) => GlowError::Forbidden(err.to_string()),
        }
    }
}

/// 권한 판단 스냅샷.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizationGate {
    role: Option<Role>,
}

impl AuthorizationGate {
    /// 신원에서 생성합니다.
    pub fn from_identity(identity: Option<&Identity>) -> Self {
        Self {
            role: identity.map(|i| i.role),
        }
    }

    /// 익명 사용자.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// 권한 보유 여부 (익명은 항상 false).
    pub fn can(&self, permission: Permission) -> bool {
        self.role.is_some_and(|role| role.has_permission(permission))
    }

    /// 권한을 요구합니다.
    pub fn require(&self, permission: Permission) -> Result<Role, AuthError> {
        let role = self.role.ok_or(AuthError::NotAuthenticated)?;
        if role.has_permission(permission) {
            Ok(role)
        } else {
            Err(AuthError::InsufficientPermission(permission))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(role: Role) -> AuthorizationGate {
        AuthorizationGate::from_identity(Some(&Identity {
            role,
            email: "a@b.com".into(),
            name: String::new(),
        }))
    }

    #[test]
    fn test_capabilities() {
        let anonymous = AuthorizationGate::anonymous();
        assert!(!anonymous.is_authenticated());
        assert!(!anonymous.is_admin());
        assert!(!anonymous.can(Permission::ViewDashboard));

        let user = gate(Role::User);
        assert!(user.is_authenticated());
        assert!(!user.is_admin());

        let admin = gate(Role::Admin);
        assert!(admin.is_authenticated());
        assert!(admin.is_admin());
    }

    #[test]
    fn test_require() {
        assert_eq!(
            AuthorizationGate::anonymous().require(Permission::ViewSales),
            Err(AuthError::NotAuthenticated)
        );
        assert_eq!(
            gate(Role::User).require(Permission::ManageProducts),
            Err(AuthError::InsufficientPermission(Permission::ManageProducts))
        );
        assert_eq!(gate(Role::User).require(Permission::ManageSales), Ok(Role::User));
        assert_eq!(gate(Role::Admin).require(Permission::ManageUsers), Ok(Role::Admin));
    }

    #[test]
    fn test_auth_error_into_glow_error() {
        let err: GlowError = AuthError::InsufficientPermission(Permission::ManageUsers).into();
        assert!(!err.requires_login());
        assert!(err.to_string().contains("사용자 관리"));

        let err: GlowError = AuthError::NotAuthenticated.into();
        assert!(err.requires_login());
    }
}
