//! 역할 기반 접근 제어 (RBAC).
//!
//! 콘솔의 역할은 관리자와 일반 사용자 두 가지입니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 관리자 - 상품 편집 및 사용자 관리 포함 모든 권한
    Admin,
    /// 일반 사용자 - 조회 및 판매 등록/취소
    User,
}

impl Role {
    /// 역할이 특정 권한을 가지는지 확인.
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::User => matches!(
                permission,
                Permission::ViewDashboard
                    | Permission::ViewProducts
                    | Permission::ViewSales
                    | Permission::ManageSales
            ),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        };
        write!(f, "{}", s)
    }
}

/// 콘솔 권한.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// 대시보드 조회
    ViewDashboard,
    /// 상품 목록 조회
    ViewProducts,
    /// 상품 등록/수정/삭제
    ManageProducts,
    /// 판매 조회
    ViewSales,
    /// 판매 등록/취소
    ManageSales,
    /// 사용자 관리
    ManageUsers,
}

impl Permission {
    /// 권한에 대한 설명 반환.
    pub fn description(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "대시보드 조회",
            Permission::ViewProducts => "상품 조회",
            Permission::ManageProducts => "상품 관리",
            Permission::ViewSales => "판매 조회",
            Permission::ManageSales => "판매 등록/취소",
            Permission::ManageUsers => "사용자 관리",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        // Admin은 모든 권한 보유
        assert!(Role::Admin.has_permission(Permission::ManageUsers));
        assert!(Role::Admin.has_permission(Permission::ManageProducts));

        // User는 판매 처리까지만
        assert!(Role::User.has_permission(Permission::ViewDashboard));
        assert!(Role::User.has_permission(Permission::ManageSales));
        assert!(!Role::User.has_permission(Permission::ManageProducts));
        assert!(!Role::User.has_permission(Permission::ManageUsers));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::User.to_string(), "USER");
    }
}
