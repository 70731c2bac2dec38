//! 토큰에서 도출한 사용자 신원.

use serde::Serialize;

use crate::{Claims, Role};

/// 현재 로그인한 사용자.
///
/// 저장되지 않고 항상 토큰 페이로드에서 도출됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl Identity {
    /// 페이로드에서 신원 도출.
    ///
    /// 이메일은 `email`, 없거나 비어 있으면 `sub`, 둘 다 없으면 빈 문자열입니다.
    pub fn from_claims(claims: &Claims) -> Self {
        let email = claims
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .or(claims.sub.as_deref())
            .unwrap_or_default()
            .to_string();

        Self {
            role: claims.role(),
            email,
            name: claims.name.clone().unwrap_or_default(),
        }
    }

    /// 데모 모드에서 사용하는 고정 관리자 신원.
    pub fn demo() -> Self {
        Self {
            role: Role::Admin,
            email: "demo@aliceglow.com".to_string(),
            name: "Demo".to_string(),
        }
    }

    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
