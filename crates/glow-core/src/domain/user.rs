//! 사용자 계정 모델.

use serde::{Deserialize, Serialize};

use crate::{GlowError, GlowResult};

/// 관리자 프로필 이름.
pub const ADMIN_PROFILE: &str = "ADMIN";

/// 사용자 계정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 프로필(역할) 목록
    #[serde(default)]
    pub perfils: Vec<String>,
}

impl User {
    /// 관리자 프로필 보유 여부.
    pub fn is_admin(&self) -> bool {
        self.perfils.iter().any(|p| p == ADMIN_PROFILE)
    }
}

fn profiles_for(is_admin: bool) -> Vec<String> {
    if is_admin {
        vec![ADMIN_PROFILE.to_string()]
    } else {
        Vec::new()
    }
}

/// 사용자 생성 요청.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub perfils: Vec<String>,
}

impl UserInput {
    /// 입력값을 검증하며 생성합니다.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        is_admin: bool,
    ) -> GlowResult<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        let password = password.into();

        if name.is_empty() {
            return Err(GlowError::Validation("이름은 필수입니다".to_string()));
        }
        validate_email(&email)?;
        if password.is_empty() {
            return Err(GlowError::Validation("비밀번호는 필수입니다".to_string()));
        }

        Ok(Self {
            name,
            email,
            password,
            perfils: profiles_for(is_admin),
        })
    }
}

/// 사용자 수정 요청 (PUT, 지정한 필드만 전송).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfils: Option<Vec<String>>,
}

impl UserPatch {
    /// 관리자 여부를 프로필 목록으로 설정합니다.
    #[must_use]
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.perfils = Some(profiles_for(is_admin));
        self
    }

    /// 수정 요청을 검증합니다.
    pub fn validate(&self) -> GlowResult<()> {
        if self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.perfils.is_none()
        {
            return Err(GlowError::Validation("변경할 항목이 없습니다".to_string()));
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> GlowResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(GlowError::Validation(format!(
            "올바르지 않은 이메일: {}",
            email
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_is_admin() {
        let json = r#"{"id":3,"name":"Maria Vendedora","email":"maria@aliceglow.com","perfils":[]}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin());

        let json = r#"{"id":1,"name":"Alice Glow","email":"alice@aliceglow.com","perfils":["ADMIN"]}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_user_input_profiles() {
        let admin = UserInput::new("Pedro", "pedro@aliceglow.com", "secret", true).unwrap();
        assert_eq!(admin.perfils, vec!["ADMIN".to_string()]);

        let seller = UserInput::new("Maria", "maria@aliceglow.com", "secret", false).unwrap();
        assert!(seller.perfils.is_empty());
    }

    #[test]
    fn test_user_input_validation() {
        assert!(UserInput::new("", "a@b.com", "x", false).is_err());
        assert!(UserInput::new("Ana", "not-an-email", "x", false).is_err());
        assert!(UserInput::new("Ana", "a@b.com", "", false).is_err());
    }

    #[test]
    fn test_user_patch() {
        assert!(UserPatch::default().validate().is_err());

        let patch = UserPatch::default().with_admin(false);
        assert!(patch.validate().is_ok());
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"perfils":[]}"#);
    }
}
