//! 토큰 페이로드 디코딩.
//!
//! `header.payload.signature` 형식의 토큰에서 두 번째 세그먼트만 읽어
//! [`Claims`]로 변환합니다. 서명 검증은 백엔드가 요청마다 수행하므로
//! 여기서는 하지 않습니다.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Role;
use glow_core::ADMIN_PROFILE;

/// 패딩 유무와 관계없이 base64url을 디코딩하는 엔진.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// 토큰 페이로드.
///
/// 모든 필드는 선택적이며, 알 수 없는 필드는 무시합니다.
/// 인식하는 필드의 값 타입이 예상과 다르면 해당 필드만 비어 있는 것으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration - 만료 시간 (Unix timestamp, 초, 소수 허용)
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// 프로필(역할) 목록
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub perfils: Option<Vec<String>>,
    /// 단일 역할
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// 이메일
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Subject - 보통 사용자 이메일 (숫자 ID도 허용)
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// 표시 이름
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 숫자만 받고 그 외 타입은 `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// 문자열은 그대로, 숫자와 불리언은 문자열로 변환. 그 외는 `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// 배열의 문자열 원소만 모음. 배열이 아니면 `None`.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

impl Claims {
    /// 주어진 시각 기준으로 만료되었는지 확인.
    ///
    /// `exp`가 없으면 만료되지 않는 토큰으로 취급합니다.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp * 1000.0 < now.timestamp_millis() as f64,
            None => false,
        }
    }

    /// 페이로드에서 역할 도출.
    ///
    /// `perfils`에 `ADMIN`이 있거나 `role`이 `ADMIN`이면 관리자, 그 외는 일반 사용자.
    pub fn role(&self) -> Role {
        let listed = self
            .perfils
            .as_deref()
            .is_some_and(|profiles| profiles.iter().any(|p| p == ADMIN_PROFILE));
        let singular = self.role.as_deref() == Some(ADMIN_PROFILE);

        match (listed, singular) {
            (false, false) => Role::User,
            _ => Role::Admin,
        }
    }
}

/// 토큰 디코딩 실패.
///
/// 세그먼트 누락, base64 오류, JSON 객체가 아닌 페이로드를 모두 이 하나의 타입으로 모읍니다.
/// `reason`은 로그용입니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("토큰 디코딩 실패: {reason}")]
pub struct DecodeFailure {
    reason: String,
}

impl DecodeFailure {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// 실패 사유.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// 토큰 검증 에러.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Decode(#[from] DecodeFailure),
    #[error("토큰이 만료되었습니다 (exp={exp})")]
    Expired { exp: f64 },
}

/// 토큰을 디코딩합니다.
///
/// 순수 함수이며 만료 여부는 확인하지 않습니다.
pub fn decode(token: &str) -> Result<Claims, DecodeFailure> {
    let segment = token
        .split('.')
        .nth(1)
        .ok_or_else(|| DecodeFailure::new("payload segment missing"))?;

    // 표준 base64 알파벳으로 인코딩된 토큰도 허용
    let normalized: String = segment
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE
        .decode(normalized.as_bytes())
        .map_err(|e| DecodeFailure::new(format!("base64: {}", e)))?;

    let payload: Value =
        serde_json::from_slice(&bytes).map_err(|e| DecodeFailure::new(format!("json: {}", e)))?;
    if !payload.is_object() {
        return Err(DecodeFailure::new("payload is not a JSON object"));
    }
    serde_json::from_value(payload).map_err(|e| DecodeFailure::new(format!("claims: {}", e)))
}

/// 토큰을 디코딩하고 만료 여부까지 확인합니다.
pub fn validate(token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let claims = decode(token)?;
    match claims.exp {
        Some(exp) if claims.is_expired_at(now) => Err(TokenError::Expired { exp }),
        _ => Ok(claims),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use proptest::prelude::*;
    use serde_json::json;

    const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-testing-minimum-32-chars";

    fn signed(payload: serde_json::Value) -> String {
        encode(&Header::default(), &payload, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
    }

    fn unsigned(raw_payload: &str) -> String {
        format!("eyJhbGciOiJub25lIn0.{}.", URL_SAFE_NO_PAD.encode(raw_payload))
    }

    #[test]
    fn test_decode_signed_token() {
        let token = signed(json!({
            "sub": "alice@aliceglow.com",
            "perfils": ["ADMIN"],
            "exp": 4_102_444_800i64,
            "iat": 1_700_000_000i64
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice@aliceglow.com"));
        assert_eq!(claims.exp, Some(4_102_444_800.0));
        assert_eq!(claims.role(), Role::Admin);
    }

    #[test]
    fn test_decode_without_separator_fails() {
        assert!(decode("abc").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_invalid_payload() {
        // base64 오류
        assert!(decode("header.!!!.sig").is_err());
        // JSON이 아님
        assert!(decode(&unsigned("not json")).is_err());
        // 객체가 아닌 JSON
        assert!(decode(&unsigned("42")).is_err());
        // 배열 페이로드
        assert!(decode(&unsigned(r#"["ADMIN"]"#)).is_err());
        // 빈 페이로드
        assert!(decode("abc.").is_err());
    }

    #[test]
    fn test_decode_padded_and_standard_alphabet() {
        use base64::engine::general_purpose::STANDARD;

        // '?'가 포함되어 표준 알파벳에서 '/'가 생기는 페이로드
        let raw = r#"{"name":"??>"}"#;
        let token = format!("h.{}.s", STANDARD.encode(raw));
        assert!(token.contains('/') || token.contains('+') || token.contains('='));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.name.as_deref(), Some("??>"));
    }

    #[test]
    fn test_decode_ignores_unknown_and_null_fields() {
        let claims = decode(&unsigned(r#"{"email":null,"tenant":"x","role":"USER"}"#)).unwrap();
        assert_eq!(claims.email, None);
        assert_eq!(claims.role.as_deref(), Some("USER"));
    }

    #[test]
    fn test_decode_fractional_exp() {
        let claims = decode(&unsigned(
            r#"{"exp":4102444800.5,"perfils":["ADMIN"],"email":"a@b.com"}"#,
        ))
        .unwrap();
        assert_eq!(claims.exp, Some(4_102_444_800.5));
        assert_eq!(claims.role(), Role::Admin);

        // 밀리초 단위로 비교
        let just_before = DateTime::from_timestamp_millis(4_102_444_800_499).unwrap();
        let just_after = DateTime::from_timestamp_millis(4_102_444_800_501).unwrap();
        assert!(!claims.is_expired_at(just_before));
        assert!(claims.is_expired_at(just_after));
    }

    #[test]
    fn test_decode_numeric_sub() {
        let claims = decode(&unsigned(r#"{"sub":42,"perfils":["ADMIN"],"email":"a@b.com"}"#)).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.role(), Role::Admin);
    }

    #[test]
    fn test_decode_wrong_typed_fields_are_dropped() {
        let claims = decode(&unsigned(
            r#"{"exp":"tomorrow","perfils":"ADMIN","role":["ADMIN"],"name":{"first":"A"},"email":"a@b.com"}"#,
        ))
        .unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.perfils, None);
        assert_eq!(claims.role, None);
        assert_eq!(claims.name, None);
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.role(), Role::User);
        assert!(!claims.is_expired_at(Utc::now()));

        // 목록 안의 문자열이 아닌 원소는 무시
        let mixed = decode(&unsigned(r#"{"perfils":[1,null,"ADMIN"]}"#)).unwrap();
        assert_eq!(mixed.perfils, Some(vec!["ADMIN".to_string()]));
    }

    #[test]
    fn test_role_derivation() {
        let admin_by_list = Claims {
            perfils: Some(vec!["USER".into(), "ADMIN".into()]),
            ..Default::default()
        };
        let admin_by_role = Claims {
            role: Some("ADMIN".into()),
            ..Default::default()
        };
        let empty_list = Claims {
            perfils: Some(vec![]),
            ..Default::default()
        };
        let lowercase = Claims {
            role: Some("admin".into()),
            ..Default::default()
        };

        assert_eq!(admin_by_list.role(), Role::Admin);
        assert_eq!(admin_by_role.role(), Role::Admin);
        assert_eq!(empty_list.role(), Role::User);
        assert_eq!(Claims::default().role(), Role::User);
        assert_eq!(lowercase.role(), Role::User);
    }

    #[test]
    fn test_validate_expiry() {
        let now = Utc::now();
        let past = (now - Duration::seconds(5)).timestamp();
        let future = (now + Duration::hours(1)).timestamp();

        let expired = signed(json!({ "exp": past }));
        assert_eq!(
            validate(&expired, now),
            Err(TokenError::Expired { exp: past as f64 })
        );

        let fresh = signed(json!({ "exp": future }));
        assert!(validate(&fresh, now).is_ok());

        let no_exp = signed(json!({ "sub": "x@y.com" }));
        assert!(validate(&no_exp, now).is_ok());

        assert!(matches!(validate("abc", now), Err(TokenError::Decode(_))));
    }

    proptest! {
        #[test]
        fn prop_no_separator_never_decodes(input in "[^.]*") {
            prop_assert!(decode(&input).is_err());
        }

        #[test]
        fn prop_non_base64_payload_never_decodes(
            header in "[A-Za-z0-9_-]{0,12}",
            payload in "[!@#$%^&*()]{1,16}",
        ) {
            let token = format!("{}.{}.sig", header, payload);
            prop_assert!(decode(&token).is_err());
        }
    }
}
