//! 로그인, 로그아웃, 현재 사용자 정보.

use anyhow::{bail, Result};
use glow_auth::{navigation, Route};
use glow_client::ApiError;
use glow_core::GlowError;
use tracing::{info, warn};

use crate::output::{format_identity, format_navigation};
use crate::{Console, OutputFormat};

/// 자격 증명으로 로그인하고 토큰을 저장합니다.
pub async fn login(console: &Console, email: &str, password: &str) -> Result<String> {
    console.enter(Route::Login)?;

    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        bail!(GlowError::Validation(
            "이메일과 비밀번호를 입력하세요".to_string()
        ));
    }

    let response = match console.api().login(email, password).await {
        Ok(response) => response,
        Err(ApiError::Unauthorized) => {
            warn!("Login rejected by backend");
            bail!(GlowError::Auth(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string()
            ));
        }
        Err(e) => return Err(e.into()),
    };

    match console.session().login(response.token) {
        Some(identity) => {
            info!(role = %identity.role, "Logged in");
            Ok(format!(
                "✅ 로그인 성공\n{}\n\n이동: {}",
                format_identity(&identity),
                Route::Dashboard
            ))
        }
        None => {
            let reason = console
                .session()
                .last_invalidation()
                .map(|i| i.message())
                .unwrap_or("토큰을 확인할 수 없습니다");
            bail!(GlowError::Auth(format!("로그인 실패: {}", reason)))
        }
    }
}

/// 저장된 토큰을 삭제합니다.
pub fn logout(console: &Console) -> Result<String> {
    console.session().logout();
    Ok(format!("👋 로그아웃 되었습니다. 이동: {}", Route::Login))
}

/// 현재 사용자 정보.
pub fn whoami(console: &Console, format: OutputFormat) -> Result<String> {
    let session = console.session();
    let Some(identity) = session.current_identity() else {
        let mut message = "로그인되어 있지 않습니다".to_string();
        if let Some(reason) = session.last_invalidation() {
            message.push_str(&format!(" ({})", reason.message()));
        }
        return Ok(message);
    };

    let mut output = format.render(&identity, format_identity)?;
    if session.is_demo() && format == OutputFormat::Table {
        output.push_str("\n  (데모 모드)");
    }
    Ok(output)
}

/// 현재 권한으로 보이는 메뉴.
pub fn nav(console: &Console) -> Result<String> {
    let gate = console.session().gate();
    let items = navigation(&gate);
    if items.is_empty() {
        return Ok(format!("메뉴가 없습니다. 먼저 로그인하세요 ({})", Route::Login));
    }
    Ok(format_navigation(&items))
}
