//! 사용자 관리 (관리자 전용 화면).

use anyhow::Result;
use glow_auth::{Permission, Route};
use glow_core::{UserInput, UserPatch};
use tracing::info;

use crate::cli::UserCommand;
use crate::output::format_users;
use crate::{Console, OutputFormat};

pub async fn run(console: &Console, action: UserCommand, format: OutputFormat) -> Result<String> {
    console.authorize(Route::Users, Permission::ManageUsers)?;

    match action {
        UserCommand::List => {
            let users = console.api().get_users().await?;
            format.render(users.as_slice(), format_users)
        }
        UserCommand::Create {
            name,
            email,
            password,
            admin,
        } => {
            let input = UserInput::new(name, email, password, admin)?;
            let user = console.api().create_user(&input).await?;
            info!(id = user.id, admin, "User created");
            Ok(format!("✅ 사용자 등록 완료: #{} {} <{}>", user.id, user.name, user.email))
        }
        UserCommand::Update {
            id,
            name,
            email,
            password,
            admin,
        } => {
            let mut patch = UserPatch {
                name: name.map(|n| n.trim().to_string()),
                email: email.map(|e| e.trim().to_string()),
                password: password.filter(|p| !p.is_empty()),
                perfils: None,
            };
            if let Some(admin) = admin {
                patch = patch.with_admin(admin);
            }
            patch.validate()?;
            let user = console.api().update_user(id, &patch).await?;
            info!(id, "User updated");
            Ok(format!("✅ 사용자 수정 완료: #{} {}", user.id, user.name))
        }
        UserCommand::Delete { id } => {
            console.api().delete_user(id).await?;
            info!(id, "User deleted");
            Ok(format!("🗑️  사용자 #{} 삭제 완료", id))
        }
    }
}
