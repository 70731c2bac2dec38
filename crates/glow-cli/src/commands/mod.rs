//! CLI 명령어 구현 모듈.
//!
//! 모든 명령은 출력할 문자열을 반환하며, 실제 출력은 바이너리가 담당합니다.

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod sales;
pub mod users;

use anyhow::Result;

use crate::cli::Commands;
use crate::{Console, OutputFormat};

/// 명령 실행.
pub async fn run(console: &Console, command: Commands, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Login { email, password } => auth::login(console, &email, &password).await,
        Commands::Logout => auth::logout(console),
        Commands::Whoami => auth::whoami(console, format),
        Commands::Nav => auth::nav(console),
        Commands::Dashboard => dashboard::show(console, format).await,
        Commands::Products { action } => products::run(console, action, format).await,
        Commands::Sales { action } => sales::run(console, action, format).await,
        Commands::Users { action } => users::run(console, action, format).await,
    }
}
