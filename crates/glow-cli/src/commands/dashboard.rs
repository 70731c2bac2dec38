//! 대시보드.

use anyhow::Result;
use chrono::Utc;
use glow_auth::{Permission, Route};
use glow_client::load_dashboard;

use crate::output::format_dashboard;
use crate::{Console, OutputFormat};

/// 오늘(UTC) 기준 지표 출력.
pub async fn show(console: &Console, format: OutputFormat) -> Result<String> {
    console.authorize(Route::Dashboard, Permission::ViewDashboard)?;

    let summary = load_dashboard(console.api(), Utc::now().date_naive()).await?;
    format.render(&summary, format_dashboard)
}
