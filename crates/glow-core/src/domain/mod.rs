//! 콘솔 도메인 모델.
//!
//! 백엔드 JSON 스키마(camelCase)와 일치하는 타입과
//! 화면에서 사용하던 계산/검증 규칙을 포함합니다.

mod dashboard;
mod product;
mod sale;
mod user;

pub use dashboard::DashboardSummary;
pub use product::{Product, ProductInput, ProductPatch};
pub use sale::{Sale, SaleDetail, SaleInput, SaleItemInput, SaleLine, SaleStatus};
pub use user::{User, UserInput, UserPatch, ADMIN_PROFILE};

use rust_decimal::Decimal;

/// 금액을 헤알 표기(`R$ 12.30`)로 포맷합니다.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {:.2}", value.round_dp(2))
}
