//! 대시보드 지표.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Product, Sale};

/// 대시보드 요약 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// 등록된 상품 수
    pub total_products: usize,
    /// 오늘 판매 건수 (취소 제외)
    pub sales_today: usize,
    /// 오늘 매출 합계 (취소 제외)
    pub revenue_today: Decimal,
}

impl DashboardSummary {
    /// 상품/판매 목록에서 지표를 계산합니다.
    ///
    /// `today`는 UTC 기준 날짜이며, 판매 일시의 앞 10자리와 비교합니다.
    pub fn compute(products: &[Product], sales: &[Sale], today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();

        let (sales_today, revenue_today) = sales
            .iter()
            .filter(|s| !s.is_canceled() && s.day() == Some(today.as_str()))
            .fold((0usize, Decimal::ZERO), |(count, sum), s| {
                (count + 1, sum + s.total())
            });

        Self {
            total_products: products.len(),
            sales_today,
            revenue_today,
        }
    }
}
