//! 대시보드 데이터 로딩.

use chrono::NaiveDate;
use glow_core::DashboardSummary;

use crate::{ApiResult, ConsoleApi};

/// 상품과 판매 목록을 동시에 조회해 오늘 기준 지표를 계산합니다.
pub async fn load_dashboard(api: &dyn ConsoleApi, today: NaiveDate) -> ApiResult<DashboardSummary> {
    let (products, sales) = tokio::try_join!(api.get_products(), api.get_sales())?;
    tracing::debug!(
        products = products.len(),
        sales = sales.len(),
        backend = api.name(),
        "Dashboard data loaded"
    );
    Ok(DashboardSummary::compute(&products, &sales, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DemoApi;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_demo_dashboard() {
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 9, 0, 0).unwrap();
        let api = DemoApi::at(now);

        // 2/21: 오늘 시드된 두 건 + Carla Santos
        let summary = load_dashboard(&api, now.date_naive()).await.unwrap();
        assert_eq!(summary.total_products, 8);
        assert_eq!(summary.sales_today, 3);
        assert_eq!(summary.revenue_today, dec!(575.60));

        // 취소된 판매만 있는 날
        let summary = load_dashboard(&api, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap())
            .await
            .unwrap();
        assert_eq!(summary.sales_today, 0);
        assert_eq!(summary.revenue_today, dec!(0));
    }
}
