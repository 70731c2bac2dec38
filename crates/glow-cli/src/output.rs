//! 출력 형식.

use anyhow::Result;
use glow_auth::{Identity, NavItem};
use glow_core::{format_brl, DashboardSummary, Product, Sale, SaleDetail, User};
use serde::Serialize;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }

    /// 형식에 맞게 렌더링합니다.
    pub fn render<T, F>(&self, value: &T, table: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self {
            OutputFormat::Table => Ok(table(value)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// 상품 목록 표.
pub fn format_products(products: &[Product]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<32} {:>12} {:>8}\n",
        "ID", "NAME", "COST", "STOCK"
    ));
    output.push_str(&"-".repeat(61));
    output.push('\n');

    for product in products {
        output.push_str(&format!(
            "{:<6} {:<32} {:>12} {:>8}\n",
            product.id,
            truncate(&product.name, 32),
            format_brl(product.cost_price),
            product.stock
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} products", products.len()));
    output
}

/// 판매 목록 표.
pub fn format_sales(sales: &[Sale]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<24} {:<12} {:>12} {:<10}\n",
        "ID", "CLIENT", "DATE", "TOTAL", "STATUS"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for sale in sales {
        output.push_str(&format!(
            "{:<6} {:<24} {:<12} {:>12} {:<10}\n",
            sale.id,
            truncate(&sale.client, 24),
            sale.day().unwrap_or("-"),
            format_brl(sale.total()),
            sale.status.label()
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} sales", sales.len()));
    output
}

/// 판매 상세.
pub fn format_sale_detail(detail: &SaleDetail) -> String {
    let sale = &detail.sale;
    let mut output = String::new();

    output.push_str(&format!("판매 #{}\n", sale.id));
    output.push_str(&format!("  고객: {}\n", sale.client));
    output.push_str(&format!("  일자: {}\n", sale.day().unwrap_or("-")));
    output.push_str(&format!("  상태: {}\n", sale.status.label()));
    output.push_str(&format!("  합계: {}\n", format_brl(sale.total())));

    if detail.items.is_empty() {
        output.push_str("\n  (품목 정보 없음)");
        return output;
    }

    output.push('\n');
    output.push_str(&format!(
        "  {:<32} {:>6} {:>12} {:>12}\n",
        "PRODUCT", "QTY", "PRICE", "SUBTOTAL"
    ));
    for line in &detail.items {
        let name = line
            .product_name
            .clone()
            .unwrap_or_else(|| format!("#{}", line.product_id));
        output.push_str(&format!(
            "  {:<32} {:>6} {:>12} {:>12}\n",
            truncate(&name, 32),
            line.quantity,
            format_brl(line.price),
            format_brl(line.subtotal())
        ));
    }
    output.truncate(output.trim_end().len());
    output
}

/// 사용자 목록 표.
pub fn format_users(users: &[User]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<6} {:<24} {:<32} {:<6}\n", "ID", "NAME", "EMAIL", "ROLE"));
    output.push_str(&"-".repeat(71));
    output.push('\n');

    for user in users {
        output.push_str(&format!(
            "{:<6} {:<24} {:<32} {:<6}\n",
            user.id,
            truncate(&user.name, 24),
            truncate(&user.email, 32),
            if user.is_admin() { "ADMIN" } else { "USER" }
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} users", users.len()));
    output
}

/// 대시보드 요약.
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    [
        "📊 Dashboard".to_string(),
        "═══════════════════════════════════".to_string(),
        format!("  상품 수         {}", summary.total_products),
        format!("  오늘 판매       {}", summary.sales_today),
        format!("  오늘 매출       {}", format_brl(summary.revenue_today)),
    ]
    .join("\n")
}

/// 사이드바 메뉴.
pub fn format_navigation(items: &[NavItem]) -> String {
    items
        .iter()
        .map(|item| format!("  {:<10} {}", item.route.path(), item.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 현재 사용자.
pub fn format_identity(identity: &Identity) -> String {
    let name = if identity.name.is_empty() {
        "-"
    } else {
        identity.name.as_str()
    };
    format!(
        "👤 {}\n  이메일: {}\n  역할: {}",
        name, identity.email, identity.role
    )
}
