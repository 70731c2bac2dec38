//! 판매 관리.

use anyhow::Result;
use glow_auth::{Permission, Route};
use glow_core::{format_brl, SaleInput};
use tracing::info;

use crate::cli::SaleCommand;
use crate::output::{format_sale_detail, format_sales};
use crate::{Console, OutputFormat};

pub async fn run(console: &Console, action: SaleCommand, format: OutputFormat) -> Result<String> {
    match action {
        SaleCommand::List => {
            console.authorize(Route::Sales, Permission::ViewSales)?;
            let sales = console.api().get_sales().await?;
            format.render(sales.as_slice(), format_sales)
        }
        SaleCommand::Show { id } => {
            console.authorize(Route::Sales, Permission::ViewSales)?;
            let detail = console.api().get_sale(id).await?;
            format.render(&detail, format_sale_detail)
        }
        SaleCommand::Create { client, items } => {
            console.authorize(Route::Sales, Permission::ManageSales)?;
            let input = SaleInput::new(client, items)?;
            let sale = console.api().create_sale(&input).await?;
            info!(id = sale.id, items = input.items.len(), "Sale created");
            Ok(format!(
                "✅ 판매 등록 완료: #{} {} ({})",
                sale.id,
                sale.client,
                format_brl(sale.total())
            ))
        }
        SaleCommand::Cancel { id } => {
            console.authorize(Route::Sales, Permission::ManageSales)?;
            let sale = console.api().cancel_sale(id).await?;
            info!(id, "Sale canceled");
            Ok(format!("🚫 판매 #{} 상태: {}", sale.id, sale.status.label()))
        }
    }
}
