//! 상품 관리.

use anyhow::Result;
use glow_auth::{Permission, Route};
use glow_core::{ProductInput, ProductPatch};
use tracing::info;

use crate::cli::ProductCommand;
use crate::output::format_products;
use crate::{Console, OutputFormat};

pub async fn run(console: &Console, action: ProductCommand, format: OutputFormat) -> Result<String> {
    match action {
        ProductCommand::List => {
            console.authorize(Route::Products, Permission::ViewProducts)?;
            let products = console.api().get_products().await?;
            format.render(products.as_slice(), format_products)
        }
        ProductCommand::Create {
            name,
            cost_price,
            stock,
        } => {
            console.authorize(Route::Products, Permission::ManageProducts)?;
            let input = ProductInput::new(name, cost_price, stock)?;
            let product = console.api().create_product(&input).await?;
            info!(id = product.id, "Product created");
            Ok(format!("✅ 상품 등록 완료: #{} {}", product.id, product.name))
        }
        ProductCommand::Update {
            id,
            name,
            cost_price,
            stock,
        } => {
            console.authorize(Route::Products, Permission::ManageProducts)?;
            let patch = ProductPatch {
                name: name.map(|n| n.trim().to_string()),
                cost_price,
                stock,
            };
            patch.validate()?;
            let product = console.api().update_product(id, &patch).await?;
            info!(id, "Product updated");
            Ok(format!("✅ 상품 수정 완료: #{} {}", product.id, product.name))
        }
        ProductCommand::Delete { id } => {
            console.authorize(Route::Products, Permission::ManageProducts)?;
            console.api().delete_product(id).await?;
            info!(id, "Product deleted");
            Ok(format!("🗑️  상품 #{} 삭제 완료", id))
        }
    }
}
