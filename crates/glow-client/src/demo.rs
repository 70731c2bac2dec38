//! 메모리 데모 백엔드.
//!
//! 백엔드 없이 콘솔을 둘러볼 수 있도록 고정 데이터를 제공합니다.
//! 변경은 프로세스 메모리에만 반영되며 재시작하면 초기 데이터로 돌아갑니다.

use std::sync::RwLock;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use glow_core::{
    Product, ProductInput, ProductPatch, Sale, SaleDetail, SaleInput, SaleLine, SaleStatus, User,
    UserInput, UserPatch, ADMIN_PROFILE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::debug;

use crate::{ApiError, ApiResult, ConsoleApi, LoginResponse};

/// 데모 토큰 유효 시간.
const DEMO_TOKEN_TTL_HOURS: i64 = 8;

struct SaleRecord {
    sale: Sale,
    items: Vec<SaleLine>,
}

struct DemoState {
    products: Vec<Product>,
    sales: Vec<SaleRecord>,
    users: Vec<User>,
    now: DateTime<Utc>,
}

impl DemoState {
    fn seed(now: DateTime<Utc>) -> Self {
        let product = |id, name: &str, cost_price, stock| Product {
            id,
            name: name.to_string(),
            cost_price,
            stock,
        };
        let products = vec![
            product(1, "Base Líquida Matte", dec!(89.90), 24),
            product(2, "Batom Cremoso Rose", dec!(45.50), 38),
            product(3, "Paleta de Sombras Nude", dec!(129.90), 12),
            product(4, "Máscara de Cílios Volume", dec!(59.90), 31),
            product(5, "Pó Compacto Translúcido", dec!(68.00), 19),
            product(6, "Primer Facial Hidratante", dec!(75.00), 15),
            product(7, "Blush em Pó Pêssego", dec!(52.90), 27),
            product(8, "Delineador Líquido Preto", dec!(34.90), 42),
        ];

        let today = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let sale = |id, client: &str, date: &str, total, status| SaleRecord {
            sale: Sale {
                id,
                client: client.to_string(),
                date: date.to_string(),
                total_value: Some(total),
                status,
            },
            items: Vec::new(),
        };
        let sales = vec![
            sale(1, "Maria Silva", &today, dec!(265.30), SaleStatus::Active),
            sale(2, "Ana Oliveira", &today, dec!(129.90), SaleStatus::Active),
            sale(3, "Carla Santos", "2026-02-21T14:00:00Z", dec!(180.40), SaleStatus::Active),
            sale(4, "Juliana Costa", "2026-02-20T10:30:00Z", dec!(95.40), SaleStatus::Canceled),
            sale(5, "Fernanda Lima", "2026-02-19T16:45:00Z", dec!(314.70), SaleStatus::Active),
        ];

        let user = |id, name: &str, email: &str, admin: bool| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            perfils: if admin {
                vec![ADMIN_PROFILE.to_string()]
            } else {
                Vec::new()
            },
        };
        let users = vec![
            user(1, "Alice Glow", "alice@aliceglow.com", true),
            user(2, "Pedro Santiago", "pedro@aliceglow.com", true),
            user(3, "Maria Vendedora", "maria@aliceglow.com", false),
        ];

        Self {
            products,
            sales,
            users,
            now,
        }
    }

    fn product_mut(&mut self, id: i64) -> ApiResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::rejected(404, format!("Produto {} não encontrado", id)))
    }

    fn sale_mut(&mut self, id: i64) -> ApiResult<&mut SaleRecord> {
        self.sales
            .iter_mut()
            .find(|s| s.sale.id == id)
            .ok_or_else(|| ApiError::rejected(404, format!("Venda {} não encontrada", id)))
    }

    fn user_mut(&mut self, id: i64) -> ApiResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::rejected(404, format!("Usuário {} não encontrado", id)))
    }

    fn ensure_unique_email(&self, email: &str, except: Option<i64>) -> ApiResult<()> {
        let taken = self
            .users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email));
        if taken {
            return Err(ApiError::rejected(409, "E-mail já cadastrado"));
        }
        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// 메모리 데모 백엔드.
pub struct DemoApi {
    state: RwLock<DemoState>,
}

impl Default for DemoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoApi {
    /// 현재 시각 기준 데모 데이터로 생성.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// 지정한 시각을 "오늘"로 하는 데모 데이터로 생성.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            state: RwLock::new(DemoState::seed(now)),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&DemoState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut DemoState) -> ApiResult<T>) -> ApiResult<T> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }
}

/// 서명 없는 데모 토큰 (`header.payload.`).
fn demo_token(user: &User, expires_at: DateTime<Utc>) -> String {
    let header = json!({ "alg": "none", "typ": "JWT" });
    let payload = json!({
        "sub": user.email,
        "email": user.email,
        "name": user.name,
        "perfils": user.perfils,
        "exp": expires_at.timestamp(),
    });
    format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

#[async_trait]
impl ConsoleApi for DemoApi {
    fn name(&self) -> &str {
        "demo"
    }

    async fn login(&self, email: &str, _password: &str) -> ApiResult<LoginResponse> {
        let user = self.read(|state| {
            state
                .users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
                .cloned()
        });
        let user = user.ok_or(ApiError::Unauthorized)?;
        debug!(email = %user.email, "Demo login");

        let expires_at = Utc::now() + Duration::hours(DEMO_TOKEN_TTL_HOURS);
        Ok(LoginResponse {
            token: demo_token(&user, expires_at),
        })
    }

    async fn get_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.read(|state| state.products.clone()))
    }

    async fn create_product(&self, input: &ProductInput) -> ApiResult<Product> {
        self.write(|state| {
            let product = Product {
                id: next_id(state.products.iter().map(|p| p.id)),
                name: input.name.clone(),
                cost_price: input.cost_price,
                stock: input.stock,
            };
            state.products.push(product.clone());
            Ok(product)
        })
    }

    async fn update_product(&self, id: i64, patch: &ProductPatch) -> ApiResult<Product> {
        self.write(|state| {
            let product = state.product_mut(id)?;
            if let Some(name) = &patch.name {
                product.name = name.clone();
            }
            if let Some(cost_price) = patch.cost_price {
                product.cost_price = cost_price;
            }
            if let Some(stock) = patch.stock {
                product.stock = stock;
            }
            Ok(product.clone())
        })
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.write(|state| {
            state.product_mut(id)?;
            state.products.retain(|p| p.id != id);
            Ok(())
        })
    }

    async fn get_sales(&self) -> ApiResult<Vec<Sale>> {
        Ok(self.read(|state| state.sales.iter().map(|r| r.sale.clone()).collect()))
    }

    async fn get_sale(&self, id: i64) -> ApiResult<SaleDetail> {
        self.write(|state| {
            let record = state.sale_mut(id)?;
            Ok(SaleDetail {
                sale: record.sale.clone(),
                items: record.items.clone(),
            })
        })
    }

    /// 원가 기준으로 합계를 계산하고 재고를 차감합니다.
    async fn create_sale(&self, input: &SaleInput) -> ApiResult<Sale> {
        self.write(|state| {
            let mut lines = Vec::with_capacity(input.items.len());
            for item in &input.items {
                let product = state
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .ok_or_else(|| {
                        ApiError::rejected(404, format!("Produto {} não encontrado", item.product_id))
                    })?;
                let reserved: i64 = lines
                    .iter()
                    .filter(|l: &&SaleLine| l.product_id == item.product_id)
                    .map(|l| l.quantity)
                    .sum();
                if product.stock < reserved + item.quantity {
                    return Err(ApiError::rejected(
                        422,
                        format!("Estoque insuficiente para {}", product.name),
                    ));
                }
                lines.push(SaleLine {
                    product_id: product.id,
                    quantity: item.quantity,
                    price: product.cost_price,
                    product_name: Some(product.name.clone()),
                });
            }

            for line in &lines {
                state.product_mut(line.product_id)?.stock -= line.quantity;
            }

            let total: Decimal = lines.iter().map(SaleLine::subtotal).sum();
            let sale = Sale {
                id: next_id(state.sales.iter().map(|r| r.sale.id)),
                client: input.client.clone(),
                date: state.now.to_rfc3339_opts(SecondsFormat::Millis, true),
                total_value: Some(total),
                status: SaleStatus::Active,
            };
            state.sales.push(SaleRecord {
                sale: sale.clone(),
                items: lines,
            });
            Ok(sale)
        })
    }

    /// 판매를 취소하고 품목 재고를 되돌립니다.
    async fn cancel_sale(&self, id: i64) -> ApiResult<Sale> {
        self.write(|state| {
            let record = state.sale_mut(id)?;
            if record.sale.is_canceled() {
                return Err(ApiError::rejected(409, "Venda já cancelada"));
            }
            record.sale.status = SaleStatus::Canceled;
            let sale = record.sale.clone();
            let restock: Vec<(i64, i64)> = record
                .items
                .iter()
                .map(|l| (l.product_id, l.quantity))
                .collect();

            for (product_id, quantity) in restock {
                if let Ok(product) = state.product_mut(product_id) {
                    product.stock += quantity;
                }
            }
            Ok(sale)
        })
    }

    async fn get_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.read(|state| state.users.clone()))
    }

    async fn create_user(&self, input: &UserInput) -> ApiResult<User> {
        self.write(|state| {
            state.ensure_unique_email(&input.email, None)?;
            let user = User {
                id: next_id(state.users.iter().map(|u| u.id)),
                name: input.name.clone(),
                email: input.email.clone(),
                perfils: input.perfils.clone(),
            };
            state.users.push(user.clone());
            Ok(user)
        })
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> ApiResult<User> {
        self.write(|state| {
            if let Some(email) = &patch.email {
                state.ensure_unique_email(email, Some(id))?;
            }
            let user = state.user_mut(id)?;
            if let Some(name) = &patch.name {
                user.name = name.clone();
            }
            if let Some(email) = &patch.email {
                user.email = email.clone();
            }
            if let Some(perfils) = &patch.perfils {
                user.perfils = perfils.clone();
            }
            Ok(user.clone())
        })
    }

    async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.write(|state| {
            state.user_mut(id)?;
            state.users.retain(|u| u.id != id);
            Ok(())
        })
    }
}
