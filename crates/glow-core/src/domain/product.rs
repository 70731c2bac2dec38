//! 상품 카탈로그 모델.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{GlowError, GlowResult};

/// 상품.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 상품 ID
    pub id: i64,
    /// 상품명
    pub name: String,
    /// 원가
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    /// 재고 수량
    pub stock: i64,
}

/// 상품 생성 요청.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    pub stock: i64,
}

impl ProductInput {
    /// 입력값을 검증하며 생성합니다.
    pub fn new(name: impl Into<String>, cost_price: Decimal, stock: i64) -> GlowResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GlowError::Validation("상품명은 필수입니다".to_string()));
        }
        validate_amounts(Some(cost_price), Some(stock))?;
        Ok(Self {
            name,
            cost_price,
            stock,
        })
    }
}

/// 상품 부분 수정 요청 (PATCH).
///
/// 지정하지 않은 필드는 직렬화하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub cost_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// 변경할 필드가 없는지 확인.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cost_price.is_none() && self.stock.is_none()
    }

    /// 수정 요청을 검증합니다.
    pub fn validate(&self) -> GlowResult<()> {
        if self.is_empty() {
            return Err(GlowError::Validation("변경할 항목이 없습니다".to_string()));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(GlowError::Validation("상품명은 비워둘 수 없습니다".to_string()));
        }
        validate_amounts(self.cost_price, self.stock)
    }
}

fn validate_amounts(cost_price: Option<Decimal>, stock: Option<i64>) -> GlowResult<()> {
    if matches!(cost_price, Some(price) if price < Decimal::ZERO) {
        return Err(GlowError::Validation("원가는 음수일 수 없습니다".to_string()));
    }
    if matches!(stock, Some(stock) if stock < 0) {
        return Err(GlowError::Validation("재고는 음수일 수 없습니다".to_string()));
    }
    Ok(())
}
