//! 판매 모델.
//!
//! 합계 계산과 재고 차감은 백엔드가 담당하고, 여기서는 요청 구성과
//! 응답 해석만 다룹니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{GlowError, GlowResult};

/// 판매 상태.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// 유효한 판매
    #[default]
    Active,
    /// 취소된 판매
    Canceled,
    /// 알 수 없는 상태 값
    #[serde(other)]
    Unknown,
}

impl SaleStatus {
    /// 화면 표시용 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            SaleStatus::Active => "Ativa",
            SaleStatus::Canceled => "Cancelada",
            SaleStatus::Unknown => "-",
        }
    }
}

/// 판매 목록 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// 판매 ID
    pub id: i64,
    /// 고객명
    pub client: String,
    /// 판매 일시 (ISO-8601 문자열)
    #[serde(default)]
    pub date: String,
    /// 총액 (백엔드 계산)
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_value: Option<Decimal>,
    /// 상태
    #[serde(default)]
    pub status: SaleStatus,
}

impl Sale {
    /// 총액 (없으면 0).
    pub fn total(&self) -> Decimal {
        self.total_value.unwrap_or(Decimal::ZERO)
    }

    /// 취소된 판매인지 확인.
    pub fn is_canceled(&self) -> bool {
        self.status == SaleStatus::Canceled
    }

    /// 판매 일자 (`YYYY-MM-DD`) 부분.
    pub fn day(&self) -> Option<&str> {
        self.date.get(..10)
    }
}

/// 판매 상세의 개별 품목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
    /// 판매 시점 단가
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl SaleLine {
    /// 품목 소계.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// 판매 상세 (품목 포함).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    #[serde(default)]
    pub items: Vec<SaleLine>,
}

/// 판매 요청의 품목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

impl SaleItemInput {
    /// 상품이 선택되었고 수량이 양수인지 확인.
    pub fn is_valid(&self) -> bool {
        self.product_id > 0 && self.quantity > 0
    }
}

/// 판매 생성 요청.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleInput {
    pub client: String,
    pub items: Vec<SaleItemInput>,
}

impl SaleInput {
    /// 유효한 품목만 남겨 요청을 만듭니다.
    ///
    /// 상품 미선택 또는 수량 0 이하의 품목은 조용히 제외하며,
    /// 남는 품목이 없으면 에러를 반환합니다.
    pub fn new(client: impl Into<String>, items: Vec<SaleItemInput>) -> GlowResult<Self> {
        let client = client.into().trim().to_string();
        if client.is_empty() {
            return Err(GlowError::Validation("고객명은 필수입니다".to_string()));
        }

        let items: Vec<SaleItemInput> = items.into_iter().filter(SaleItemInput::is_valid).collect();
        if items.is_empty() {
            return Err(GlowError::Validation(
                "최소 한 개의 품목을 추가해야 합니다".to_string(),
            ));
        }

        Ok(Self { client, items })
    }
}
