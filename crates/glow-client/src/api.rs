//! 백엔드 trait 정의.

use async_trait::async_trait;
use glow_core::{
    Product, ProductInput, ProductPatch, Sale, SaleDetail, SaleInput, User, UserInput, UserPatch,
};
use serde::{Deserialize, Serialize};

use crate::ApiResult;

/// 로그인 요청 본문.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// 로그인 응답 본문.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// 콘솔이 사용하는 백엔드 인터페이스.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// 백엔드 이름 (로그용).
    fn name(&self) -> &str;

    // === 인증 ===

    /// 자격 증명으로 토큰 발급.
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    // === 상품 ===

    /// 상품 목록.
    async fn get_products(&self) -> ApiResult<Vec<Product>>;

    /// 상품 등록.
    async fn create_product(&self, input: &ProductInput) -> ApiResult<Product>;

    /// 상품 부분 수정.
    async fn update_product(&self, id: i64, patch: &ProductPatch) -> ApiResult<Product>;

    /// 상품 삭제.
    async fn delete_product(&self, id: i64) -> ApiResult<()>;

    // === 판매 ===

    /// 판매 목록.
    async fn get_sales(&self) -> ApiResult<Vec<Sale>>;

    /// 판매 상세 (품목 포함).
    async fn get_sale(&self, id: i64) -> ApiResult<SaleDetail>;

    /// 판매 등록.
    async fn create_sale(&self, input: &SaleInput) -> ApiResult<Sale>;

    /// 판매 취소.
    async fn cancel_sale(&self, id: i64) -> ApiResult<Sale>;

    // === 사용자 ===

    /// 사용자 목록.
    async fn get_users(&self) -> ApiResult<Vec<User>>;

    /// 사용자 등록.
    async fn create_user(&self, input: &UserInput) -> ApiResult<User>;

    /// 사용자 수정.
    async fn update_user(&self, id: i64, patch: &UserPatch) -> ApiResult<User>;

    /// 사용자 삭제.
    async fn delete_user(&self, id: i64) -> ApiResult<()>;
}
