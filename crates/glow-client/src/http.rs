//! HTTP 백엔드 클라이언트.
//!
//! 모든 요청에 현재 세션 토큰을 Bearer 헤더로 붙입니다. 401 응답을 받으면
//! 세션을 폐기하고 [`ApiError::Unauthorized`]를 반환합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use glow_auth::SessionStore;
use glow_core::{
    ApiConfig, Product, ProductInput, ProductPatch, Sale, SaleDetail, SaleInput, User, UserInput,
    UserPatch,
};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ApiError, ApiResult, ConsoleApi, LoginRequest, LoginResponse};

/// 실패 응답 본문.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// AliceGlow HTTP 백엔드.
pub struct HttpApi {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpApi {
    /// 새 클라이언트 생성.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json");

        match self.session.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 요청을 보내고 상태 코드를 해석합니다.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Backend response");

        if status == StatusCode::UNAUTHORIZED {
            debug!("Received 401; clearing session");
            self.session.expire_from_server();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            let message = body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Request failed: {}", status.as_u16()));
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 본문이 없거나 무시해도 되는 응답 (204 포함).
    async fn empty(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.execute(builder).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.json(self.request(Method::GET, path)).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.json(self.request(method, path).json(body)).await
    }
}

#[async_trait]
impl ConsoleApi for HttpApi {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.send(Method::POST, "/auth/login", &LoginRequest { email, password })
            .await
    }

    async fn get_products(&self) -> ApiResult<Vec<Product>> {
        self.get("/products").await
    }

    async fn create_product(&self, input: &ProductInput) -> ApiResult<Product> {
        self.send(Method::POST, "/products", input).await
    }

    async fn update_product(&self, id: i64, patch: &ProductPatch) -> ApiResult<Product> {
        self.send(Method::PATCH, &format!("/products/{}", id), patch)
            .await
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.empty(self.request(Method::DELETE, &format!("/products/{}", id)))
            .await
    }

    async fn get_sales(&self) -> ApiResult<Vec<Sale>> {
        self.get("/sales").await
    }

    async fn get_sale(&self, id: i64) -> ApiResult<SaleDetail> {
        self.get(&format!("/sales/{}", id)).await
    }

    async fn create_sale(&self, input: &SaleInput) -> ApiResult<Sale> {
        self.send(Method::POST, "/sales", input).await
    }

    async fn cancel_sale(&self, id: i64) -> ApiResult<Sale> {
        self.json(self.request(Method::PATCH, &format!("/sales/{}/cancel", id)))
            .await
    }

    async fn get_users(&self) -> ApiResult<Vec<User>> {
        self.get("/users").await
    }

    async fn create_user(&self, input: &UserInput) -> ApiResult<User> {
        self.send(Method::POST, "/users", input).await
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> ApiResult<User> {
        self.send(Method::PUT, &format!("/users/{}", id), patch)
            .await
    }

    async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.empty(self.request(Method::DELETE, &format!("/users/{}", id)))
            .await
    }
}
