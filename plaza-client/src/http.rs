//! REST client for the Plaza service
//!
//! `PlazaApi` is the seam between the engine and the network: the engine
//! only ever talks to the trait, so tests run against an in-process mock.
//! `NetworkClient` is the production implementation over reqwest.

use crate::config::ClientConfig;
use crate::error::{EngineError, EngineResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::models::{
    Discount, DiscountCreate, DiscountUpdate, Order, OrderStatus, PaymentStatus,
    VerifyArrivalResponse,
};

/// Operations consumed from the external persistence/service collaborator
///
/// All methods are side-effect-free with respect to the engine's in-memory
/// state; callers decide when to feed results into the order store.
#[async_trait]
pub trait PlazaApi: Send + Sync {
    /// `GET /orders?business_id=...` - full ordered list, most recent first
    async fn fetch_orders(&self, business_id: &str) -> EngineResult<Vec<Order>>;

    /// `PATCH /orders/{id}/status` - idempotent per `(order_id, status)`
    async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> EngineResult<Order>;

    /// `PATCH /orders/{id}/payment_status` - no transition constraints
    async fn set_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> EngineResult<Order>;

    /// `POST /orders/verify_arrival`
    async fn verify_arrival(
        &self,
        business_id: &str,
        code: &str,
    ) -> EngineResult<VerifyArrivalResponse>;

    /// `GET /discounts?business_id=...`
    async fn list_discounts(&self, business_id: &str) -> EngineResult<Vec<Discount>>;

    /// `POST /discounts`
    async fn create_discount(&self, payload: &DiscountCreate) -> EngineResult<Discount>;

    /// `PATCH /discounts/{id}`
    async fn update_discount(
        &self,
        discount_id: &str,
        payload: &DiscountUpdate,
    ) -> EngineResult<Discount>;
}

/// HTTP network client
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkClient {
    /// Create a network client from configuration
    pub fn new(config: &ClientConfig) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header("X-Request-Id", uuid::Uuid::new_v4().to_string());
        if let Some(token) = &self.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> EngineResult<T> {
        let response = req.send().await?;
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.is_success() {
            return Err(EngineError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        envelope
            .data
            .ok_or_else(|| EngineError::InvalidResponse("missing data field".to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> EngineResult<T> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> EngineResult<T> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> EngineResult<T> {
        self.send(self.request(reqwest::Method::PATCH, path).json(body))
            .await
    }
}

#[async_trait]
impl PlazaApi for NetworkClient {
    async fn fetch_orders(&self, business_id: &str) -> EngineResult<Vec<Order>> {
        self.get(&format!("/orders?business_id={}", business_id))
            .await
    }

    async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> EngineResult<Order> {
        self.patch(
            &format!("/orders/{}/status", order_id),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn set_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> EngineResult<Order> {
        self.patch(
            &format!("/orders/{}/payment_status", order_id),
            &serde_json::json!({ "payment_status": payment_status }),
        )
        .await
    }

    async fn verify_arrival(
        &self,
        business_id: &str,
        code: &str,
    ) -> EngineResult<VerifyArrivalResponse> {
        self.post(
            "/orders/verify_arrival",
            &serde_json::json!({ "business_id": business_id, "code": code }),
        )
        .await
    }

    async fn list_discounts(&self, business_id: &str) -> EngineResult<Vec<Discount>> {
        self.get(&format!("/discounts?business_id={}", business_id))
            .await
    }

    async fn create_discount(&self, payload: &DiscountCreate) -> EngineResult<Discount> {
        self.post("/discounts", payload).await
    }

    async fn update_discount(
        &self,
        discount_id: &str,
        payload: &DiscountUpdate,
    ) -> EngineResult<Discount> {
        self.patch(&format!("/discounts/{}", discount_id), payload)
            .await
    }
}
