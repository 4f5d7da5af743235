use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::config::ProductServiceConfig;

use super::error::{GatewayError, classify_response};
use super::retry::{RetryPolicy, with_retry};
use super::{ProductDetails, ProductGateway, render_path};

#[derive(Debug, Deserialize)]
struct StockCheckResponse {
    available: bool,
}

/// reqwest-backed client for the product-catalog service.
pub struct HttpProductGateway {
    client: reqwest::Client,
    config: ProductServiceConfig,
    retry: RetryPolicy,
}

impl HttpProductGateway {
    pub fn new(client: reqwest::Client, config: ProductServiceConfig, retry: RetryPolicy) -> Self {
        Self {
            client,
            config,
            retry,
        }
    }

    fn url(&self, template: &str, product_id: &Uuid) -> String {
        format!(
            "{}{}",
            self.config.base_url,
            render_path(template, product_id)
        )
    }

    async fn fetch_details(&self, product_id: &Uuid) -> Result<ProductDetails, GatewayError> {
        let url = self.url(&self.config.details_path, product_id);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(classify_response("product details", response).await);
        }
        Ok(response.json::<ProductDetails>().await?)
    }

    async fn fetch_stock(
        &self,
        product_id: &Uuid,
        quantity: i32,
    ) -> Result<bool, GatewayError> {
        let url = self.url(&self.config.stock_check_path, product_id);
        let response = self
            .client
            .get(&url)
            .query(&[("quantity", quantity)])
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // Unknown product during a stock check is a normal "no stock"
            // answer, not a failure.
            debug!(%product_id, "product not found during stock check, reporting unavailable");
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(classify_response("product stock check", response).await);
        }
        let body = response.json::<StockCheckResponse>().await?;
        Ok(body.available)
    }

    async fn put_stock(
        &self,
        context: &str,
        template: &str,
        product_id: &Uuid,
        quantity: i32,
    ) -> Result<(), GatewayError> {
        let url = self.url(template, product_id);
        let response = self
            .client
            .put(&url)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(classify_response(context, response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductGateway for HttpProductGateway {
    async fn details(&self, product_id: Uuid) -> Result<ProductDetails, GatewayError> {
        debug!(%product_id, "fetching product details");
        with_retry(&self.retry, "product_details", || {
            self.fetch_details(&product_id)
        })
        .await
    }

    async fn check_stock(&self, product_id: Uuid, quantity: i32) -> Result<bool, GatewayError> {
        debug!(%product_id, quantity, "checking product stock");
        with_retry(&self.retry, "stock_check", || {
            self.fetch_stock(&product_id, quantity)
        })
        .await
    }

    async fn decrease_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError> {
        debug!(%product_id, quantity, "decreasing product stock");
        with_retry(&self.retry, "stock_decrease", || {
            self.put_stock(
                "stock decrease",
                &self.config.stock_decrease_path,
                &product_id,
                quantity,
            )
        })
        .await
    }

    async fn increase_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError> {
        debug!(%product_id, quantity, "increasing product stock");
        with_retry(&self.retry, "stock_increase", || {
            self.put_stock(
                "stock increase",
                &self.config.stock_increase_path,
                &product_id,
                quantity,
            )
        })
        .await
    }
}
