use std::env;
use std::time::Duration;

use crate::gateway::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub user_service: UserServiceConfig,
    pub product_service: ProductServiceConfig,
    pub gateway_retry: RetryPolicy,
}

/// Outbound endpoints for the user-validation service. Path templates use
/// `{id}` as the placeholder for the user id.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub base_url: String,
    pub validate_path: String,
    pub details_path: String,
    pub bearer_token: String,
}

/// Outbound endpoints for the product-catalog service. Path templates use
/// `{id}` as the placeholder for the product id.
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    pub base_url: String,
    pub details_path: String,
    pub stock_check_path: String,
    pub stock_decrease_path: String,
    pub stock_increase_path: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let user_service = UserServiceConfig {
            base_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            validate_path: env::var("USER_SERVICE_VALIDATE_PATH")
                .unwrap_or_else(|_| "/api/users/{id}/validate".to_string()),
            details_path: env::var("USER_SERVICE_DETAILS_PATH")
                .unwrap_or_else(|_| "/api/users/{id}".to_string()),
            bearer_token: env::var("USER_SERVICE_TOKEN").unwrap_or_default(),
        };

        let product_service = ProductServiceConfig {
            base_url: env::var("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            details_path: env::var("PRODUCT_SERVICE_DETAILS_PATH")
                .unwrap_or_else(|_| "/api/products/{id}".to_string()),
            stock_check_path: env::var("PRODUCT_SERVICE_STOCK_CHECK_PATH")
                .unwrap_or_else(|_| "/api/products/{id}/stock".to_string()),
            stock_decrease_path: env::var("PRODUCT_SERVICE_STOCK_DECREASE_PATH")
                .unwrap_or_else(|_| "/api/products/{id}/stock/decrease".to_string()),
            stock_increase_path: env::var("PRODUCT_SERVICE_STOCK_INCREASE_PATH")
                .unwrap_or_else(|_| "/api/products/{id}/stock/increase".to_string()),
        };

        let gateway_retry = RetryPolicy {
            max_attempts: env::var("GATEWAY_RETRY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(3),
            delay: Duration::from_millis(
                env::var("GATEWAY_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(2000),
            ),
        };

        Ok(Self {
            database_url,
            host,
            port,
            user_service,
            product_service,
            gateway_retry,
        })
    }
}
