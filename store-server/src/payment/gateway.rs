//! Payment gateway HTTP client
//!
//! Thin reqwest wrapper around the provider's Snap transaction endpoint.
//! Authentication is HTTP Basic with the server key as username and an empty
//! password. The provider's response body is passed through to our caller
//! verbatim; we never re-shape it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::Value;
use shared::{AppError, AppResult, ErrorCode};
use std::time::Duration;

/// Customer identity forwarded to the gateway alongside a charge
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct CreditCard {
    secure: bool,
}

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: &'a CustomerDetails,
    credit_card: CreditCard,
}

/// Payment gateway client
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl GatewayClient {
    /// Create a client with a per-request timeout
    pub fn new(base_url: &str, server_key: &str, timeout_ms: u64) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        // Basic auth: "<server_key>:" base64-encoded, password empty
        let auth_header = format!("Basic {}", BASE64.encode(format!("{server_key}:")));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// Create a Snap transaction for an order.
    ///
    /// Returns the provider's JSON (token + redirect URL) untouched. Timeouts
    /// map to `GatewayTimeout`, everything else network-shaped to
    /// `GatewayError`.
    pub async fn charge(
        &self,
        transaction_id: &str,
        gross_amount: i64,
        customer: &CustomerDetails,
    ) -> AppResult<Value> {
        let url = format!("{}/snap/v1/transactions", self.base_url);
        let body = ChargeRequest {
            transaction_details: TransactionDetails {
                order_id: transaction_id,
                gross_amount,
            },
            customer_details: customer,
            credit_card: CreditCard { secure: true },
        };

        let response = self
            .http
            .post(&url)
            .header(http::header::AUTHORIZATION, self.auth_header.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::with_message(
                        ErrorCode::GatewayTimeout,
                        format!("Payment gateway timed out for {transaction_id}"),
                    )
                } else {
                    AppError::gateway(format!("Payment gateway request failed: {e}"))
                }
            })?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::gateway(format!("Invalid gateway response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%transaction_id, %status, "Gateway rejected charge");
            return Err(
                AppError::gateway(format!("Gateway returned {status}"))
                    .with_detail("response", payload),
            );
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_is_basic_with_empty_password() {
        let client = GatewayClient::new("https://api.example.test/", "SB-key", 1000)
            .expect("client should build");
        // "SB-key:" -> U0Ita2V5Og==
        assert_eq!(client.auth_header, "Basic U0Ita2V5Og==");
        assert_eq!(client.base_url, "https://api.example.test");
    }
}
