use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::Gateway;
use crate::model::{Holding, PositionBook, Profile};

/// HTTP client for the Friction Trading gateway.
pub struct FrictionGateway {
    base: Url,
    api: Client,
}

impl FrictionGateway {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            api: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid gateway path: {}", path))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .api
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("gateway rejected {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("malformed response from {}", url))
    }
}

/// Interpret a boolean-like gateway payload. The check-login endpoint has
/// answered with plain booleans as well as token-carrying objects such as
/// `{"access_token": "abc"}`, so both shapes must map onto the login flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => ["logged_in", "is_logged_in", "authenticated", "access_token"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(is_truthy)
            .unwrap_or_else(|| !map.is_empty()),
    }
}

#[async_trait]
impl Gateway for FrictionGateway {
    async fn login(&self) -> Result<String> {
        let url = self.endpoint("login")?;
        let response = self
            .api
            .post(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("gateway rejected {}", url))?;

        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("malformed response from {}", url))?;

        let redirect = body
            .get("url")
            .and_then(|v| v.as_str())
            .context("login response carries no redirect url")?;

        Ok(redirect.to_string())
    }

    async fn check_login(&self) -> Result<bool> {
        let body = self.get::<Value>("check-login").await?;
        Ok(is_truthy(&body))
    }

    async fn get_profile(&self) -> Result<Profile> {
        self.get("user/profile").await
    }

    async fn get_positions(&self) -> Result<PositionBook> {
        self.get("user/positions").await
    }

    async fn get_holdings(&self) -> Result<Vec<Holding>> {
        self.get("user/holdings").await
    }

    async fn watch_nifty50_option(&self) -> Result<()> {
        // acknowledgment payload is not consumed
        self.get::<Value>("watch-nifty50-option").await?;
        Ok(())
    }

    async fn ping(&self) -> Result<String> {
        let body = self.get::<Value>("ping").await?;
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .context("ping response carries no message")?;
        Ok(message.to_string())
    }
}
