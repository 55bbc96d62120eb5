//! Reference API client boundary.
//!
//! [`CityGateway`] abstracts the HTTP calls the controller issues so
//! tests can drive the state machine with scripted outcomes.
//! [`HttpGateway`] is the production implementation over [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use pawhub_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Fallback message shown when a failure carries no structured payload.
pub const GENERIC_ERROR: &str = "An error occurred";

/// A city as returned by the Reference API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub country_id: DbId,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_count: i64,
}

/// A country entry from the selection list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRef {
    pub id: DbId,
    pub name: String,
}

/// Request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPayload {
    pub name: String,
    pub slug: String,
    pub country_id: DbId,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Errors from the Reference API boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the operation with a human-readable message.
    #[error("{0}")]
    Rejected(String),
}

impl GatewayError {
    /// The message to surface to the user. Rejections are shown
    /// verbatim; transport failures collapse to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected(msg) => msg.clone(),
            GatewayError::Transport(_) => GENERIC_ERROR.to_string(),
        }
    }
}

/// The mutation surface of the Reference API, as seen by the admin
/// controller.
#[async_trait]
pub trait CityGateway: Send + Sync {
    async fn create_city(&self, payload: &CityPayload) -> Result<CityRecord, GatewayError>;
    async fn update_city(&self, id: DbId, payload: &CityPayload)
        -> Result<CityRecord, GatewayError>;
    async fn delete_city(&self, id: DbId) -> Result<(), GatewayError>;
}

/// Envelope the API wraps single-city responses in.
#[derive(Debug, Deserialize)]
struct CityEnvelope {
    city: CityRecord,
}

/// Envelope for the city list.
#[derive(Debug, Deserialize)]
struct CitiesEnvelope {
    cities: Vec<CityRecord>,
}

/// Envelope for the country list.
#[derive(Debug, Deserialize)]
struct CountriesEnvelope {
    countries: Vec<CountryRef>,
}

/// Structured error payload returned on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the Reference API.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given server.
    ///
    /// * `base_url` - e.g. `http://localhost:3000`.
    ///
    /// A client-level timeout bounds every request so a hung server
    /// cannot leave a dialog loading forever.
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch the current city list (the controller's initial snapshot).
    pub async fn list_cities(&self) -> Result<Vec<CityRecord>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/api/admin/cities", self.base_url))
            .send()
            .await?;
        let envelope: CitiesEnvelope = Self::parse_response(response).await?;
        Ok(envelope.cities)
    }

    /// Fetch the country list used to populate the selection control.
    pub async fn list_countries(&self) -> Result<Vec<CountryRef>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/api/admin/countries", self.base_url))
            .send()
            .await?;
        let envelope: CountriesEnvelope = Self::parse_response(response).await?;
        Ok(envelope.countries)
    }

    /// Convert a response into the expected payload, or into a
    /// [`GatewayError::Rejected`] carrying the server's message.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Check a response that carries no body on success (delete).
    async fn check_response(response: reqwest::Response) -> Result<(), GatewayError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Extract the server's message from a non-2xx response, falling
    /// back to [`GENERIC_ERROR`] when the body has no `error` field.
    async fn rejection(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => GENERIC_ERROR.to_string(),
        };
        tracing::warn!(%status, message = %message, "Reference API rejected request");
        GatewayError::Rejected(message)
    }
}

#[async_trait]
impl CityGateway for HttpGateway {
    async fn create_city(&self, payload: &CityPayload) -> Result<CityRecord, GatewayError> {
        let response = self
            .client
            .post(format!("{}/api/admin/cities", self.base_url))
            .json(payload)
            .send()
            .await?;
        let envelope: CityEnvelope = Self::parse_response(response).await?;
        Ok(envelope.city)
    }

    async fn update_city(
        &self,
        id: DbId,
        payload: &CityPayload,
    ) -> Result<CityRecord, GatewayError> {
        let response = self
            .client
            .put(format!("{}/api/admin/cities/{id}", self.base_url))
            .json(payload)
            .send()
            .await?;
        let envelope: CityEnvelope = Self::parse_response(response).await?;
        Ok(envelope.city)
    }

    async fn delete_city(&self, id: DbId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(format!("{}/api/admin/cities/{id}", self.base_url))
            .send()
            .await?;
        Self::check_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn rejection_surfaces_server_message_verbatim() {
        let err = HttpGateway::rejection(response(409, r#"{"error":"Slug already exists"}"#)).await;
        assert_eq!(err.user_message(), "Slug already exists");
    }

    #[tokio::test]
    async fn rejection_without_structured_body_falls_back() {
        let err = HttpGateway::rejection(response(500, "<html>gateway timeout</html>")).await;
        assert_eq!(err.user_message(), GENERIC_ERROR);
    }

    #[tokio::test]
    async fn parse_response_decodes_success_envelope() {
        let body = r#"{"city":{"id":7,"name":"Utrecht","slug":"utrecht","countryId":1,"lat":null,"lng":null,"placeCount":0}}"#;
        let envelope: CityEnvelope = HttpGateway::parse_response(response(200, body))
            .await
            .unwrap();
        assert_eq!(envelope.city.id, 7);
        assert_eq!(envelope.city.slug, "utrecht");
    }

    #[tokio::test]
    async fn parse_response_rejects_non_success_status() {
        let outcome: Result<CityEnvelope, _> =
            HttpGateway::parse_response(response(404, r#"{"error":"City with id 7 not found"}"#))
                .await;
        match outcome {
            Err(GatewayError::Rejected(msg)) => assert_eq!(msg, "City with id 7 not found"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
