//! HotelSat REST Client
//!
//! A reqwest client for the `/api` endpoints of the HotelSat backend.

use crate::api::HotelApi;
use crate::api::error::ApiError;
use crate::api::types::{
    ChartBundle, CompareRequest, Comparison, ComparisonReport, Hotel, HotelId, HotelUpdate,
    Insight, InsightsEnvelope, NewHotel, ResponsePage, Statistics, TemporalAnalysis,
    WebhookStatus, WebhookTestResult,
};
use crate::consts::cli_consts::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with the console version
const USER_AGENT: &str = concat!("hotelsat-admin/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HotelApiClient {
    client: Client,
    environment: Environment,
}

impl HotelApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.build_url(endpoint);
        log::debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::handle_response_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        Self::send_json(self.request(Method::GET, endpoint)).await
    }

    async fn send_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send_json(self.request(method, endpoint).json(body)).await
    }

    async fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.request(Method::GET, endpoint).send().await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait::async_trait]
impl HotelApi for HotelApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>, ApiError> {
        self.get_json("hotels").await
    }

    async fn create_hotel(&self, hotel: &NewHotel) -> Result<Hotel, ApiError> {
        self.send_body(Method::POST, "hotels", hotel).await
    }

    async fn update_hotel(&self, id: HotelId, update: &HotelUpdate) -> Result<Hotel, ApiError> {
        self.send_body(Method::PUT, &format!("hotels/{}", id), update)
            .await
    }

    async fn delete_hotel(&self, id: HotelId) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("hotels/{}", id))
            .send()
            .await?;
        Self::handle_response_status(response).await?;
        Ok(())
    }

    async fn statistics(&self, id: HotelId) -> Result<Statistics, ApiError> {
        self.get_json(&format!("hotels/{}/statistics", id)).await
    }

    async fn insights(&self, id: HotelId) -> Result<Vec<Insight>, ApiError> {
        let envelope: InsightsEnvelope = self.get_json(&format!("hotels/{}/insights", id)).await?;
        Ok(envelope.insights)
    }

    async fn responses(&self, id: HotelId, page: u32) -> Result<ResponsePage, ApiError> {
        self.get_json(&responses_endpoint(id, page)).await
    }

    async fn temporal_analysis(
        &self,
        id: HotelId,
        period_days: u32,
    ) -> Result<TemporalAnalysis, ApiError> {
        self.get_json(&temporal_endpoint(id, period_days)).await
    }

    async fn compare_hotels(&self, ids: &[HotelId]) -> Result<Comparison, ApiError> {
        self.send_body(Method::POST, "hotels/compare", &CompareRequest { hotel_ids: ids })
            .await
    }

    async fn comparison_report(&self, ids: &[HotelId]) -> Result<ComparisonReport, ApiError> {
        self.send_body(Method::POST, "reports/comparison", &CompareRequest { hotel_ids: ids })
            .await
    }

    async fn charts(&self, id: HotelId) -> Result<ChartBundle, ApiError> {
        self.get_json(&format!("reports/hotel/{}/charts", id)).await
    }

    async fn export_hotel_excel(&self, id: HotelId) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("reports/hotel/{}/excel", id)).await
    }

    async fn export_global_excel(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes("reports/global/excel").await
    }

    async fn test_webhook(&self, id: HotelId) -> Result<WebhookTestResult, ApiError> {
        Self::send_json(self.request(Method::POST, &webhook_test_endpoint(id))).await
    }

    async fn webhook_status(&self) -> Result<WebhookStatus, ApiError> {
        self.get_json("webhooks/status").await
    }
}

fn responses_endpoint(id: HotelId, page: u32) -> String {
    format!("hotels/{}/responses?page={}", id, page.max(1))
}

fn temporal_endpoint(id: HotelId, period_days: u32) -> String {
    format!("hotels/{}/temporal-analysis?period_days={}", id, period_days.max(1))
}

fn webhook_test_endpoint(id: HotelId) -> String {
    format!("webhooks/test?hotel_id={}", id)
}

#[cfg(test)]
/// These are ignored by default since they require a running HotelSat server.
mod live_server_tests {
    use crate::api::HotelApi;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live server on localhost:5000.
    /// Should list the hotels known to the server.
    async fn test_list_hotels() {
        let client = super::HotelApiClient::new(Environment::Local).unwrap();
        match client.list_hotels().await {
            Ok(hotels) => println!("Got {} hotels", hotels.len()),
            Err(e) => panic!("Failed to list hotels: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live server on localhost:5000.
    /// Should report webhook status.
    async fn test_webhook_status() {
        let client = super::HotelApiClient::new(Environment::Local).unwrap();
        match client.webhook_status().await {
            Ok(status) => println!("{} responses", status.total_responses),
            Err(e) => panic!("Failed to get webhook status: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_api_base() {
        let env: Environment = "https://sat.example.com/".parse().unwrap();
        let client = HotelApiClient::new(env).unwrap();
        assert_eq!(
            client.build_url("/hotels/3/statistics"),
            "https://sat.example.com/api/hotels/3/statistics"
        );
    }

    #[test]
    fn test_query_endpoints() {
        assert_eq!(responses_endpoint(7, 2), "hotels/7/responses?page=2");
        // Page numbers start at 1
        assert_eq!(responses_endpoint(7, 0), "hotels/7/responses?page=1");
        assert_eq!(webhook_test_endpoint(4), "webhooks/test?hotel_id=4");
        assert_eq!(
            temporal_endpoint(2, 90),
            "hotels/2/temporal-analysis?period_days=90"
        );
    }

    #[tokio::test]
    // A refused connection surfaces as a transport error, never a panic.
    async fn test_unreachable_server_is_transport_error() {
        let env: Environment = "http://127.0.0.1:9".parse().unwrap();
        let client = HotelApiClient::new(env).unwrap();
        let result = client.list_hotels().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
