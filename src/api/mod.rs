use crate::api::error::ApiError;
use crate::api::types::{
    ChartBundle, Comparison, ComparisonReport, Hotel, HotelId, HotelUpdate, Insight, NewHotel,
    ResponsePage, Statistics, TemporalAnalysis, WebhookStatus, WebhookTestResult,
};
use crate::environment::Environment;

pub(crate) mod client;
pub use client::HotelApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The HotelSat REST backend, as seen by the console.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HotelApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch every hotel.
    async fn list_hotels(&self) -> Result<Vec<Hotel>, ApiError>;

    /// Create a hotel; the server also provisions its Google Sheet.
    async fn create_hotel(&self, hotel: &NewHotel) -> Result<Hotel, ApiError>;

    /// Update the given fields of a hotel.
    async fn update_hotel(&self, id: HotelId, update: &HotelUpdate) -> Result<Hotel, ApiError>;

    /// Delete a hotel and all of its responses.
    async fn delete_hotel(&self, id: HotelId) -> Result<(), ApiError>;

    /// Satisfaction statistics of a hotel.
    async fn statistics(&self, id: HotelId) -> Result<Statistics, ApiError>;

    /// Server-generated advisory statements for a hotel.
    async fn insights(&self, id: HotelId) -> Result<Vec<Insight>, ApiError>;

    /// One page of survey responses, newest first. Pages start at 1.
    async fn responses(&self, id: HotelId, page: u32) -> Result<ResponsePage, ApiError>;

    /// Weekly average ratings over the last `period_days` days, with their trend.
    async fn temporal_analysis(
        &self,
        id: HotelId,
        period_days: u32,
    ) -> Result<TemporalAnalysis, ApiError>;

    /// Statistics of at least two hotels side by side.
    async fn compare_hotels(&self, ids: &[HotelId]) -> Result<Comparison, ApiError>;

    /// The same comparison plus a server-rendered bar chart.
    async fn comparison_report(&self, ids: &[HotelId]) -> Result<ComparisonReport, ApiError>;

    /// Server-rendered charts of a hotel.
    async fn charts(&self, id: HotelId) -> Result<ChartBundle, ApiError>;

    /// Excel workbook with every response of a hotel.
    async fn export_hotel_excel(&self, id: HotelId) -> Result<Vec<u8>, ApiError>;

    /// Excel workbook summarising every hotel.
    async fn export_global_excel(&self) -> Result<Vec<u8>, ApiError>;

    /// Ask the server to ingest a synthetic survey submission for a hotel.
    async fn test_webhook(&self, id: HotelId) -> Result<WebhookTestResult, ApiError>;

    /// Response counts per hotel, as recorded by the webhook receiver.
    async fn webhook_status(&self) -> Result<WebhookStatus, ApiError>;
}
