//! Payloads exchanged with the HotelSat REST backend.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type HotelId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tally_form_url: Option<String>,
    #[serde(default)]
    pub google_sheet_url: Option<String>,
}

/// Body of `POST /hotels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewHotel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally_form_url: Option<String>,
}

/// Body of `PUT /hotels/{id}`. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HotelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally_form_url: Option<String>,
}

/// Per-category averages in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAverages(Vec<(String, f64)>);

impl CategoryAverages {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CategoryAverages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Categories without any rating come back as null and are skipped
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::new(
            map.into_iter()
                .filter_map(|(key, value)| value.as_f64().map(|avg| (key, avg)))
                .collect(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_responses: u64,
    #[serde(default)]
    pub average_overall_rating: f64,
    #[serde(default)]
    pub recommendation_rate: f64,
    #[serde(default)]
    pub monthly_responses: u64,
    #[serde(default)]
    pub category_averages: CategoryAverages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Info,
    Improvement,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightsEnvelope {
    pub insights: Vec<Insight>,
}

/// Whether a guest would recommend the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Yes,
    No,
    Unknown,
}

impl From<Option<bool>> for Recommendation {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Recommendation::Yes,
            Some(false) => Recommendation::No,
            None => Recommendation::Unknown,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "Oui"),
            Recommendation::No => write!(f, "Non"),
            Recommendation::Unknown => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurveyResponse {
    pub id: i64,
    #[serde(default)]
    pub submission_date: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default)]
    pub would_recommend: Option<bool>,
}

impl SurveyResponse {
    pub fn recommendation(&self) -> Recommendation {
        self.would_recommend.into()
    }
}

/// One page of `GET /hotels/{id}/responses`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponsePage {
    pub responses: Vec<SurveyResponse>,
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
}

/// Server-rendered PNG charts, base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Charts {
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub distribution: Option<String>,
    #[serde(default)]
    pub temporal: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Categories,
    Distribution,
    Temporal,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Categories => "Notes par Catégorie",
            ChartKind::Distribution => "Distribution des Notes",
            ChartKind::Temporal => "Évolution Temporelle",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Categories => "categories",
            ChartKind::Distribution => "distribution",
            ChartKind::Temporal => "temporal",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartBundle {
    pub charts: Charts,
    #[serde(default)]
    pub hotel_name: Option<String>,
}

impl ChartBundle {
    /// The encoded images present in the bundle, in display order.
    pub fn images(&self) -> Vec<(ChartKind, &str)> {
        [
            (ChartKind::Categories, &self.charts.categories),
            (ChartKind::Distribution, &self.charts.distribution),
            (ChartKind::Temporal, &self.charts.temporal),
        ]
        .into_iter()
        .filter_map(|(kind, data)| data.as_deref().map(|d| (kind, d)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookTestResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HotelResponseCount {
    pub hotel_name: String,
    pub response_count: u64,
}

/// Payload of `GET /webhooks/status`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookStatus {
    pub total_hotels: u64,
    pub total_responses: u64,
    #[serde(default)]
    pub hotels_data: Vec<HotelResponseCount>,
}

/// Statistics of several hotels keyed by hotel name, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison(Vec<(String, Statistics)>);

impl Comparison {
    pub fn new(entries: Vec<(String, Statistics)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Statistics)> {
        self.0.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Comparison {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Hotels whose statistics failed come back as null
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            if value.is_null() {
                continue;
            }
            let stats = Statistics::deserialize(value).map_err(D::Error::custom)?;
            entries.push((name, stats));
        }
        Ok(Self::new(entries))
    }
}

/// Payload of `POST /reports/comparison`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComparisonReport {
    #[serde(default)]
    pub comparison_data: Comparison,
    /// PNG grouped bar chart, base64 encoded.
    pub comparison_chart: String,
}

/// Body of both comparison endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct CompareRequest<'a> {
    pub hotel_ids: &'a [HotelId],
}

/// Direction of the weekly average over the analysed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "En amélioration"),
            Trend::Declining => write!(f, "En baisse"),
            Trend::Stable => write!(f, "Stable"),
            Trend::InsufficientData => write!(f, "Données insuffisantes"),
            Trend::Unknown => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeeklyRating {
    /// Monday of the week, `YYYY-MM-DD`.
    pub week: String,
    pub average_rating: f64,
    #[serde(default)]
    pub response_count: u64,
}

/// Payload of `GET /hotels/{id}/temporal-analysis`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemporalAnalysis {
    #[serde(default)]
    pub data: Vec<WeeklyRating>,
    pub trend: Trend,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Category order must follow the server payload, not key order.
    fn test_category_averages_keep_server_order() {
        let stats: Statistics = serde_json::from_str(
            r#"{
                "total_responses": 12,
                "average_overall_rating": 4.1,
                "recommendation_rate": 83.3,
                "monthly_responses": 3,
                "category_averages": {"value_rating": 3.1, "accommodation_rating": 4.2, "food_rating": null}
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = stats.category_averages.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["value_rating", "accommodation_rating"]);
        assert_eq!(stats.total_responses, 12);
    }

    #[test]
    fn test_statistics_for_hotel_without_responses() {
        let stats: Statistics = serde_json::from_str(
            r#"{"total_responses": 0, "average_overall_rating": 0, "recommendation_rate": 0,
                "category_averages": {}, "monthly_responses": 0}"#,
        )
        .unwrap();
        assert!(stats.category_averages.is_empty());
    }

    #[test]
    fn test_recommendation_is_tri_state() {
        let page: ResponsePage = serde_json::from_str(
            r#"{"responses": [
                {"id": 1, "would_recommend": true},
                {"id": 2, "would_recommend": false},
                {"id": 3, "would_recommend": null},
                {"id": 4}
            ], "total": 4, "pages": 1, "current_page": 1}"#,
        )
        .unwrap();

        let recs: Vec<Recommendation> = page.responses.iter().map(|r| r.recommendation()).collect();
        assert_eq!(
            recs,
            vec![
                Recommendation::Yes,
                Recommendation::No,
                Recommendation::Unknown,
                Recommendation::Unknown
            ]
        );
    }

    #[test]
    fn test_unknown_insight_kind_is_tolerated() {
        let envelope: InsightsEnvelope = serde_json::from_str(
            r#"{"insights": [
                {"type": "warning", "title": "Propreté", "description": "En baisse"},
                {"type": "celebration", "title": "Bravo"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(envelope.insights[0].kind, InsightKind::Warning);
        assert_eq!(envelope.insights[1].kind, InsightKind::Other);
        assert_eq!(envelope.insights[1].description, "");
    }

    #[test]
    fn test_chart_bundle_lists_present_images() {
        let bundle: ChartBundle = serde_json::from_str(
            r#"{"charts": {"categories": "AAA", "temporal": "BBB"}, "hotel_name": "Le Phare"}"#,
        )
        .unwrap();
        let kinds: Vec<ChartKind> = bundle.images().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ChartKind::Categories, ChartKind::Temporal]);
    }

    #[test]
    // Hotels keep the server's order; a hotel without statistics is skipped.
    fn test_comparison_keeps_hotel_order() {
        let report: ComparisonReport = serde_json::from_str(
            r#"{"comparison_data": {
                    "Villa Azur": {"total_responses": 4, "average_overall_rating": 4.5,
                                   "recommendation_rate": 100, "monthly_responses": 1,
                                   "category_averages": {"service_rating": 4.8}},
                    "Le Phare": {"total_responses": 9, "average_overall_rating": 3.2,
                                 "recommendation_rate": 55.6, "monthly_responses": 2,
                                 "category_averages": {}},
                    "Les Pins": null
                },
                "comparison_chart": "iVBORw0KGgo="}"#,
        )
        .unwrap();

        let names: Vec<&str> = report.comparison_data.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Villa Azur", "Le Phare"]);
        let (_, phare) = report.comparison_data.iter().nth(1).unwrap();
        assert_eq!(phare.total_responses, 9);
    }

    #[test]
    fn test_temporal_analysis_trends() {
        let analysis: TemporalAnalysis = serde_json::from_str(
            r#"{"data": [{"week": "2026-03-02", "average_rating": 3.5, "response_count": 4},
                         {"week": "2026-03-09", "average_rating": 4.1, "response_count": 6}],
                "trend": "improving"}"#,
        )
        .unwrap();
        assert_eq!(analysis.trend, Trend::Improving);
        assert_eq!(analysis.data[1].response_count, 6);

        let empty: TemporalAnalysis =
            serde_json::from_str(r#"{"data": [], "trend": "insufficient_data"}"#).unwrap();
        assert_eq!(empty.trend.to_string(), "Données insuffisantes");
        let odd: TemporalAnalysis = serde_json::from_str(r#"{"trend": "volatile"}"#).unwrap();
        assert_eq!(odd.trend, Trend::Unknown);
    }

    #[test]
    fn test_compare_request_body() {
        let body = CompareRequest { hotel_ids: &[3, 5] };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"hotel_ids":[3,5]}"#);
    }

    #[test]
    // Optional fields left empty must not be sent at all.
    fn test_hotel_update_skips_absent_fields() {
        let update = HotelUpdate {
            tally_form_url: Some("https://tally.so/r/abc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"tally_form_url":"https://tally.so/r/abc"}"#
        );
    }
}
