//! Per-section view state
//!
//! What each section currently shows. Renderers only read these; the
//! controller writes them when an `Update` is applied.

use crate::api::types::{
    CategoryAverages, Comparison, Hotel, HotelId, Insight, ResponsePage, Statistics,
    WebhookStatus, WebhookTestResult,
};
use crate::consts::cli_consts::MAX_RATING;
use crate::export::SavedCharts;
use crate::forms::AutomationForm;
use std::path::PathBuf;

/// Lifecycle of a section's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Nothing selected: show the placeholder, no request was made.
    Empty,
    Loading,
    Ready(T),
    /// Inline error text.
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Empty
    }
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Display label of a rating category; unknown keys are shown as-is.
pub fn category_label(key: &str) -> &str {
    match key {
        "accommodation_rating" => "Hébergement",
        "service_rating" => "Service",
        "cleanliness_rating" => "Propreté",
        "food_rating" => "Restauration",
        "location_rating" => "Emplacement",
        "value_rating" => "Qualité-prix",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    /// Always within `0..=MAX_RATING`.
    pub value: f64,
}

/// Bar chart of the category averages.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub bars: Vec<Bar>,
}

impl CategoryChart {
    pub fn from_averages(averages: &CategoryAverages) -> Self {
        let bars = averages
            .iter()
            .map(|(key, value)| Bar {
                label: category_label(key).to_string(),
                value: if value.is_finite() {
                    value.clamp(0.0, MAX_RATING)
                } else {
                    0.0
                },
            })
            .collect();
        Self { bars }
    }

    pub fn max(&self) -> f64 {
        MAX_RATING
    }
}

/// Holds at most one chart. A new chart is only installed after the previous
/// one has been released.
#[derive(Debug, Default)]
pub struct ChartSlot {
    chart: Option<CategoryChart>,
    releases: u64,
}

impl ChartSlot {
    pub fn install(&mut self, chart: CategoryChart) {
        self.release();
        self.chart = Some(chart);
    }

    pub fn release(&mut self) {
        if self.chart.take().is_some() {
            self.releases += 1;
            log::trace!("Released dashboard chart ({} so far)", self.releases);
        }
    }

    pub fn chart(&self) -> Option<&CategoryChart> {
        self.chart.as_ref()
    }

    #[cfg(test)]
    pub fn releases(&self) -> u64 {
        self.releases
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub hotel: String,
    pub total_responses: u64,
    pub average: f64,
    pub recommendation_rate: f64,
    /// Aligned with [`ComparisonTable::categories`]; `None` where the hotel has no rating.
    pub scores: Vec<Option<f64>>,
}

/// Hotels side by side: one row per hotel, one column per rated category.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    /// Category keys in the order they first appear.
    pub categories: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for (_, stats) in comparison.iter() {
            for (key, _) in stats.category_averages.iter() {
                if !categories.iter().any(|c| c == key) {
                    categories.push(key.to_string());
                }
            }
        }

        let rows = comparison
            .iter()
            .map(|(hotel, stats)| ComparisonRow {
                hotel: hotel.to_string(),
                total_responses: stats.total_responses,
                average: stats.average_overall_rating,
                recommendation_rate: stats.recommendation_rate,
                scores: categories
                    .iter()
                    .map(|key| {
                        stats
                            .category_averages
                            .iter()
                            .find(|(k, _)| k == key)
                            .map(|(_, v)| v)
                    })
                    .collect(),
            })
            .collect();
        Self { categories, rows }
    }

    /// The hotel with the best average among those with responses. Ties go to the first.
    pub fn leader(&self) -> Option<&str> {
        self.rows
            .iter()
            .filter(|row| row.total_responses > 0)
            .fold(None, |best: Option<&ComparisonRow>, row| match best {
                Some(b) if b.average >= row.average => Some(b),
                _ => Some(row),
            })
            .map(|row| row.hotel.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub statistics: Statistics,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub state: ViewState<DashboardData>,
    pub chart: ChartSlot,
}

impl DashboardView {
    pub fn show(&mut self, data: DashboardData) {
        self.chart
            .install(CategoryChart::from_averages(&data.statistics.category_averages));
        self.state = ViewState::Ready(data);
    }

    /// Switch to a non-ready state and drop the chart.
    pub fn set(&mut self, state: ViewState<DashboardData>) {
        self.chart.release();
        self.state = state;
    }
}

/// One row of the hotels table, with the placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelRow {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub form: String,
    pub sheet: String,
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

impl From<&Hotel> for HotelRow {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            location: or_placeholder(hotel.location.as_deref(), "-"),
            form: or_placeholder(hotel.tally_form_url.as_deref(), "Non configuré"),
            sheet: or_placeholder(hotel.google_sheet_url.as_deref(), "Non créé"),
        }
    }
}

#[derive(Debug, Default)]
pub struct HotelsView {
    pub rows: Vec<HotelRow>,
    pub selected: usize,
}

impl HotelsView {
    /// Rebuild the table from the cached list, keeping the cursor in range.
    pub fn rebuild(&mut self, hotels: &[Hotel]) {
        self.rows = hotels.iter().map(HotelRow::from).collect();
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn selected_row(&self) -> Option<&HotelRow> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub active: bool,
}

/// Links to every page, or none when everything fits on one page.
pub fn page_links(page: &ResponsePage) -> Vec<PageLink> {
    if page.pages <= 1 {
        return Vec::new();
    }
    (1..=page.pages)
        .map(|number| PageLink {
            number,
            active: number == page.current_page,
        })
        .collect()
}

/// "Affichage de X réponses sur TOTAL", or `None` when the hotel has no response.
///
/// A page past the last one still gets a summary: the responses exist elsewhere.
pub fn responses_summary(page: &ResponsePage) -> Option<String> {
    if page.responses.is_empty() && page.total == 0 {
        return None;
    }
    Some(format!(
        "Affichage de {} réponses sur {}",
        page.responses.len(),
        page.total
    ))
}

#[derive(Debug)]
pub struct ResponsesView {
    /// Page requested by the last load, starting at 1.
    pub page: u32,
    pub state: ViewState<ResponsePage>,
    /// Digits typed after `g`, while a page number is being entered.
    pub jump_input: Option<String>,
}

impl Default for ResponsesView {
    fn default() -> Self {
        Self {
            page: 1,
            state: ViewState::Empty,
            jump_input: None,
        }
    }
}

impl ResponsesView {
    pub fn links(&self) -> Vec<PageLink> {
        self.state.ready().map(page_links).unwrap_or_default()
    }

    /// The page a step of `delta` leads to, if it exists.
    ///
    /// From a page past the last one, a step back lands on the last page.
    pub fn step(&self, delta: i64) -> Option<u32> {
        let page = self.state.ready()?;
        let last = i64::from(page.pages);
        let current = i64::from(page.current_page).min(last + 1);
        let target = current + delta;
        (1..=last).contains(&target).then_some(target as u32)
    }

    /// `number` if the loaded page set has it.
    pub fn jump(&self, number: u32) -> Option<u32> {
        let page = self.state.ready()?;
        (1..=page.pages).contains(&number).then_some(number)
    }

    pub fn start_jump(&mut self) {
        self.jump_input = Some(String::new());
    }

    /// Append a digit to the page number being typed. Other characters are ignored.
    pub fn push_jump_digit(&mut self, c: char) {
        if let Some(input) = self.jump_input.as_mut() {
            if c.is_ascii_digit() && input.len() < 6 {
                input.push(c);
            }
        }
    }

    /// Stop entering a page number and return it, if one was typed.
    pub fn take_jump(&mut self) -> Option<u32> {
        self.jump_input.take()?.parse().ok()
    }
}

#[derive(Debug, Default)]
pub struct AnalyticsView {
    pub state: ViewState<SavedCharts>,
}

#[derive(Debug, Default)]
pub struct ReportsView {
    pub last_export: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct AutomationView {
    pub form: AutomationForm,
    /// Keystrokes go to the URL field.
    pub editing: bool,
    pub status: ViewState<WebhookStatus>,
    pub last_test: Option<WebhookTestResult>,
}

/// Everything the sections display.
#[derive(Debug, Default)]
pub struct Views {
    pub dashboard: DashboardView,
    pub hotels: HotelsView,
    pub responses: ResponsesView,
    pub analytics: AnalyticsView,
    pub reports: ReportsView,
    pub automation: AutomationView,
}
