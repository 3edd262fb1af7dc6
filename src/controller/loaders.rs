//! Section loaders
//!
//! Each load gets a fresh ticket. Starting a load cancels the previous one of
//! the same kind, and a result whose ticket is no longer current is dropped.

use super::Controller;
use super::view::{DashboardData, ViewState};
use crate::api::error::ApiError;
use crate::api::types::{Hotel, ResponsePage, WebhookStatus};
use crate::events::{LoadKind, Ticket, Update};
use crate::export::{self, ExportError, SavedCharts};
use crate::notifications::Severity;
use crate::registry::SelectorId;
use std::collections::HashMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct LoadSlot {
    generation: u64,
    /// Present while a load is running.
    token: Option<CancellationToken>,
}

/// Current ticket and cancellation handle of every kind of load.
#[derive(Debug, Default)]
pub struct LoadTracker {
    slots: HashMap<LoadKind, LoadSlot>,
}

impl LoadTracker {
    /// Cancel the running load of `kind`, if any, and hand out the next ticket.
    pub fn begin(&mut self, kind: LoadKind) -> (Ticket, CancellationToken) {
        let slot = self.slots.entry(kind).or_default();
        if let Some(previous) = slot.token.take() {
            previous.cancel();
        }
        slot.generation += 1;
        let token = CancellationToken::new();
        slot.token = Some(token.clone());
        (Ticket(slot.generation), token)
    }

    /// Cancel the running load of `kind` without starting another.
    pub fn cancel(&mut self, kind: LoadKind) {
        let slot = self.slots.entry(kind).or_default();
        if let Some(token) = slot.token.take() {
            token.cancel();
            slot.generation += 1;
        }
    }

    /// Accept a result. Returns false when `ticket` is stale.
    pub fn finish(&mut self, kind: LoadKind, ticket: Ticket) -> bool {
        match self.slots.get_mut(&kind) {
            Some(slot) if slot.generation == ticket.0 && slot.token.is_some() => {
                slot.token = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self, kind: LoadKind) -> Ticket {
        Ticket(self.slots.get(&kind).map(|s| s.generation).unwrap_or(0))
    }

    pub fn is_pending(&self, kind: LoadKind) -> bool {
        self.slots
            .get(&kind)
            .is_some_and(|slot| slot.token.is_some())
    }
}

impl Controller {
    /// Run `fetch` in the background and send its result back as an update.
    fn spawn_load<R, Fut>(&mut self, kind: LoadKind, fetch: Fut, wrap: fn(Ticket, R) -> Update)
    where
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
    {
        let (ticket, token) = self.loads.begin(kind);
        let sender = self.updates.clone();
        log::debug!("Starting {} load #{}", kind, ticket.0);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    log::debug!("{} load #{} cancelled", kind, ticket.0);
                }
                result = fetch => {
                    if sender.send(wrap(ticket, result)).await.is_err() {
                        log::debug!("UI loop gone, dropping {} load #{}", kind, ticket.0);
                    }
                }
            }
        });
    }

    pub(super) fn log_api_error(&self, context: &str, error: &ApiError) {
        let level = self.classifier.classify_api_error(error);
        log::log!(log::Level::from(level), "{}: {}", context, error);
    }

    /// Refetch the hotel list; selectors and table follow on success.
    pub fn refresh_hotels(&mut self) {
        let api = self.api.clone();
        self.spawn_load(
            LoadKind::Hotels,
            async move { api.list_hotels().await },
            |ticket, result| Update::HotelsLoaded { ticket, result },
        );
    }

    pub(super) fn apply_hotels(&mut self, result: Result<Vec<Hotel>, ApiError>) {
        let watched = [
            SelectorId::Dashboard,
            SelectorId::Responses,
            SelectorId::Analytics,
        ];
        let before: Vec<_> = watched
            .iter()
            .map(|id| self.registry.selected(*id))
            .collect();

        match self.registry.apply_fetch(result) {
            Ok(count) => {
                log::info!("Loaded {} hotels", count);
                self.views.hotels.rebuild(self.registry.hotels());
                for (id, was) in watched.iter().zip(before) {
                    if was.is_some() && self.registry.selected(*id).is_none() {
                        self.on_selection_changed(*id);
                    }
                }
            }
            Err(e) => {
                self.log_api_error("Failed to load hotels", &e);
                self.notify(Severity::Danger, "Erreur lors du chargement des hôtels");
            }
        }
    }

    /// Statistics then insights of the hotel picked in the dashboard selector.
    pub fn load_dashboard(&mut self) {
        let Some(id) = self.registry.selected(SelectorId::Dashboard) else {
            self.loads.cancel(LoadKind::Dashboard);
            self.views.dashboard.set(ViewState::Empty);
            return;
        };
        self.views.dashboard.set(ViewState::Loading);
        let api = self.api.clone();
        self.spawn_load(
            LoadKind::Dashboard,
            async move {
                let statistics = api.statistics(id).await?;
                let insights = api.insights(id).await?;
                Ok::<_, ApiError>(DashboardData {
                    statistics,
                    insights,
                })
            },
            |ticket, result| Update::DashboardLoaded { ticket, result },
        );
    }

    pub(super) fn apply_dashboard(&mut self, result: Result<DashboardData, ApiError>) {
        match result {
            Ok(data) => self.views.dashboard.show(data),
            Err(e) => {
                self.log_api_error("Failed to load statistics", &e);
                let message = e
                    .user_message("Erreur lors du chargement des statistiques")
                    .to_string();
                self.views.dashboard.set(ViewState::Failed(message));
            }
        }
    }

    /// One page of responses of the hotel picked in the responses selector.
    pub fn load_responses(&mut self, page: u32) {
        let page = page.max(1);
        self.views.responses.page = page;
        let Some(id) = self.registry.selected(SelectorId::Responses) else {
            self.loads.cancel(LoadKind::Responses);
            self.views.responses.state = ViewState::Empty;
            return;
        };
        self.views.responses.state = ViewState::Loading;
        let api = self.api.clone();
        self.spawn_load(
            LoadKind::Responses,
            async move { api.responses(id, page).await },
            |ticket, result| Update::ResponsesLoaded { ticket, result },
        );
    }

    /// Move `delta` pages from the one shown, if that page exists.
    pub fn step_responses(&mut self, delta: i64) {
        if let Some(page) = self.views.responses.step(delta) {
            self.load_responses(page);
        }
    }

    /// Load page `number` if the loaded page set has it.
    pub fn jump_to_page(&mut self, number: u32) {
        match self.views.responses.jump(number) {
            Some(page) => self.load_responses(page),
            None => self.notify(
                Severity::Warning,
                format!("La page {} n'existe pas", number),
            ),
        }
    }

    pub(super) fn apply_responses(&mut self, result: Result<ResponsePage, ApiError>) {
        self.views.responses.state = match result {
            Ok(page) => ViewState::Ready(page),
            Err(e) => {
                self.log_api_error("Failed to load responses", &e);
                ViewState::Failed(
                    e.user_message("Erreur lors du chargement des réponses")
                        .to_string(),
                )
            }
        };
    }

    /// Fetch the chart bundle of the analytics hotel and save its images.
    pub fn load_analytics(&mut self) {
        let Some(id) = self.registry.selected(SelectorId::Analytics) else {
            self.loads.cancel(LoadKind::Analytics);
            self.views.analytics.state = ViewState::Empty;
            return;
        };
        self.views.analytics.state = ViewState::Loading;
        let api = self.api.clone();
        let dir = self.export_dir.clone();
        self.spawn_load(
            LoadKind::Analytics,
            async move {
                let bundle = api.charts(id).await?;
                let saved =
                    tokio::task::spawn_blocking(move || export::save_chart_bundle(&bundle, id, &dir))
                        .await
                        .map_err(|e| ExportError::Io(std::io::Error::other(e)))??;
                Ok::<_, ExportError>(saved)
            },
            |ticket, result| Update::AnalyticsLoaded { ticket, result },
        );
    }

    pub(super) fn apply_analytics(&mut self, result: Result<SavedCharts, ExportError>) {
        self.views.analytics.state = match result {
            Ok(saved) => {
                log::info!("Saved {} chart images", saved.charts.len());
                ViewState::Ready(saved)
            }
            Err(e) => {
                let level = self.classifier.classify_export_error(&e);
                log::log!(log::Level::from(level), "Failed to load charts: {}", e);
                ViewState::Failed(
                    e.user_message("Erreur lors du chargement des graphiques")
                        .to_string(),
                )
            }
        };
    }

    pub fn load_webhook_status(&mut self) {
        self.views.automation.status = ViewState::Loading;
        let api = self.api.clone();
        self.spawn_load(
            LoadKind::WebhookStatus,
            async move { api.webhook_status().await },
            |ticket, result| Update::WebhookStatusLoaded { ticket, result },
        );
    }

    pub(super) fn apply_webhook_status(&mut self, result: Result<WebhookStatus, ApiError>) {
        self.views.automation.status = match result {
            Ok(status) => ViewState::Ready(status),
            Err(e) => {
                self.log_api_error("Failed to load webhook status", &e);
                ViewState::Failed(
                    e.user_message("Erreur lors du chargement du statut")
                        .to_string(),
                )
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cancels_previous_load() {
        let mut tracker = LoadTracker::default();
        let (first, first_token) = tracker.begin(LoadKind::Dashboard);
        let (second, second_token) = tracker.begin(LoadKind::Dashboard);

        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());
        assert!(!tracker.finish(LoadKind::Dashboard, first));
        assert!(tracker.finish(LoadKind::Dashboard, second));
        // A result is accepted once
        assert!(!tracker.finish(LoadKind::Dashboard, second));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut tracker = LoadTracker::default();
        let (dashboard, _) = tracker.begin(LoadKind::Dashboard);
        let (responses, _) = tracker.begin(LoadKind::Responses);

        assert!(tracker.is_pending(LoadKind::Dashboard));
        assert!(tracker.finish(LoadKind::Responses, responses));
        assert!(tracker.finish(LoadKind::Dashboard, dashboard));
        assert!(!tracker.is_pending(LoadKind::Analytics));
    }

    #[test]
    // Clearing a section makes its in-flight result stale.
    fn test_cancel_invalidates_ticket() {
        let mut tracker = LoadTracker::default();
        let (ticket, token) = tracker.begin(LoadKind::Analytics);
        tracker.cancel(LoadKind::Analytics);

        assert!(token.is_cancelled());
        assert!(!tracker.finish(LoadKind::Analytics, ticket));
        assert!(!tracker.is_pending(LoadKind::Analytics));
    }
}
