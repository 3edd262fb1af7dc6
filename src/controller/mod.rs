//! Dashboard controller
//!
//! Owns the console state: hotel registry, navigation, notifications and the
//! view of every section. Requests run in spawned tasks and come back as
//! `Update`s, which are only applied on the UI loop through [`Controller::apply`].

mod actions;
mod loaders;
pub mod view;

pub use loaders::LoadTracker;

use crate::api::HotelApi;
use crate::api::types::HotelId;
use crate::consts::cli_consts::{NOTIFICATION_TTL, UPDATE_QUEUE_SIZE};
use crate::environment::Environment;
use crate::error_classifier::ErrorClassifier;
use crate::events::{ActionKey, LoadKind, Update};
use crate::forms::HotelForm;
use crate::navigation::{NavControl, Navigation, Refresh, Section};
use crate::notifications::{NotificationCenter, Severity};
use crate::registry::{HotelRegistry, SelectorId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use view::Views;

/// A dialog drawn over the current section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    AddHotel(HotelForm),
    ConfirmDelete { hotel_id: HotelId, name: String },
}

pub struct Controller {
    api: Arc<dyn HotelApi>,
    environment: Environment,
    export_dir: PathBuf,
    updates: mpsc::Sender<Update>,
    classifier: ErrorClassifier,
    loads: LoadTracker,
    /// Actions sent and not answered yet.
    in_flight: HashSet<ActionKey>,

    pub registry: HotelRegistry,
    pub navigation: Navigation,
    pub notifications: NotificationCenter,
    pub views: Views,
    pub modal: Option<Modal>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("environment", &self.environment)
            .field("section", &self.navigation.visible())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Creates the controller and the receiving end of its update channel.
    pub fn new(
        api: Arc<dyn HotelApi>,
        export_dir: PathBuf,
        initial: Section,
    ) -> (Self, mpsc::Receiver<Update>) {
        let (updates, receiver) = mpsc::channel(UPDATE_QUEUE_SIZE);
        let environment = api.environment().clone();
        let controller = Self {
            api,
            environment,
            export_dir,
            updates,
            classifier: ErrorClassifier::new(),
            loads: LoadTracker::default(),
            in_flight: HashSet::new(),
            registry: HotelRegistry::new(),
            navigation: Navigation::new(initial),
            notifications: NotificationCenter::new(NOTIFICATION_TTL),
            views: Views::default(),
            modal: None,
        };
        (controller, receiver)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// First load: fetch the hotels and run the initial section's routine.
    pub fn start(&mut self) {
        self.refresh_hotels();
        let section = self.navigation.visible();
        self.show_section(section, NavControl::for_section(section));
    }

    /// Show `section` with `control` marked active and run its refresh routine.
    pub fn show_section(&mut self, section: Section, control: NavControl) {
        match self.navigation.show(section, control) {
            Some(Refresh::HotelsTable) => {
                self.views.hotels.rebuild(self.registry.hotels());
            }
            Some(Refresh::ReportSelectors) => {
                self.registry.sync(&[SelectorId::Export]);
            }
            Some(Refresh::AutomationSelectors) => {
                self.registry
                    .sync(&[SelectorId::Automation, SelectorId::WebhookTest]);
                self.load_webhook_status();
            }
            None => {}
        }
    }

    /// The selector the visible section picks its hotel with.
    pub fn active_selector(&self) -> Option<SelectorId> {
        match self.navigation.visible() {
            Section::Dashboard => Some(SelectorId::Dashboard),
            Section::Responses => Some(SelectorId::Responses),
            Section::Analytics => Some(SelectorId::Analytics),
            Section::Reports => Some(SelectorId::Export),
            Section::Automation => Some(SelectorId::Automation),
            Section::Hotels => None,
        }
    }

    /// Move a selector and re-render the section that reads it.
    pub fn cycle_selector(&mut self, id: SelectorId, forward: bool) {
        let selector = self.registry.selector_mut(id);
        if forward {
            selector.select_next();
        } else {
            selector.select_previous();
        }
        self.on_selection_changed(id);
    }

    #[cfg(test)]
    pub fn select_hotel(&mut self, id: SelectorId, hotel: Option<HotelId>) {
        self.registry.selector_mut(id).select(hotel);
        self.on_selection_changed(id);
    }

    fn on_selection_changed(&mut self, id: SelectorId) {
        match id {
            SelectorId::Dashboard => self.load_dashboard(),
            SelectorId::Responses => self.load_responses(1),
            SelectorId::Analytics => self.load_analytics(),
            SelectorId::Export | SelectorId::Automation | SelectorId::WebhookTest => {}
        }
    }

    /// Re-run the loader of the visible section.
    pub fn reload(&mut self) {
        match self.navigation.visible() {
            Section::Dashboard => self.load_dashboard(),
            Section::Responses => {
                let page = self.views.responses.page;
                self.load_responses(page)
            }
            Section::Analytics => self.load_analytics(),
            Section::Automation => self.load_webhook_status(),
            Section::Hotels | Section::Reports => self.refresh_hotels(),
        }
    }

    /// Apply the result of a background request.
    pub fn apply(&mut self, update: Update) {
        log::debug!("Applying {}", update);
        if let Some((kind, ticket)) = update.load() {
            if !self.loads.finish(kind, ticket) {
                log::debug!(
                    "Discarding stale {} result #{} (current #{})",
                    kind,
                    ticket.0,
                    self.loads.current(kind).0
                );
                return;
            }
        }
        match update {
            Update::HotelsLoaded { result, .. } => self.apply_hotels(result),
            Update::DashboardLoaded { result, .. } => self.apply_dashboard(result),
            Update::ResponsesLoaded { result, .. } => self.apply_responses(result),
            Update::AnalyticsLoaded { result, .. } => self.apply_analytics(result),
            Update::WebhookStatusLoaded { result, .. } => self.apply_webhook_status(result),
            Update::MutationDone { action, result } => self.apply_mutation(action, result),
            Update::Exported { target, result } => self.apply_export(target, result),
        }
    }

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notifications.push(severity, message);
    }

    /// Close the newest notification. Returns false when none is shown.
    pub fn dismiss_latest_notification(&mut self) -> bool {
        match self.notifications.latest().map(|n| n.id) {
            Some(id) => self.notifications.dismiss(id),
            None => false,
        }
    }

    /// Drop expired notifications. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifications.expire(now) > 0
    }

    /// Whether keystrokes currently go to a text field.
    pub fn is_editing(&self) -> bool {
        matches!(self.modal, Some(Modal::AddHotel(_)))
            || self.views.automation.editing
            || self.views.responses.jump_input.is_some()
    }

    pub fn is_in_flight(&self, action: ActionKey) -> bool {
        self.in_flight.contains(&action)
    }

    pub fn is_loading(&self, kind: LoadKind) -> bool {
        self.loads.is_pending(kind)
    }

    /// Whether the content of the visible section is being fetched.
    pub fn visible_section_loading(&self) -> bool {
        let views = &self.views;
        match self.navigation.visible() {
            Section::Dashboard => views.dashboard.state.is_loading(),
            Section::Responses => views.responses.state.is_loading(),
            Section::Analytics => views.analytics.state.is_loading(),
            Section::Automation => views.automation.status.is_loading(),
            Section::Hotels | Section::Reports => self.is_loading(LoadKind::Hotels),
        }
    }
}
