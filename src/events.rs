//! Update System
//!
//! Results of background fetches, sent back to the UI loop over an mpsc
//! channel. Controller state is only ever mutated by applying an `Update`.

use crate::api::error::ApiError;
use crate::api::types::{Hotel, HotelId, ResponsePage, WebhookStatus, WebhookTestResult};
use crate::controller::view::DashboardData;
use crate::export::{ExportError, ExportTarget, SavedCharts};
use std::fmt;
use std::path::PathBuf;

/// Generation number of a section load. Only the latest one is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// What a background load fills in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum LoadKind {
    Hotels,
    Dashboard,
    Responses,
    Analytics,
    WebhookStatus,
}

/// A user-triggered request. At most one per key is in flight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    CreateHotel,
    DeleteHotel(HotelId),
    ConfigureAutomation(HotelId),
    TestWebhook(HotelId),
    Export(ExportTarget),
}

impl ActionKey {
    /// Generic text shown when the server gives no detail.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ActionKey::CreateHotel => "Erreur lors de la création de l'hôtel",
            ActionKey::DeleteHotel(_) => "Erreur lors de la suppression",
            ActionKey::ConfigureAutomation(_) => "Erreur lors de la configuration",
            ActionKey::TestWebhook(_) => "Erreur lors du test",
            ActionKey::Export(target) => target.failure_message(),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKey::CreateHotel => write!(f, "create hotel"),
            ActionKey::DeleteHotel(id) => write!(f, "delete hotel {}", id),
            ActionKey::ConfigureAutomation(id) => write!(f, "configure automation of hotel {}", id),
            ActionKey::TestWebhook(id) => write!(f, "test webhook of hotel {}", id),
            ActionKey::Export(ExportTarget::Hotel(id)) => write!(f, "export hotel {}", id),
            ActionKey::Export(ExportTarget::Global) => write!(f, "global export"),
        }
    }
}

/// Successful result of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(Hotel),
    Updated(Hotel),
    Deleted,
    WebhookTested(WebhookTestResult),
}

#[derive(Debug)]
pub enum Update {
    HotelsLoaded {
        ticket: Ticket,
        result: Result<Vec<Hotel>, ApiError>,
    },
    DashboardLoaded {
        ticket: Ticket,
        result: Result<DashboardData, ApiError>,
    },
    ResponsesLoaded {
        ticket: Ticket,
        result: Result<ResponsePage, ApiError>,
    },
    AnalyticsLoaded {
        ticket: Ticket,
        result: Result<SavedCharts, ExportError>,
    },
    WebhookStatusLoaded {
        ticket: Ticket,
        result: Result<WebhookStatus, ApiError>,
    },
    MutationDone {
        action: ActionKey,
        result: Result<MutationOutcome, ApiError>,
    },
    Exported {
        target: ExportTarget,
        result: Result<PathBuf, ExportError>,
    },
}

impl Update {
    /// The load this update completes, with its ticket.
    pub fn load(&self) -> Option<(LoadKind, Ticket)> {
        match self {
            Update::HotelsLoaded { ticket, .. } => Some((LoadKind::Hotels, *ticket)),
            Update::DashboardLoaded { ticket, .. } => Some((LoadKind::Dashboard, *ticket)),
            Update::ResponsesLoaded { ticket, .. } => Some((LoadKind::Responses, *ticket)),
            Update::AnalyticsLoaded { ticket, .. } => Some((LoadKind::Analytics, *ticket)),
            Update::WebhookStatusLoaded { ticket, .. } => Some((LoadKind::WebhookStatus, *ticket)),
            Update::MutationDone { .. } | Update::Exported { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Update::HotelsLoaded { result, .. } => result.is_ok(),
            Update::DashboardLoaded { result, .. } => result.is_ok(),
            Update::ResponsesLoaded { result, .. } => result.is_ok(),
            Update::AnalyticsLoaded { result, .. } => result.is_ok(),
            Update::WebhookStatusLoaded { result, .. } => result.is_ok(),
            Update::MutationDone { result, .. } => result.is_ok(),
            Update::Exported { result, .. } => result.is_ok(),
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.is_success() { "ok" } else { "failed" };
        match (self, self.load()) {
            (_, Some((kind, ticket))) => write!(f, "{} load #{} {}", kind, ticket.0, outcome),
            (Update::MutationDone { action, .. }, None) => write!(f, "{} {}", action, outcome),
            (Update::Exported { target, .. }, None) => {
                write!(f, "{} {}", ActionKey::Export(*target), outcome)
            }
            _ => write!(f, "update {}", outcome),
        }
    }
}
