//! Mutation actions and exports
//!
//! Every action validates presence first and sends nothing when a field is
//! missing. An action already in flight for the same key is not reissued.

use super::{Controller, Modal};
use crate::api::error::ApiError;
use crate::events::{ActionKey, MutationOutcome, Update};
use crate::export::{self, ExportError, ExportTarget};
use crate::forms::{self, HotelForm};
use crate::notifications::Severity;
use crate::registry::SelectorId;
use std::future::Future;
use std::path::PathBuf;

const ALREADY_RUNNING: &str = "Une opération est déjà en cours";

impl Controller {
    /// Reserve `action`. Returns false, with an info notification, if it already runs.
    fn begin_action(&mut self, action: ActionKey) -> bool {
        if self.in_flight.insert(action) {
            return true;
        }
        log::debug!("Ignoring duplicate {}", action);
        self.notify(Severity::Info, ALREADY_RUNNING);
        false
    }

    fn spawn_mutation<Fut>(&mut self, action: ActionKey, request: Fut)
    where
        Fut: Future<Output = Result<MutationOutcome, ApiError>> + Send + 'static,
    {
        if !self.begin_action(action) {
            return;
        }
        let sender = self.updates.clone();
        log::info!("Sending {}", action);
        tokio::spawn(async move {
            let result = request.await;
            let _ = sender.send(Update::MutationDone { action, result }).await;
        });
    }

    pub fn open_hotel_form(&mut self) {
        self.modal = Some(Modal::AddHotel(HotelForm::default()));
    }

    pub fn cancel_modal(&mut self) {
        self.modal = None;
    }

    pub fn submit_hotel_form(&mut self) {
        let Some(Modal::AddHotel(form)) = &self.modal else {
            return;
        };
        match form.validate() {
            Err(e) => self.notify(Severity::Warning, e.to_string()),
            Ok(body) => {
                let api = self.api.clone();
                self.spawn_mutation(ActionKey::CreateHotel, async move {
                    api.create_hotel(&body).await.map(MutationOutcome::Created)
                });
            }
        }
    }

    /// Ask for confirmation before deleting the hotel under the table cursor.
    pub fn request_delete(&mut self) {
        match self.views.hotels.selected_row() {
            Some(row) => {
                self.modal = Some(Modal::ConfirmDelete {
                    hotel_id: row.id,
                    name: row.name.clone(),
                });
            }
            None => self.notify(Severity::Warning, "Veuillez sélectionner un hôtel"),
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(Modal::ConfirmDelete { hotel_id, .. }) = self.modal.take() else {
            return;
        };
        let api = self.api.clone();
        self.spawn_mutation(ActionKey::DeleteHotel(hotel_id), async move {
            api.delete_hotel(hotel_id)
                .await
                .map(|_| MutationOutcome::Deleted)
        });
    }

    /// Bind the form's Tally URL to the hotel of the automation selector.
    pub fn configure_automation(&mut self) {
        let hotel = self.registry.selected(SelectorId::Automation);
        match self.views.automation.form.validate(hotel) {
            Err(e) => self.notify(Severity::Warning, e.to_string()),
            Ok((id, update)) => {
                let api = self.api.clone();
                self.spawn_mutation(ActionKey::ConfigureAutomation(id), async move {
                    api.update_hotel(id, &update)
                        .await
                        .map(MutationOutcome::Updated)
                });
            }
        }
    }

    pub fn test_webhook(&mut self) {
        let hotel = self.registry.selected(SelectorId::WebhookTest);
        match forms::validate_webhook_target(hotel) {
            Err(e) => self.notify(Severity::Warning, e.to_string()),
            Ok(id) => {
                let api = self.api.clone();
                self.spawn_mutation(ActionKey::TestWebhook(id), async move {
                    api.test_webhook(id)
                        .await
                        .map(MutationOutcome::WebhookTested)
                });
            }
        }
    }

    pub(super) fn apply_mutation(
        &mut self,
        action: ActionKey,
        result: Result<MutationOutcome, ApiError>,
    ) {
        self.in_flight.remove(&action);
        match result {
            Ok(MutationOutcome::Created(hotel)) => {
                self.notify(
                    Severity::Success,
                    format!("Hôtel \"{}\" créé avec succès!", hotel.name),
                );
                self.modal = None;
                self.refresh_hotels();
            }
            Ok(MutationOutcome::Deleted) => {
                self.notify(Severity::Success, "Hôtel supprimé avec succès");
                self.refresh_hotels();
            }
            Ok(MutationOutcome::Updated(hotel)) => {
                log::info!("Automation bound to hotel {}", hotel.id);
                self.notify(Severity::Success, "Automatisation configurée avec succès!");
                self.views.automation.form.reset();
                self.views.automation.editing = false;
                self.refresh_hotels();
            }
            Ok(MutationOutcome::WebhookTested(outcome)) => {
                log::info!(
                    "Webhook test created response {:?}: {}",
                    outcome.response_id,
                    outcome.message
                );
                self.notify(
                    Severity::Success,
                    "Test d'intégration réussi! Réponse de test créée.",
                );
                self.views.automation.last_test = Some(outcome);
                self.load_webhook_status();
            }
            Err(e) => {
                self.log_api_error(&format!("Failed to {}", action), &e);
                let message = e.user_message(action.failure_message()).to_string();
                self.notify(Severity::Danger, message);
            }
        }
    }

    /// Export the hotel of the export selector.
    pub fn export_selected(&mut self) {
        match self.registry.selected(SelectorId::Export) {
            Some(id) => self.export(ExportTarget::Hotel(id)),
            None => self.notify(Severity::Warning, "Veuillez sélectionner un hôtel"),
        }
    }

    /// Download an Excel export into the export directory.
    pub fn export(&mut self, target: ExportTarget) {
        if !self.begin_action(ActionKey::Export(target)) {
            return;
        }
        let api = self.api.clone();
        let dir = self.export_dir.clone();
        let sender = self.updates.clone();
        log::info!("Starting {}", ActionKey::Export(target));
        tokio::spawn(async move {
            let result = export::download_excel(api.as_ref(), target, &dir, export::today()).await;
            let _ = sender.send(Update::Exported { target, result }).await;
        });
    }

    pub(super) fn apply_export(
        &mut self,
        target: ExportTarget,
        result: Result<PathBuf, ExportError>,
    ) {
        self.in_flight.remove(&ActionKey::Export(target));
        match result {
            Ok(path) => {
                self.notify(Severity::Success, target.success_message());
                self.views.reports.last_export = Some(path);
            }
            Err(e) => {
                let level = self.classifier.classify_export_error(&e);
                log::log!(log::Level::from(level), "Export failed: {}", e);
                let message = e.user_message(target.failure_message()).to_string();
                self.notify(Severity::Danger, message);
            }
        }
    }
}
