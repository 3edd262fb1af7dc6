//! Headless mode execution
//!
//! One-shot commands for scripts and terminals without a TUI. Each command
//! performs at most one mutation and reports its outcome as tagged lines; a
//! failure ends with exactly one `[WARN]` or `[ERROR]` line.

use super::SessionData;
use crate::api::HotelApi;
use crate::api::error::ApiError;
use crate::api::types::{HotelId, Recommendation};
use crate::cli_messages::print_tagged;
use crate::consts::cli_consts::MAX_RATING;
use crate::controller::view::{
    CategoryChart, ComparisonTable, HotelRow, category_label, page_links, responses_summary,
};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::ActionKey;
use crate::export::{self, ExportError, ExportTarget};
use crate::forms::{
    AutomationForm, HotelForm, ValidationError, validate_comparison, validate_webhook_target,
};
use crate::logging::should_log_with_env;
use crate::notifications::Severity;
use crate::registry::HotelRegistry;
use crate::ui::dashboard::utils::format_french_date;
use crate::{print_cmd_info, print_cmd_success};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BAR_WIDTH: f64 = 20.0;

/// A one-shot console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    ListHotels,
    AddHotel {
        name: String,
        location: Option<String>,
        tally_url: Option<String>,
    },
    DeleteHotel {
        id: HotelId,
        confirmed: bool,
    },
    Statistics(HotelId),
    Responses {
        hotel: HotelId,
        page: u32,
    },
    Export {
        hotel: Option<HotelId>,
        out: Option<PathBuf>,
    },
    Automate {
        hotel: HotelId,
        tally_url: String,
    },
    TestWebhook(HotelId),
    Compare {
        hotels: Vec<HotelId>,
        /// Also save the server-rendered comparison chart.
        chart: bool,
        out: Option<PathBuf>,
    },
    Trend {
        hotel: HotelId,
        days: u32,
    },
}

/// Why a command stopped. Already carries the text shown to the user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandFailed {
    pub severity: Severity,
    pub message: String,
    detail: Option<String>,
}

impl CommandFailed {
    fn api(error: ApiError, fallback: &str) -> Self {
        let level = ErrorClassifier::new().classify_api_error(&error);
        log::log!(log::Level::from(level), "{}: {}", fallback, error);
        Self {
            severity: Severity::Danger,
            message: error.user_message(fallback).to_string(),
            detail: Some(error.to_string()),
        }
    }

    fn export(error: ExportError, fallback: &str) -> Self {
        let level = ErrorClassifier::new().classify_export_error(&error);
        log::log!(log::Level::from(level), "{}: {}", fallback, error);
        Self {
            severity: Severity::Danger,
            message: error.user_message(fallback).to_string(),
            detail: Some(error.to_string()),
        }
    }

    fn warning(message: String) -> Self {
        log::warn!("{}", message);
        Self {
            severity: Severity::Warning,
            message,
            detail: None,
        }
    }

    fn print(&self) {
        // Raw error text only when debugging
        let detail = match &self.detail {
            Some(detail) if should_log_with_env(LogLevel::Debug) => detail.as_str(),
            _ => "",
        };
        print_tagged(self.severity.into(), &self.message, detail);
    }
}

impl From<ValidationError> for CommandFailed {
    fn from(error: ValidationError) -> Self {
        log::warn!("Rejected input: {}", error);
        Self {
            severity: Severity::Warning,
            message: error.to_string(),
            detail: None,
        }
    }
}

/// Runs one command and prints its outcome.
///
/// The failure line has already been printed when this returns `Err`.
pub async fn run_headless_mode(
    session: SessionData,
    command: HeadlessCommand,
) -> Result<(), CommandFailed> {
    log::debug!("Running {:?} against {}", command, session.environment);
    let result = execute(session.api.as_ref(), &session.export_dir, command).await;
    if let Err(failed) = &result {
        failed.print();
    }
    result
}

pub async fn execute(
    api: &dyn HotelApi,
    export_dir: &Path,
    command: HeadlessCommand,
) -> Result<(), CommandFailed> {
    match command {
        HeadlessCommand::ListHotels => list_hotels(api).await,
        HeadlessCommand::AddHotel {
            name,
            location,
            tally_url,
        } => {
            let mut form = HotelForm::default();
            form.name.set(name);
            form.location.set(location.unwrap_or_default());
            form.tally_url.set(tally_url.unwrap_or_default());
            let hotel = form.validate()?;

            let created = api
                .create_hotel(&hotel)
                .await
                .map_err(|e| CommandFailed::api(e, ActionKey::CreateHotel.failure_message()))?;
            print_cmd_success!(
                &format!("Hôtel \"{}\" créé avec succès!", created.name),
                "#{}",
                created.id
            );
            if let Some(sheet) = &created.google_sheet_url {
                print_cmd_info!("Google Sheet", "{}", sheet);
            }
            Ok(())
        }
        HeadlessCommand::DeleteHotel { id, confirmed } => {
            if !confirmed {
                let name = hotel_name(api, id).await?;
                if !confirm_delete(&name, &mut io::stdin().lock())? {
                    print_cmd_info!("Suppression annulée", "");
                    return Ok(());
                }
            }
            api.delete_hotel(id)
                .await
                .map_err(|e| CommandFailed::api(e, ActionKey::DeleteHotel(id).failure_message()))?;
            print_cmd_success!("Hôtel supprimé avec succès", "#{}", id);
            Ok(())
        }
        HeadlessCommand::Statistics(id) => statistics(api, id).await,
        HeadlessCommand::Responses { hotel, page } => responses(api, hotel, page).await,
        HeadlessCommand::Export { hotel, out } => {
            let target = hotel.map_or(ExportTarget::Global, ExportTarget::Hotel);
            let dir = out.as_deref().unwrap_or(export_dir);
            let path = export::download_excel(api, target, dir, export::today())
                .await
                .map_err(|e| CommandFailed::export(e, target.failure_message()))?;
            print_cmd_success!(target.success_message(), "{}", path.display());
            Ok(())
        }
        HeadlessCommand::Automate { hotel, tally_url } => {
            let mut form = AutomationForm::default();
            form.tally_url.set(tally_url);
            let (id, update) = form.validate(Some(hotel))?;
            let updated = api.update_hotel(id, &update).await.map_err(|e| {
                CommandFailed::api(e, ActionKey::ConfigureAutomation(id).failure_message())
            })?;
            print_cmd_success!(
                "Automatisation configurée avec succès!",
                "{}",
                updated.tally_form_url.as_deref().unwrap_or_default()
            );
            Ok(())
        }
        HeadlessCommand::TestWebhook(hotel) => {
            let id = validate_webhook_target(Some(hotel))?;
            let result = api
                .test_webhook(id)
                .await
                .map_err(|e| CommandFailed::api(e, ActionKey::TestWebhook(id).failure_message()))?;
            print_cmd_success!(
                "Test d'intégration réussi! Réponse de test créée.",
                "{}",
                result
                    .response_id
                    .map(|r| format!("réponse #{}", r))
                    .unwrap_or_default()
            );
            // Informational only; the test itself already succeeded
            match api.webhook_status().await {
                Ok(status) => print_cmd_info!(
                    "Statut des webhooks",
                    "{} hôtels, {} réponses",
                    status.total_hotels,
                    status.total_responses
                ),
                Err(e) => log::warn!("Webhook status unavailable: {}", e),
            }
            Ok(())
        }
        HeadlessCommand::Compare { hotels, chart, out } => {
            let ids = validate_comparison(&hotels)?;
            let dir = out.as_deref().unwrap_or(export_dir);
            compare(api, &ids, chart.then_some(dir)).await
        }
        HeadlessCommand::Trend { hotel, days } => trend(api, hotel, days).await,
    }
}

const HOTELS_FAILURE: &str = "Erreur lors du chargement des hôtels";

async fn load_registry(api: &dyn HotelApi) -> Result<HotelRegistry, CommandFailed> {
    let mut registry = HotelRegistry::new();
    registry
        .refresh(api)
        .await
        .map_err(|e| CommandFailed::api(e, HOTELS_FAILURE))?;
    Ok(registry)
}

/// Name of hotel `id`, shown before asking to delete it.
async fn hotel_name(api: &dyn HotelApi, id: HotelId) -> Result<String, CommandFailed> {
    let registry = load_registry(api).await?;
    match registry.find(id) {
        Some(hotel) => Ok(hotel.name.clone()),
        None => Err(CommandFailed::warning(format!("Hôtel #{} introuvable", id))),
    }
}

async fn list_hotels(api: &dyn HotelApi) -> Result<(), CommandFailed> {
    let registry = load_registry(api).await?;
    let hotels = registry.hotels();
    if hotels.is_empty() {
        print_cmd_info!("Aucun hôtel trouvé", "");
        return Ok(());
    }
    for hotel in hotels {
        let row = HotelRow::from(hotel);
        println!(
            "#{:<4} {:<28} {:<20} {:<40} {}",
            row.id, row.name, row.location, row.form, row.sheet
        );
    }
    Ok(())
}

async fn statistics(api: &dyn HotelApi, id: HotelId) -> Result<(), CommandFailed> {
    let fallback = "Erreur lors du chargement des statistiques";
    let stats = api
        .statistics(id)
        .await
        .map_err(|e| CommandFailed::api(e, fallback))?;
    let insights = api
        .insights(id)
        .await
        .map_err(|e| CommandFailed::api(e, fallback))?;

    println!("Réponses totales      {}", stats.total_responses);
    println!(
        "Note moyenne          {:.1}/{}",
        stats.average_overall_rating, MAX_RATING
    );
    println!("Taux de recommandation {:.0}%", stats.recommendation_rate);
    println!("Réponses ce mois      {}", stats.monthly_responses);

    if !stats.category_averages.is_empty() {
        let chart = CategoryChart::from_averages(&stats.category_averages);
        println!();
        for bar in &chart.bars {
            println!("{:<16} {} {:.1}", bar.label, rating_bar(bar.value), bar.value);
        }
    }

    println!();
    if insights.is_empty() {
        println!("Aucun insight disponible");
    }
    for insight in &insights {
        println!("[{}] {}", insight.kind, insight.title);
        if !insight.description.is_empty() {
            println!("    {}", insight.description);
        }
    }
    Ok(())
}

async fn responses(api: &dyn HotelApi, hotel: HotelId, page: u32) -> Result<(), CommandFailed> {
    let page = api
        .responses(hotel, page.max(1))
        .await
        .map_err(|e| CommandFailed::api(e, "Erreur lors du chargement des réponses"))?;

    let Some(summary) = responses_summary(&page) else {
        print_cmd_info!("Aucune réponse trouvée", "");
        return Ok(());
    };
    if page.responses.is_empty() {
        println!("Page {} vide", page.current_page);
    }
    for response in &page.responses {
        println!(
            "{:<18} {:<28} {:<5} {}",
            response
                .submission_date
                .as_deref()
                .map(format_french_date)
                .unwrap_or_else(|| "-".to_string()),
            response.client_name.as_deref().unwrap_or("Anonyme"),
            response
                .overall_rating
                .map(|r| format!("{:.0}/5", r))
                .unwrap_or_else(|| "-".to_string()),
            Recommendation::from(response.would_recommend),
        )
    }
    println!();
    println!("{}", summary);
    let links = page_links(&page);
    if !links.is_empty() {
        let pages: Vec<String> = links
            .iter()
            .map(|l| {
                if l.active {
                    format!("[{}]", l.number)
                } else {
                    l.number.to_string()
                }
            })
            .collect();
        println!("Pages: {}", pages.join(" "));
    }
    Ok(())
}

async fn compare(
    api: &dyn HotelApi,
    ids: &[HotelId],
    chart_dir: Option<&Path>,
) -> Result<(), CommandFailed> {
    let fallback = "Erreur lors de la comparaison";
    let (comparison, chart) = match chart_dir {
        Some(dir) => {
            let (comparison, path) =
                export::download_comparison_chart(api, ids, dir, export::today())
                    .await
                    .map_err(|e| CommandFailed::export(e, fallback))?;
            (comparison, Some(path))
        }
        None => (
            api.compare_hotels(ids)
                .await
                .map_err(|e| CommandFailed::api(e, fallback))?,
            None,
        ),
    };

    if comparison.is_empty() {
        print_cmd_info!("Aucun hôtel à comparer", "");
        return Ok(());
    }
    for line in comparison_lines(&ComparisonTable::from_comparison(&comparison)) {
        println!("{}", line);
    }
    if let Some(path) = chart {
        print_cmd_success!("Graphique de comparaison enregistré", "{}", path.display());
    }
    Ok(())
}

fn comparison_lines(table: &ComparisonTable) -> Vec<String> {
    let mut header = format!("{:<24} {:>8} {:>6} {:>6}", "Hôtel", "Réponses", "Note", "Reco.");
    for key in &table.categories {
        header.push_str(&format!(" {:>13}", category_label(key)));
    }

    let mut lines = vec![header];
    for row in &table.rows {
        let mut line = format!(
            "{:<24} {:>8} {:>6.1} {:>5.0}%",
            row.hotel, row.total_responses, row.average, row.recommendation_rate
        );
        for score in &row.scores {
            match score {
                Some(value) => line.push_str(&format!(" {:>13.1}", value)),
                None => line.push_str(&format!(" {:>13}", "-")),
            }
        }
        lines.push(line);
    }
    if let Some(leader) = table.leader() {
        lines.push(String::new());
        lines.push(format!("Meilleure note moyenne: {}", leader));
    }
    lines
}

async fn trend(api: &dyn HotelApi, hotel: HotelId, days: u32) -> Result<(), CommandFailed> {
    let analysis = api
        .temporal_analysis(hotel, days)
        .await
        .map_err(|e| CommandFailed::api(e, "Erreur lors de l'analyse temporelle"))?;

    if analysis.data.is_empty() {
        print_cmd_info!(
            "Aucune réponse sur la période",
            "{} derniers jours",
            days
        );
        return Ok(());
    }
    for week in &analysis.data {
        println!(
            "Semaine du {:<10} {} {:.1}  ({} réponses)",
            format_french_date(&week.week),
            rating_bar(week.average_rating),
            week.average_rating,
            week.response_count
        );
    }
    println!();
    println!("Tendance: {}", analysis.trend);
    Ok(())
}

fn rating_bar(value: f64) -> String {
    let filled = ((value / MAX_RATING) * BAR_WIDTH).round() as usize;
    let empty = (BAR_WIDTH as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Ask before deleting; anything but an explicit yes cancels.
fn confirm_delete(name: &str, input: &mut impl BufRead) -> Result<bool, CommandFailed> {
    print!(
        "Êtes-vous sûr de vouloir supprimer l'hôtel \"{}\" ? Toutes les réponses associées seront également supprimées. [o/N] ",
        name
    );
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        log::warn!("Cannot read confirmation: {}", e);
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    ))
}
