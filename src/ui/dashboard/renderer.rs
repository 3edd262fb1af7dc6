//! Dashboard main renderer

use super::components::{footer, header, modal, notifications};
use super::sections::{analytics, automation, hotels, overview, reports, responses};
use crate::controller::Controller;
use crate::navigation::Section;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, controller: &Controller, with_background_color: bool) {
    if with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], controller);

    let body = main_chunks[1];
    match controller.navigation.visible() {
        Section::Dashboard => overview::render_overview(f, body, controller),
        Section::Hotels => hotels::render_hotels(f, body, controller),
        Section::Responses => responses::render_responses(f, body, controller),
        Section::Analytics => analytics::render_analytics(f, body, controller),
        Section::Reports => reports::render_reports(f, body, controller),
        Section::Automation => automation::render_automation(f, body, controller),
    }

    footer::render_footer(f, main_chunks[2], controller);

    if let Some(dialog) = &controller.modal {
        modal::render_modal(f, body, dialog);
    }
    notifications::render_notifications(f, f.area(), &controller.notifications);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHotelApi;
    use crate::api::types::{CategoryAverages, ResponsePage, Statistics, SurveyResponse};
    use crate::controller::view::{DashboardData, ViewState};
    use crate::environment::Environment;
    use crate::navigation::NavControl;
    use crate::notifications::Severity;
    use crate::registry::SelectorId;
    use crate::registry::tests::hotel;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn controller() -> Controller {
        let mut api = MockHotelApi::new();
        api.expect_environment().return_const(Environment::Local);
        let (controller, _rx) =
            Controller::new(Arc::new(api), "exports".into(), Section::Dashboard);
        controller
    }

    fn screen(controller: &Controller) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|f| render_dashboard(f, controller, false))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn page(responses: Vec<SurveyResponse>, total: u64, pages: u32, current: u32) -> ResponsePage {
        ResponsePage {
            responses,
            total,
            pages,
            current_page: current,
        }
    }

    #[test]
    fn test_dashboard_placeholder_without_hotel() {
        let controller = controller();
        let text = screen(&controller);
        assert!(text.contains("Sélectionnez un hôtel pour voir les statistiques"));
        assert!(text.contains("Sélectionner un hôtel..."));
    }

    #[test]
    fn test_dashboard_renders_figures_and_chart_labels() {
        let mut controller = controller();
        controller.views.dashboard.show(DashboardData {
            statistics: Statistics {
                total_responses: 25,
                average_overall_rating: 4.1,
                recommendation_rate: 80.0,
                monthly_responses: 6,
                category_averages: CategoryAverages::new(vec![
                    ("accommodation_rating".to_string(), 4.2),
                    ("service_rating".to_string(), 3.8),
                ]),
            },
            insights: vec![],
        });

        let text = screen(&controller);
        assert!(text.contains("4.1/5"));
        assert!(text.contains("80%"));
        assert!(text.contains("Hébergement"));
        assert!(text.contains("Service"));
        assert!(text.contains("Aucun insight disponible"));
    }

    #[test]
    fn test_responses_empty_state_is_not_an_error() {
        let mut controller = controller();
        controller.show_section(Section::Responses, NavControl(2));
        controller.views.responses.state = ViewState::Ready(page(vec![], 0, 0, 1));

        let text = screen(&controller);
        assert!(text.contains("Aucune réponse trouvée"));
        assert!(!text.contains("Erreur"));
    }

    #[test]
    fn test_responses_summary_and_tri_state_recommendation() {
        let mut controller = controller();
        controller.show_section(Section::Responses, NavControl(2));
        let responses = [Some(true), Some(false), None]
            .into_iter()
            .enumerate()
            .map(|(i, would_recommend)| SurveyResponse {
                id: i as i64,
                submission_date: Some("2026-03-09T14:22:05".to_string()),
                client_name: Some(format!("Client {}", i)),
                client_email: None,
                overall_rating: Some(4.0),
                would_recommend,
            })
            .collect();
        controller.views.responses.state = ViewState::Ready(page(responses, 25, 3, 2));

        let text = screen(&controller);
        assert!(text.contains("Affichage de 3 réponses sur 25"));
        assert!(text.contains("09/03/2026 14:22"));
        assert!(text.contains("Oui"));
        assert!(text.contains("Non"));
        assert!(text.contains(" 1  "));
        assert!(text.contains(" 3 "));
    }

    #[test]
    // Page 9 of 3: no rows, but the summary and the links to real pages stay.
    fn test_responses_past_last_page_keeps_links() {
        let mut controller = controller();
        controller.show_section(Section::Responses, NavControl(2));
        controller.views.responses.state = ViewState::Ready(page(vec![], 25, 3, 9));

        let text = screen(&controller);
        assert!(text.contains("Affichage de 0 réponses sur 25"));
        assert!(text.contains("Pages:"));
        assert!(!text.contains("Aucune réponse trouvée"));
    }

    #[test]
    fn test_page_jump_prompt() {
        let mut controller = controller();
        controller.show_section(Section::Responses, NavControl(2));
        controller.views.responses.state = ViewState::Ready(page(vec![], 25, 3, 1));
        controller.views.responses.jump_input = Some("2".to_string());

        let text = screen(&controller);
        assert!(text.contains("Aller à la page: 2_"));
        assert!(text.contains("[Entrée] Aller"));
    }

    #[test]
    fn test_header_shows_loading_of_visible_section() {
        let mut controller = controller();
        controller.show_section(Section::Analytics, NavControl(3));
        controller.views.analytics.state = ViewState::Loading;
        assert!(screen(&controller).contains("⟳ Chargement"));

        controller.views.analytics.state = ViewState::Empty;
        assert!(!screen(&controller).contains("⟳ Chargement"));
    }

    #[test]
    fn test_hotels_table_placeholders() {
        let mut controller = controller();
        let mut with_form = hotel(2, "Les Pins");
        with_form.tally_form_url = Some("https://tally.so/r/abc".to_string());
        controller
            .registry
            .replace(vec![hotel(1, "Le Phare"), with_form]);
        controller.show_section(Section::Hotels, NavControl(1));

        let text = screen(&controller);
        assert!(text.contains("Le Phare"));
        assert!(text.contains("Non configuré"));
        assert!(text.contains("Non créé"));
        assert!(text.contains("https://tally.so/r/abc"));
    }

    #[test]
    fn test_hotels_table_empty() {
        let mut controller = controller();
        controller.show_section(Section::Hotels, NavControl(1));
        assert!(screen(&controller).contains("Aucun hôtel trouvé"));
    }

    #[test]
    fn test_inline_error_is_rendered() {
        let mut controller = controller();
        controller.show_section(Section::Analytics, NavControl(3));
        controller.views.analytics.state =
            ViewState::Failed("Erreur lors du chargement des graphiques".to_string());
        assert!(screen(&controller).contains("Erreur lors du chargement des graphiques"));
    }

    #[test]
    fn test_notifications_and_confirmation_overlay() {
        let mut controller = controller();
        controller.registry.replace(vec![hotel(1, "Le Phare")]);
        controller.show_section(Section::Hotels, NavControl(1));
        controller.request_delete();
        controller.notify(Severity::Success, "Hôtel créé");

        let text = screen(&controller);
        assert!(text.contains("SUCCESS"));
        assert!(text.contains("Hôtel créé"));
        assert!(text.contains("Êtes-vous sûr"));
        assert!(text.contains("[O] Confirmer"));
    }

    #[test]
    fn test_selected_hotel_label_is_shown() {
        let mut controller = controller();
        controller.registry.replace(vec![hotel(4, "Villa Azur")]);
        controller
            .registry
            .selector_mut(SelectorId::Dashboard)
            .select(Some(4));
        assert!(screen(&controller).contains("◀ Villa Azur ▶"));
    }
}
