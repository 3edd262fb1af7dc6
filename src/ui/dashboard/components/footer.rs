//! Dashboard footer component
//!
//! Renders the key bindings of the visible section

use crate::controller::{Controller, Modal};
use crate::navigation::Section;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_hints(controller: &Controller) -> &'static str {
    match &controller.modal {
        Some(Modal::AddHotel(_)) => return "[Tab] Champ suivant | [Entrée] Créer | [Échap] Annuler",
        Some(Modal::ConfirmDelete { .. }) => return "[O] Confirmer | [N] Annuler",
        None => {}
    }
    if controller.views.automation.editing {
        return "[Entrée] Enregistrer | [Échap] Terminer la saisie";
    }
    if controller.navigation.is_visible(Section::Responses)
        && controller.views.responses.jump_input.is_some()
    {
        return "[0-9] Numéro de page | [Entrée] Aller | [Échap] Annuler";
    }
    match controller.navigation.visible() {
        Section::Dashboard | Section::Analytics => {
            "[Q] Quitter | [Tab] Section | [ ] Hôtel | [R] Recharger | [X] Fermer notif."
        }
        Section::Hotels => "[Q] Quitter | [Tab] Section | [A] Ajouter | [D] Supprimer | [R] Recharger",
        Section::Responses => {
            "[Q] Quitter | [Tab] Section | [ ] Hôtel | [←→] Page | [G] Aller à | [R] Recharger"
        }
        Section::Reports => "[Q] Quitter | [Tab] Section | [ ] Hôtel | [E] Exporter | [G] Rapport global",
        Section::Automation => {
            "[Q] Quitter | [ ] Hôtel | [E] Saisir l'URL | [{ }] Hôtel test | [T] Tester"
        }
    }
}

/// Render the footer.
pub fn render_footer(f: &mut Frame, area: Rect, controller: &Controller) {
    let footer = Paragraph::new(key_hints(controller))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
