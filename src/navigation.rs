//! Section switching
//!
//! Exactly one section is visible at a time. Switching marks the navigation
//! control the caller passes in as active; nothing is read from ambient state.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Hotels,
    Responses,
    Analytics,
    Reports,
    Automation,
}

/// Routine run when a section is shown, to refresh what it draws from the cache.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Rebuild the hotels table.
    HotelsTable,
    /// Resync the export selector.
    ReportSelectors,
    /// Resync the automation and webhook-test selectors, reload webhook status.
    AutomationSelectors,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Hotels,
        Section::Responses,
        Section::Analytics,
        Section::Reports,
        Section::Automation,
    ];

    /// Identifier accepted by `--section`.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Hotels => "hotels",
            Section::Responses => "responses",
            Section::Analytics => "analytics",
            Section::Reports => "reports",
            Section::Automation => "automation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Tableau de bord",
            Section::Hotels => "Hôtels",
            Section::Responses => "Réponses",
            Section::Analytics => "Analyses",
            Section::Reports => "Rapports",
            Section::Automation => "Automatisation",
        }
    }

    pub fn index(&self) -> usize {
        Section::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn previous(&self) -> Section {
        let len = Section::ALL.len();
        Section::ALL[(self.index() + len - 1) % len]
    }

    pub fn refresh_routine(&self) -> Option<Refresh> {
        match self {
            Section::Hotels => Some(Refresh::HotelsTable),
            Section::Reports => Some(Refresh::ReportSelectors),
            Section::Automation => Some(Refresh::AutomationSelectors),
            Section::Dashboard | Section::Responses | Section::Analytics => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown section '{0}' (expected one of: {known})", known = known_ids())]
pub struct UnknownSection(pub String);

fn known_ids() -> String {
    let known: Vec<&str> = Section::ALL.iter().map(|s| s.id()).collect();
    known.join(", ")
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::ALL
            .iter()
            .find(|section| section.id() == wanted)
            .copied()
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// A navigation control: the tab the user activated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavControl(pub usize);

impl NavControl {
    /// The tab that leads to `section`.
    pub fn for_section(section: Section) -> Self {
        NavControl(section.index())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    visible: Section,
    active_control: NavControl,
}

impl Navigation {
    pub fn new(initial: Section) -> Self {
        Self {
            visible: initial,
            active_control: NavControl::for_section(initial),
        }
    }

    /// Show `section`, hide every other one and mark `control` as active.
    ///
    /// Returns the refresh routine the caller must run for the new section.
    pub fn show(&mut self, section: Section, control: NavControl) -> Option<Refresh> {
        self.visible = section;
        self.active_control = control;
        section.refresh_routine()
    }

    pub fn visible(&self) -> Section {
        self.visible
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.visible == section
    }

    pub fn active_control(&self) -> NavControl {
        self.active_control
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(Section::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hides_every_other_section() {
        let mut nav = Navigation::default();
        let routine = nav.show(Section::Hotels, NavControl(1));

        assert_eq!(routine, Some(Refresh::HotelsTable));
        for section in Section::ALL {
            assert_eq!(nav.is_visible(section), section == Section::Hotels);
        }
        assert_eq!(nav.active_control(), NavControl(1));
    }

    #[test]
    // The control passed in is marked active even if it is not the section's own tab.
    fn test_active_control_is_the_one_passed() {
        let mut nav = Navigation::default();
        nav.show(Section::Reports, NavControl(0));
        assert_eq!(nav.active_control(), NavControl(0));
        assert_eq!(nav.visible(), Section::Reports);
    }

    #[test]
    fn test_sections_without_routine() {
        let mut nav = Navigation::default();
        assert_eq!(nav.show(Section::Responses, NavControl(2)), None);
        assert_eq!(nav.show(Section::Dashboard, NavControl(0)), None);
        assert_eq!(
            nav.show(Section::Automation, NavControl(5)),
            Some(Refresh::AutomationSelectors)
        );
    }

    #[test]
    fn test_parse_section_ids() {
        assert_eq!("reports".parse::<Section>(), Ok(Section::Reports));
        assert_eq!(" Analytics ".parse::<Section>(), Ok(Section::Analytics));

        let err = "settings".parse::<Section>().unwrap_err();
        assert_eq!(err, UnknownSection("settings".to_string()));
        assert!(err.to_string().contains("dashboard, hotels"));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(Section::Automation.next(), Section::Dashboard);
        assert_eq!(Section::Dashboard.previous(), Section::Automation);
        assert_eq!(Section::Hotels.next(), Section::Responses);
    }
}
