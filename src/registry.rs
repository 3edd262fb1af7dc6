//! Hotel registry cache
//!
//! The session-wide copy of the hotel list, plus every hotel selector shown in
//! the console. Replacing the list always resynchronises the selectors in the
//! same step, so no reader ever sees a selector offering a deleted hotel.

use crate::api::HotelApi;
use crate::api::error::ApiError;
use crate::api::types::{Hotel, HotelId};

/// The hotel selectors of the console, one per place a hotel is picked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SelectorId {
    Dashboard = 0,
    Responses = 1,
    Analytics = 2,
    Export = 3,
    Automation = 4,
    WebhookTest = 5,
}

impl SelectorId {
    pub const ALL: [SelectorId; 6] = [
        SelectorId::Dashboard,
        SelectorId::Responses,
        SelectorId::Analytics,
        SelectorId::Export,
        SelectorId::Automation,
        SelectorId::WebhookTest,
    ];

    /// Label of the fixed first option, meaning "no hotel".
    pub fn placeholder(&self) -> &'static str {
        match self {
            SelectorId::Dashboard | SelectorId::Responses | SelectorId::Analytics => {
                "Sélectionner un hôtel..."
            }
            SelectorId::Export => "Choisir un hôtel à exporter...",
            SelectorId::Automation => "Choisir l'hôtel à automatiser...",
            SelectorId::WebhookTest => "Choisir l'hôtel à tester...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: HotelId,
    pub label: String,
}

/// A dropdown of hotels: a placeholder followed by one option per hotel.
#[derive(Debug, Clone)]
pub struct Selector {
    placeholder: &'static str,
    options: Vec<SelectorOption>,
    selected: Option<HotelId>,
}

impl Selector {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            options: Vec::new(),
            selected: None,
        }
    }

    /// Drop every option but the placeholder and add one per hotel.
    ///
    /// The current choice is kept when its hotel still exists.
    pub fn repopulate(&mut self, hotels: &[Hotel]) {
        self.options = hotels
            .iter()
            .map(|hotel| SelectorOption {
                value: hotel.id,
                label: hotel.name.clone(),
            })
            .collect();
        if let Some(id) = self.selected {
            if !self.options.iter().any(|o| o.value == id) {
                self.selected = None;
            }
        }
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<HotelId> {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        self.selected
            .and_then(|id| self.options.iter().find(|o| o.value == id))
            .map(|o| o.label.as_str())
            .unwrap_or(self.placeholder)
    }

    /// Pick an option by value; `None` or an unknown id selects the placeholder.
    #[cfg(test)]
    pub fn select(&mut self, id: Option<HotelId>) {
        self.selected = id.filter(|id| self.options.iter().any(|o| o.value == *id));
    }

    /// Move to the next option, wrapping through the placeholder.
    pub fn select_next(&mut self) {
        let position = self.position();
        let next = (position + 1) % (self.options.len() + 1);
        self.select_position(next);
    }

    /// Move to the previous option, wrapping through the placeholder.
    pub fn select_previous(&mut self) {
        let len = self.options.len() + 1;
        let previous = (self.position() + len - 1) % len;
        self.select_position(previous);
    }

    /// Position 0 is the placeholder.
    fn position(&self) -> usize {
        self.selected
            .and_then(|id| self.options.iter().position(|o| o.value == id))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn select_position(&mut self, position: usize) {
        self.selected = match position {
            0 => None,
            n => self.options.get(n - 1).map(|o| o.value),
        };
    }
}

#[derive(Debug)]
pub struct HotelRegistry {
    hotels: Vec<Hotel>,
    /// Indexed by `SelectorId as usize`.
    selectors: [Selector; 6],
}

impl HotelRegistry {
    pub fn new() -> Self {
        Self {
            hotels: Vec::new(),
            selectors: SelectorId::ALL.map(|id| Selector::new(id.placeholder())),
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn find(&self, id: HotelId) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    /// Replace the cached list and resync every selector.
    pub fn replace(&mut self, hotels: Vec<Hotel>) {
        self.hotels = hotels;
        self.sync_selectors();
    }

    /// Repopulate every registered selector from the cached list.
    pub fn sync_selectors(&mut self) {
        for selector in self.selectors.iter_mut() {
            selector.repopulate(&self.hotels);
        }
    }

    /// Repopulate some selectors from the cached list.
    pub fn sync(&mut self, ids: &[SelectorId]) {
        for id in ids {
            self.selectors[*id as usize].repopulate(&self.hotels);
        }
    }

    pub fn selector(&self, id: SelectorId) -> &Selector {
        &self.selectors[id as usize]
    }

    pub fn selector_mut(&mut self, id: SelectorId) -> &mut Selector {
        &mut self.selectors[id as usize]
    }

    pub fn selected(&self, id: SelectorId) -> Option<HotelId> {
        self.selector(id).selected()
    }

    /// Apply the outcome of a hotel list fetch. On failure the cache is kept.
    pub fn apply_fetch(&mut self, result: Result<Vec<Hotel>, ApiError>) -> Result<usize, ApiError> {
        let hotels = result?;
        let count = hotels.len();
        self.replace(hotels);
        Ok(count)
    }

    /// Fetch the hotel list and replace the cache.
    pub async fn refresh(&mut self, api: &dyn HotelApi) -> Result<usize, ApiError> {
        let result = api.list_hotels().await;
        self.apply_fetch(result)
    }
}

impl Default for HotelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::MockHotelApi;

    pub(crate) fn hotel(id: HotelId, name: &str) -> Hotel {
        Hotel {
            id,
            name: name.to_string(),
            location: None,
            tally_form_url: None,
            google_sheet_url: None,
        }
    }

    fn option_ids(registry: &HotelRegistry, id: SelectorId) -> Vec<HotelId> {
        registry
            .selector(id)
            .options()
            .iter()
            .map(|o| o.value)
            .collect()
    }

    #[test]
    // After any sequence of creates and deletes every selector mirrors the server set.
    fn test_selectors_follow_every_replacement() {
        let mut registry = HotelRegistry::new();
        let mut server = vec![hotel(1, "Le Phare")];

        let steps: Vec<Box<dyn Fn(&mut Vec<Hotel>)>> = vec![
            Box::new(|s| s.push(hotel(2, "Les Pins"))),
            Box::new(|s| s.push(hotel(3, "Villa Azur"))),
            Box::new(|s| s.retain(|h| h.id != 1)),
            Box::new(|s| s.clear()),
            Box::new(|s| s.push(hotel(4, "Mas Provençal"))),
        ];

        for step in steps {
            step(&mut server);
            registry.replace(server.clone());

            let expected: Vec<HotelId> = server.iter().map(|h| h.id).collect();
            for id in SelectorId::ALL {
                assert_eq!(option_ids(&registry, id), expected, "selector {:?}", id);
                assert_eq!(registry.selector(id).placeholder(), id.placeholder());
            }
        }
    }

    #[test]
    fn test_option_labels_are_hotel_names() {
        let mut registry = HotelRegistry::new();
        registry.replace(vec![hotel(7, "Hôtel du Lac")]);
        assert_eq!(
            registry.selector(SelectorId::Export).options(),
            &[SelectorOption {
                value: 7,
                label: "Hôtel du Lac".to_string()
            }]
        );
    }

    #[test]
    // A choice survives a resync only while its hotel exists.
    fn test_selection_survives_only_existing_hotels() {
        let mut registry = HotelRegistry::new();
        registry.replace(vec![hotel(1, "A"), hotel(2, "B")]);
        registry.selector_mut(SelectorId::Dashboard).select(Some(2));
        registry.selector_mut(SelectorId::Responses).select(Some(1));

        registry.replace(vec![hotel(2, "B"), hotel(3, "C")]);

        assert_eq!(registry.selected(SelectorId::Dashboard), Some(2));
        assert_eq!(registry.selected(SelectorId::Responses), None);
        assert_eq!(
            registry.selector(SelectorId::Responses).selected_label(),
            "Sélectionner un hôtel..."
        );
    }

    #[test]
    fn test_selector_cycles_through_placeholder() {
        let mut selector = Selector::new("--");
        selector.repopulate(&[hotel(1, "A"), hotel(2, "B")]);

        selector.select_next();
        assert_eq!(selector.selected(), Some(1));
        selector.select_next();
        assert_eq!(selector.selected(), Some(2));
        selector.select_next();
        assert_eq!(selector.selected(), None);
        selector.select_previous();
        assert_eq!(selector.selected(), Some(2));

        selector.select(Some(99));
        assert_eq!(selector.selected(), None);
    }

    #[tokio::test]
    // A failed refresh leaves the previous list and selectors in place.
    async fn test_failed_refresh_keeps_cache() {
        let mut registry = HotelRegistry::new();
        registry.replace(vec![hotel(1, "Le Phare")]);

        let mut api = MockHotelApi::new();
        api.expect_list_hotels().times(1).returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: Some("Erreur serveur".to_string()),
            })
        });

        assert!(registry.refresh(&api).await.is_err());
        assert_eq!(registry.hotels().len(), 1);
        assert_eq!(option_ids(&registry, SelectorId::Analytics), vec![1]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache() {
        let mut registry = HotelRegistry::new();
        let mut api = MockHotelApi::new();
        api.expect_list_hotels()
            .returning(|| Ok(vec![hotel(1, "A"), hotel(2, "B")]));

        assert_eq!(registry.refresh(&api).await.unwrap(), 2);
        assert_eq!(option_ids(&registry, SelectorId::WebhookTest), vec![1, 2]);
    }
}
