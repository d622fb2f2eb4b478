use dashb_core::Variant;
use serde::{Deserialize, Serialize};

/// A single pill in the agenda column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub day_label: String,
    pub title: String,
    pub detail: String,
}

impl AgendaEntry {
    pub fn new(
        day_label: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            day_label: day_label.into(),
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Fixed, in-memory list of upcoming events. Never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAgenda {
    entries: Vec<AgendaEntry>,
}

impl StaticAgenda {
    pub fn new(entries: Vec<AgendaEntry>) -> Self {
        Self { entries }
    }

    /// The household's seeded events.
    pub fn seeded() -> Self {
        Self::new(vec![
            AgendaEntry::new("LUNEDÌ 9 FEBBRAIO", "Ferie Niko", "Tutto il giorno"),
            AgendaEntry::new("DOMANI", "Cena San Valentino", "20:00 · Casa Brigandi"),
            AgendaEntry::new("DOMENICA 15 FEBBRAIO", "Music Session", "Tutto il giorno"),
            AgendaEntry::new("LUNEDÌ 16 FEBBRAIO", "Assente LR", "09:00 · Ufficio"),
        ])
    }

    /// Seeded agenda for variants that show one, empty otherwise.
    pub fn for_variant(variant: Variant) -> Self {
        if variant.shows_agenda() {
            Self::seeded()
        } else {
            Self::default()
        }
    }

    pub fn entries(&self) -> &[AgendaEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
