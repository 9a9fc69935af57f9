use crate::model::card::{Card, Category};
use crate::model::catalog::Catalog;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one player knows about one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    Unknown,
    /// In the notebook owner's own hand.
    Owned,
    /// Revealed privately by another player during a refutation.
    ShownBy(PlayerId),
    /// Suggested and nobody refuted it. A hint, not proof.
    SuspectedClear,
}

impl Entry {
    pub const fn is_known(self) -> bool {
        !matches!(self, Entry::Unknown)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Unknown => f.write_str("Unknown"),
            Entry::Owned => f.write_str("Owned"),
            Entry::ShownBy(player) => write!(f, "Shown by {player}"),
            Entry::SuspectedClear => f.write_str("Suspected clear (no refuter)"),
        }
    }
}

/// Per-player knowledge over every card in the catalog.
///
/// Entries only ever move away from [`Entry::Unknown`]. Direct evidence
/// (`ShownBy`) may replace the `SuspectedClear` heuristic; nothing replaces
/// `Owned` or an earlier `ShownBy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notebook {
    entries: BTreeMap<Card, Entry>,
}

impl Notebook {
    pub fn new(catalog: &Catalog, hand: &Hand) -> Self {
        let mut entries: BTreeMap<Card, Entry> = catalog
            .cards()
            .into_iter()
            .map(|card| (card, Entry::Unknown))
            .collect();
        for card in hand.iter() {
            if let Some(entry) = entries.get_mut(card) {
                *entry = Entry::Owned;
            }
        }
        Self { entries }
    }

    pub fn get(&self, card: Card) -> Option<Entry> {
        self.entries.get(&card).copied()
    }

    /// Returns true if the entry changed.
    pub fn record_shown(&mut self, card: Card, by: PlayerId) -> bool {
        let Some(entry) = self.entries.get_mut(&card) else {
            return false;
        };
        if matches!(entry, Entry::Unknown | Entry::SuspectedClear) {
            *entry = Entry::ShownBy(by);
            true
        } else {
            false
        }
    }

    /// Returns true if the entry changed.
    pub fn record_suspected_clear(&mut self, card: Card) -> bool {
        let Some(entry) = self.entries.get_mut(&card) else {
            return false;
        };
        if *entry == Entry::Unknown {
            *entry = Entry::SuspectedClear;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Card, Entry)> + '_ {
        self.entries.iter().map(|(card, entry)| (*card, *entry))
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = (Card, Entry)> + '_ {
        self.iter().filter(move |(card, _)| card.category() == category)
    }

    pub fn entries(&self) -> Vec<(Card, Entry)> {
        self.iter().collect()
    }

    pub fn unknown_count(&self) -> usize {
        self.entries.values().filter(|entry| !entry.is_known()).count()
    }
}
