use crate::game::error::{ConfigurationError, MIN_PLAYERS};
use crate::model::card::{Card, Category};
use crate::model::catalog::Catalog;
use crate::model::hand::Hand;
use crate::model::triple::Triple;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// The sealed solution plus one hand per seat, together with the catalog
/// they partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    catalog: Catalog,
    solution: Triple,
    hands: Vec<Hand>,
}

impl Deal {
    /// Draws the solution (character, then weapon, then room), shuffles the
    /// remaining cards and deals them round-robin from seat 0, so hand sizes
    /// differ by at most one.
    pub fn generate<R: Rng + ?Sized>(
        catalog: &Catalog,
        player_count: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if let Some(category) = catalog.empty_category() {
            return Err(ConfigurationError::EmptyCategory(category));
        }
        if player_count < MIN_PLAYERS {
            return Err(ConfigurationError::TooFewPlayers {
                count: player_count,
            });
        }

        let character = *catalog
            .characters()
            .choose(rng)
            .ok_or(ConfigurationError::EmptyCategory(Category::Character))?;
        let weapon = *catalog
            .weapons()
            .choose(rng)
            .ok_or(ConfigurationError::EmptyCategory(Category::Weapon))?;
        let room = *catalog
            .rooms()
            .choose(rng)
            .ok_or(ConfigurationError::EmptyCategory(Category::Room))?;
        let solution = Triple::new(character, weapon, room);

        let mut remaining: Vec<Card> = catalog
            .cards()
            .into_iter()
            .filter(|card| !solution.contains(*card))
            .collect();
        remaining.shuffle(rng);

        let mut hands: Vec<Hand> = (0..player_count).map(|_| Hand::new()).collect();
        for (index, card) in remaining.into_iter().enumerate() {
            hands[index % player_count].add(card);
        }

        Ok(Self {
            catalog: catalog.clone(),
            solution,
            hands,
        })
    }

    /// A prearranged deal. Must partition `catalog` exactly.
    pub fn fixed(
        catalog: &Catalog,
        solution: Triple,
        hands: Vec<Hand>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(category) = catalog.empty_category() {
            return Err(ConfigurationError::EmptyCategory(category));
        }
        if hands.len() < MIN_PLAYERS {
            return Err(ConfigurationError::TooFewPlayers { count: hands.len() });
        }

        let mut seen = HashSet::with_capacity(catalog.len());
        let dealt = solution
            .cards()
            .into_iter()
            .chain(hands.iter().flat_map(|hand| hand.iter().copied()));
        for card in dealt {
            if !catalog.contains(card) || !seen.insert(card) {
                return Err(ConfigurationError::MisdealtCard(card));
            }
        }
        if let Some(missing) = catalog.cards().into_iter().find(|card| !seen.contains(card)) {
            return Err(ConfigurationError::UndealtCard(missing));
        }

        Ok(Self {
            catalog: catalog.clone(),
            solution,
            hands,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn solution(&self) -> Triple {
        self.solution
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub(crate) fn into_parts(self) -> (Catalog, Triple, Vec<Hand>) {
        (self.catalog, self.solution, self.hands)
    }
}
