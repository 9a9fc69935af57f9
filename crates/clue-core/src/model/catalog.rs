use crate::model::card::{Card, Category, Character, Room, Weapon};
use serde::{Deserialize, Serialize};

/// The cards in play for one game, per category.
///
/// The classic board uses every character, weapon and room. Smaller catalogs
/// are accepted so that short games and tests can run on a reduced deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    characters: Vec<Character>,
    weapons: Vec<Weapon>,
    rooms: Vec<Room>,
}

impl Catalog {
    pub fn classic() -> Self {
        Self::new(
            Character::ALL.to_vec(),
            Weapon::ALL.to_vec(),
            Room::ALL.to_vec(),
        )
    }

    /// Duplicates are dropped; first occurrence wins.
    pub fn new(characters: Vec<Character>, weapons: Vec<Weapon>, rooms: Vec<Room>) -> Self {
        Self {
            characters: dedup(characters),
            weapons: dedup(weapons),
            rooms: dedup(rooms),
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.characters.len() + self.weapons.len() + self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn category_len(&self, category: Category) -> usize {
        match category {
            Category::Character => self.characters.len(),
            Category::Weapon => self.weapons.len(),
            Category::Room => self.rooms.len(),
        }
    }

    /// First category with no cards, if any.
    pub fn empty_category(&self) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|&category| self.category_len(category) == 0)
    }

    pub fn contains(&self, card: Card) -> bool {
        match card {
            Card::Character(c) => self.characters.contains(&c),
            Card::Weapon(w) => self.weapons.contains(&w),
            Card::Room(r) => self.rooms.contains(&r),
        }
    }

    /// Every card, characters first, then weapons, then rooms.
    pub fn cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.len());
        cards.extend(self.characters.iter().copied().map(Card::from));
        cards.extend(self.weapons.iter().copied().map(Card::from));
        cards.extend(self.rooms.iter().copied().map(Card::from));
        cards
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::classic()
    }
}

fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
