use crate::model::card::{Card, Character, Room, Weapon};
use core::fmt;
use serde::{Deserialize, Serialize};

/// One character, one weapon, one room: the shape of the hidden solution,
/// of every suggestion and of every accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub character: Character,
    pub weapon: Weapon,
    pub room: Room,
}

impl Triple {
    pub const fn new(character: Character, weapon: Weapon, room: Room) -> Self {
        Self {
            character,
            weapon,
            room,
        }
    }

    pub const fn cards(self) -> [Card; 3] {
        [
            Card::Character(self.character),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }

    pub fn contains(self, card: Card) -> bool {
        self.cards().contains(&card)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with the {} in the {}", self.character, self.weapon, self.room)
    }
}
