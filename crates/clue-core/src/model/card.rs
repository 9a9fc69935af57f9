use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Character,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Character, Category::Weapon, Category::Room];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Character => "character",
            Category::Weapon => "weapon",
            Category::Room => "room",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Character {
    MissScarlett = 0,
    ColonelMustard = 1,
    MrsWhite = 2,
    ReverendGreen = 3,
    MrsPeacock = 4,
    ProfessorPlum = 5,
}

impl Character {
    pub const ALL: [Character; 6] = [
        Character::MissScarlett,
        Character::ColonelMustard,
        Character::MrsWhite,
        Character::ReverendGreen,
        Character::MrsPeacock,
        Character::ProfessorPlum,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Character::MissScarlett => "Miss Scarlett",
            Character::ColonelMustard => "Colonel Mustard",
            Character::MrsWhite => "Mrs. White",
            Character::ReverendGreen => "Reverend Green",
            Character::MrsPeacock => "Mrs. Peacock",
            Character::ProfessorPlum => "Professor Plum",
        }
    }

    /// Single-word form accepted on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Character::MissScarlett => "scarlett",
            Character::ColonelMustard => "mustard",
            Character::MrsWhite => "white",
            Character::ReverendGreen => "green",
            Character::MrsPeacock => "peacock",
            Character::ProfessorPlum => "plum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weapon {
    Candlestick = 0,
    Dagger = 1,
    LeadPipe = 2,
    Revolver = 3,
    Rope = 4,
    Wrench = 5,
}

impl Weapon {
    pub const ALL: [Weapon; 6] = [
        Weapon::Candlestick,
        Weapon::Dagger,
        Weapon::LeadPipe,
        Weapon::Revolver,
        Weapon::Rope,
        Weapon::Wrench,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Weapon::Candlestick => "Candlestick",
            Weapon::Dagger => "Dagger",
            Weapon::LeadPipe => "Lead Pipe",
            Weapon::Revolver => "Revolver",
            Weapon::Rope => "Rope",
            Weapon::Wrench => "Wrench",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Weapon::Candlestick => "candlestick",
            Weapon::Dagger => "dagger",
            Weapon::LeadPipe => "lead-pipe",
            Weapon::Revolver => "revolver",
            Weapon::Rope => "rope",
            Weapon::Wrench => "wrench",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Room {
    Kitchen = 0,
    Ballroom = 1,
    Conservatory = 2,
    DiningRoom = 3,
    BilliardRoom = 4,
    Library = 5,
    Lounge = 6,
    Hall = 7,
    Study = 8,
}

impl Room {
    pub const ALL: [Room; 9] = [
        Room::Kitchen,
        Room::Ballroom,
        Room::Conservatory,
        Room::DiningRoom,
        Room::BilliardRoom,
        Room::Library,
        Room::Lounge,
        Room::Hall,
        Room::Study,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Room::Kitchen => "Kitchen",
            Room::Ballroom => "Ballroom",
            Room::Conservatory => "Conservatory",
            Room::DiningRoom => "Dining Room",
            Room::BilliardRoom => "Billiard Room",
            Room::Library => "Library",
            Room::Lounge => "Lounge",
            Room::Hall => "Hall",
            Room::Study => "Study",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Room::Kitchen => "kitchen",
            Room::Ballroom => "ballroom",
            Room::Conservatory => "conservatory",
            Room::DiningRoom => "dining-room",
            Room::BilliardRoom => "billiard-room",
            Room::Library => "library",
            Room::Lounge => "lounge",
            Room::Hall => "hall",
            Room::Study => "study",
        }
    }
}

/// One card of the deck. Every card belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Character(Character),
    Weapon(Weapon),
    Room(Room),
}

impl Card {
    pub const fn category(self) -> Category {
        match self {
            Card::Character(_) => Category::Character,
            Card::Weapon(_) => Category::Weapon,
            Card::Room(_) => Category::Room,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Card::Character(c) => c.name(),
            Card::Weapon(w) => w.name(),
            Card::Room(r) => r.name(),
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Card::Character(c) => c.slug(),
            Card::Weapon(w) => w.slug(),
            Card::Room(r) => r.slug(),
        }
    }
}

impl From<Character> for Card {
    fn from(value: Character) -> Self {
        Card::Character(value)
    }
}

impl From<Weapon> for Card {
    fn from(value: Weapon) -> Self {
        Card::Weapon(value)
    }
}

impl From<Room> for Card {
    fn from(value: Room) -> Self {
        Card::Room(value)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {expected} '{input}'")]
pub struct ParseCardError {
    pub expected: &'static str,
    pub input: String,
}

/// Lowercase and drop everything but letters and digits, so "Mrs. White",
/// "mrs-white" and "MRSWHITE" compare equal.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn lookup<T: Copy>(
    input: &str,
    candidates: &[T],
    names: impl Fn(T) -> [&'static str; 2],
    expected: &'static str,
) -> Result<T, ParseCardError> {
    let wanted = normalize(input);
    candidates
        .iter()
        .copied()
        .find(|&candidate| {
            !wanted.is_empty() && names(candidate).iter().any(|n| normalize(n) == wanted)
        })
        .ok_or_else(|| ParseCardError {
            expected,
            input: input.trim().to_string(),
        })
}

impl FromStr for Character {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &Character::ALL, |c| [c.name(), c.slug()], "character")
    }
}

impl FromStr for Weapon {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &Weapon::ALL, |w| [w.name(), w.slug()], "weapon")
    }
}

impl FromStr for Room {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &Room::ALL, |r| [r.name(), r.slug()], "room")
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Character>()
            .map(Card::from)
            .or_else(|_| s.parse::<Weapon>().map(Card::from))
            .or_else(|_| s.parse::<Room>().map(Card::from))
            .map_err(|_| ParseCardError {
                expected: "card",
                input: s.trim().to_string(),
            })
    }
}
