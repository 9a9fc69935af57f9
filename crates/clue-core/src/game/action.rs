use crate::game::error::GameError;
use crate::model::card::{Card, Character, Room, Weapon};
use crate::model::notebook::Entry;
use crate::model::player::PlayerId;
use crate::model::triple::Triple;

/// One request from the seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Room),
    /// The room is the suggester's current room.
    Suggest { character: Character, weapon: Weapon },
    Accuse(Triple),
    InspectNotebook,
}

impl Action {
    /// Mutating actions are bound to the turn cursor.
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Action::InspectNotebook)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Moved {
        room: Room,
    },
    Suggested {
        suggestion: Triple,
        refuter: Option<PlayerId>,
        shown: Option<Card>,
    },
    Accused {
        accusation: Triple,
        correct: bool,
    },
    NotebookSnapshot {
        player: PlayerId,
        entries: Vec<(Card, Entry)>,
    },
    Rejected {
        reason: GameError,
    },
}

impl ActionResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ActionResult::Rejected { .. })
    }

    pub fn rejection(&self) -> Option<GameError> {
        match self {
            ActionResult::Rejected { reason } => Some(*reason),
            _ => None,
        }
    }
}

impl From<GameError> for ActionResult {
    fn from(reason: GameError) -> Self {
        ActionResult::Rejected { reason }
    }
}
