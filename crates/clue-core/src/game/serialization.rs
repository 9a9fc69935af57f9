use crate::game::state::{Game, GameStatus};
use crate::model::card::Room;
use crate::model::player::PlayerId;
use rand::Rng;
use serde::Serialize;

/// Public view of the table: what everybody sitting at it can see.
/// Never carries the solution or anybody's cards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSnapshot {
    pub status: GameStatus,
    pub winner: Option<PlayerId>,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub seats: Vec<SeatView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeatView {
    pub player: PlayerId,
    pub active: bool,
    pub room: Option<Room>,
    pub hand_size: usize,
}

impl TableSnapshot {
    pub fn capture<R: Rng>(game: &Game<R>) -> Self {
        let seats = game
            .players()
            .iter()
            .map(|player| SeatView {
                player: player.id(),
                active: player.is_active(),
                room: player.current_room(),
                hand_size: player.hand().len(),
            })
            .collect();

        TableSnapshot {
            status: game.status(),
            winner: game.winner(),
            current_player: game.current_player(),
            turn_number: game.turn_number(),
            seats,
        }
    }

    pub fn to_json<R: Rng>(game: &Game<R>) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }
}
