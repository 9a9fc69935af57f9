use crate::model::card::Card;
use crate::model::player::{Player, PlayerId};
use crate::model::triple::Triple;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Refutation {
    pub refuter: Option<PlayerId>,
    pub shown: Option<Card>,
}

/// Asks the other active players, clockwise from the suggester, to disprove
/// `suggestion`. The first one holding a match shows one card, picked with
/// `rng` when several match, and nobody after it is asked.
///
/// Only the suggester's notebook is written: the shown card becomes
/// `ShownBy(refuter)`, or, with no refuter, every still-unknown suggested
/// card becomes `SuspectedClear`.
pub fn refute<R: Rng + ?Sized>(
    players: &mut [Player],
    suggester: PlayerId,
    suggestion: &Triple,
    rng: &mut R,
) -> Refutation {
    let player_count = players.len();
    let found = suggester
        .others_in_order(player_count)
        .filter(|seat| players[seat.index()].is_active())
        .find_map(|seat| {
            let matches = players[seat.index()].can_refute(suggestion);
            matches.choose(rng).copied().map(|card| (seat, card))
        });

    let notebook_owner = &mut players[suggester.index()];
    match found {
        Some((refuter, card)) => {
            notebook_owner.record_shown(card, refuter);
            event!(
                target: "clue_core::refutation",
                Level::INFO,
                suggester = %suggester,
                refuter = %refuter,
                message = "suggestion refuted"
            );
            Refutation {
                refuter: Some(refuter),
                shown: Some(card),
            }
        }
        None => {
            for card in suggestion.cards() {
                notebook_owner.record_suspected_clear(card);
            }
            event!(
                target: "clue_core::refutation",
                Level::INFO,
                suggester = %suggester,
                suggestion = %suggestion,
                message = "no one could refute"
            );
            Refutation::default()
        }
    }
}
