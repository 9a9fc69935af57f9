use crate::model::card::{Card, Room};
use crate::model::catalog::Catalog;
use crate::model::hand::Hand;
use crate::model::notebook::Notebook;
use crate::model::triple::Triple;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index of a player, stable for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Every seat after `self`, clockwise, ending just before `self`.
    pub fn others_in_order(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..player_count).map(move |offset| PlayerId((self.0 + offset) % player_count))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    hand: Hand,
    notebook: Notebook,
    active: bool,
    current_room: Option<Room>,
}

impl Player {
    pub fn new(id: PlayerId, hand: Hand, catalog: &Catalog) -> Self {
        let notebook = Notebook::new(catalog, &hand);
        Self {
            id,
            hand,
            notebook,
            active: true,
            current_room: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_room(&self) -> Option<Room> {
        self.current_room
    }

    /// Cards of `suggestion` this player holds, in suggestion order.
    pub fn can_refute(&self, suggestion: &Triple) -> Vec<Card> {
        suggestion
            .cards()
            .into_iter()
            .filter(|card| self.hand.contains(*card))
            .collect()
    }

    pub fn record_shown(&mut self, card: Card, by: PlayerId) -> bool {
        self.notebook.record_shown(card, by)
    }

    pub fn record_suspected_clear(&mut self, card: Card) -> bool {
        self.notebook.record_suspected_clear(card)
    }

    pub(crate) fn move_to(&mut self, room: Room) {
        self.current_room = Some(room);
    }

    pub(crate) fn eliminate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerId};
    use crate::model::card::{Card, Character, Room, Weapon};
    use crate::model::catalog::Catalog;
    use crate::model::hand::Hand;
    use crate::model::notebook::Entry;
    use crate::model::triple::Triple;

    fn player_with(cards: Vec<Card>) -> Player {
        Player::new(PlayerId::new(1), Hand::with_cards(cards), &Catalog::classic())
    }

    #[test]
    fn others_in_order_wraps_and_skips_self() {
        let order: Vec<_> = PlayerId::new(2).others_in_order(4).collect();
        assert_eq!(order, vec![PlayerId::new(3), PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(PlayerId::new(0).others_in_order(0).count(), 0);
    }

    #[test]
    fn new_player_is_active_without_a_room() {
        let player = player_with(vec![Card::from(Weapon::Dagger)]);
        assert!(player.is_active());
        assert_eq!(player.current_room(), None);
        assert_eq!(
            player.notebook().get(Card::from(Weapon::Dagger)),
            Some(Entry::Owned)
        );
    }

    #[test]
    fn can_refute_returns_only_held_suggestion_cards() {
        let player = player_with(vec![
            Card::from(Character::MrsWhite),
            Card::from(Room::Library),
            Card::from(Weapon::Revolver),
        ]);
        let suggestion = Triple::new(Character::MrsWhite, Weapon::Rope, Room::Library);
        assert_eq!(
            player.can_refute(&suggestion),
            vec![Card::from(Character::MrsWhite), Card::from(Room::Library)]
        );

        let miss = Triple::new(Character::MrsPeacock, Weapon::Rope, Room::Hall);
        assert!(player.can_refute(&miss).is_empty());
    }

    #[test]
    fn recording_only_touches_own_notebook() {
        let mut player = player_with(vec![]);
        let rope = Card::from(Weapon::Rope);
        assert!(player.record_shown(rope, PlayerId::new(0)));
        assert_eq!(
            player.notebook().get(rope),
            Some(Entry::ShownBy(PlayerId::new(0)))
        );
    }

    #[test]
    fn elimination_is_permanent() {
        let mut player = player_with(vec![]);
        player.move_to(Room::Kitchen);
        player.eliminate();
        assert!(!player.is_active());
        assert_eq!(player.current_room(), Some(Room::Kitchen));
    }
}
