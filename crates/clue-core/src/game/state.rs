use crate::game::action::{Action, ActionResult};
use crate::game::deal::Deal;
use crate::game::error::{ConfigurationError, GameError};
use crate::game::refutation::refute;
use crate::model::card::{Card, Character, Room, Weapon};
use crate::model::catalog::Catalog;
use crate::model::hand::Hand;
use crate::model::notebook::Notebook;
use crate::model::player::{Player, PlayerId};
use crate::model::triple::Triple;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(PlayerId),
    AllEliminated,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// The whole table: sealed solution, seats, turn cursor and status.
///
/// All mutation goes through [`Game::dispatch`]. A rejected action leaves
/// every field untouched.
#[derive(Debug, Clone)]
pub struct Game<R: Rng = StdRng> {
    catalog: Catalog,
    solution: Triple,
    players: Vec<Player>,
    current: PlayerId,
    status: GameStatus,
    turn_number: u32,
    rng: R,
    seed: Option<u64>,
}

impl Game<StdRng> {
    pub fn new(player_count: usize) -> Result<Self, ConfigurationError> {
        let seed: u64 = rand::random();
        Self::with_seed(player_count, seed)
    }

    pub fn with_seed(player_count: usize, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_catalog_seed(Catalog::classic(), player_count, seed)
    }

    pub fn with_catalog_seed(
        catalog: Catalog,
        player_count: usize,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        let mut game = Self::with_catalog(catalog, player_count, StdRng::seed_from_u64(seed))?;
        game.seed = Some(seed);
        Ok(game)
    }
}

impl<R: Rng> Game<R> {
    /// Classic board with an injected randomness source.
    pub fn with_rng(player_count: usize, rng: R) -> Result<Self, ConfigurationError> {
        Self::with_catalog(Catalog::classic(), player_count, rng)
    }

    pub fn with_catalog(
        catalog: Catalog,
        player_count: usize,
        mut rng: R,
    ) -> Result<Self, ConfigurationError> {
        let deal = Deal::generate(&catalog, player_count, &mut rng)?;
        Ok(Self::from_deal(deal, rng))
    }

    /// Starts from a prearranged deal, on the catalog the deal was checked
    /// against. `rng` is only used for refutation choices from here on.
    pub fn from_deal(deal: Deal, rng: R) -> Self {
        let (catalog, solution, hands) = deal.into_parts();
        let players: Vec<Player> = hands
            .into_iter()
            .enumerate()
            .map(|(seat, hand)| Player::new(PlayerId::new(seat), hand, &catalog))
            .collect();

        event!(
            target: "clue_core::game",
            Level::DEBUG,
            players = players.len(),
            solution = %solution,
            message = "case file sealed"
        );

        Self {
            catalog,
            solution,
            players,
            current: PlayerId::new(0),
            status: GameStatus::InProgress,
            turn_number: 1,
            rng,
            seed: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// The solution is only revealed once nobody can act on it.
    pub fn revealed_solution(&self) -> Option<Triple> {
        self.is_terminal().then_some(self.solution)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn hand(&self, id: PlayerId) -> Option<&Hand> {
        self.player(id).map(Player::hand)
    }

    pub fn notebook(&self, id: PlayerId) -> Option<&Notebook> {
        self.player(id).map(Player::notebook)
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Runs one action. Errors come back as [`ActionResult::Rejected`].
    pub fn dispatch(&mut self, player: PlayerId, action: Action) -> ActionResult {
        match self.try_dispatch(player, action) {
            Ok(result) => result,
            Err(reason) => {
                event!(
                    target: "clue_core::game",
                    Level::DEBUG,
                    player = player.index(),
                    action = ?action,
                    reason = %reason,
                    message = "action rejected"
                );
                reason.into()
            }
        }
    }

    pub fn try_dispatch(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionResult, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        let seat = self
            .player(player)
            .ok_or(GameError::UnknownPlayer(player.index()))?;
        if action.is_mutating() {
            self.ensure_can_act(player)?;
        }

        match action {
            Action::InspectNotebook => Ok(ActionResult::NotebookSnapshot {
                player,
                entries: seat.notebook().entries(),
            }),
            Action::Move(room) => self.move_player(player, room),
            Action::Suggest { character, weapon } => self.suggest(player, character, weapon),
            Action::Accuse(accusation) => self.accuse(player, accusation),
        }
    }

    fn move_player(&mut self, player: PlayerId, room: Room) -> Result<ActionResult, GameError> {
        self.ensure_in_catalog(&[Card::Room(room)])?;

        self.players[player.index()].move_to(room);
        event!(
            target: "clue_core::game",
            Level::INFO,
            player = %player,
            room = %room,
            message = "moved"
        );
        Ok(ActionResult::Moved { room })
    }

    fn suggest(
        &mut self,
        player: PlayerId,
        character: Character,
        weapon: Weapon,
    ) -> Result<ActionResult, GameError> {
        self.ensure_in_catalog(&[Card::Character(character), Card::Weapon(weapon)])?;
        let room = self.players[player.index()]
            .current_room()
            .ok_or(GameError::PrecedingAction)?;

        let suggestion = Triple::new(character, weapon, room);
        event!(
            target: "clue_core::game",
            Level::INFO,
            player = %player,
            suggestion = %suggestion,
            message = "suggestion made"
        );
        let refutation = refute(&mut self.players, player, &suggestion, &mut self.rng);
        self.advance_turn();

        Ok(ActionResult::Suggested {
            suggestion,
            refuter: refutation.refuter,
            shown: refutation.shown,
        })
    }

    fn accuse(&mut self, player: PlayerId, accusation: Triple) -> Result<ActionResult, GameError> {
        self.ensure_in_catalog(&accusation.cards())?;

        let correct = accusation == self.solution;
        if correct {
            self.status = GameStatus::Won(player);
            event!(
                target: "clue_core::game",
                Level::INFO,
                player = %player,
                accusation = %accusation,
                message = "correct accusation, game won"
            );
        } else {
            self.players[player.index()].eliminate();
            event!(
                target: "clue_core::game",
                Level::INFO,
                player = %player,
                accusation = %accusation,
                remaining = self.active_count(),
                message = "wrong accusation, player eliminated"
            );
            if self.active_count() == 0 {
                self.status = GameStatus::AllEliminated;
                event!(
                    target: "clue_core::game",
                    Level::INFO,
                    message = "every player eliminated"
                );
            } else {
                self.advance_turn();
            }
        }

        Ok(ActionResult::Accused {
            accusation,
            correct,
        })
    }

    /// Eliminated seats and seats out of turn may only read.
    fn ensure_can_act(&self, player: PlayerId) -> Result<(), GameError> {
        let seat = self
            .player(player)
            .ok_or(GameError::UnknownPlayer(player.index()))?;
        if !seat.is_active() {
            return Err(GameError::Eliminated(player));
        }
        if player != self.current {
            return Err(GameError::OutOfTurn {
                expected: self.current,
                actual: player,
            });
        }
        Ok(())
    }

    fn ensure_in_catalog(&self, cards: &[Card]) -> Result<(), GameError> {
        match cards.iter().find(|card| !self.catalog.contains(**card)) {
            Some(card) => Err(GameError::InvalidInput(*card)),
            None => Ok(()),
        }
    }

    /// Moves the cursor to the next active seat. With the mover as the only
    /// active player the cursor stays put.
    fn advance_turn(&mut self) {
        let player_count = self.players.len();
        if let Some(next) = self
            .current
            .others_in_order(player_count)
            .find(|seat| self.players[seat.index()].is_active())
        {
            self.current = next;
        }
        self.turn_number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameStatus};
    use crate::game::action::{Action, ActionResult};
    use crate::game::deal::Deal;
    use crate::game::error::{ConfigurationError, GameError};
    use crate::model::card::{Card, Character, Room, Weapon};
    use crate::model::catalog::Catalog;
    use crate::model::hand::Hand;
    use crate::model::notebook::Entry;
    use crate::model::player::PlayerId;
    use crate::model::triple::Triple;
    use rand::rngs::mock::StepRng;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn solution() -> Triple {
        Triple::new(Character::MissScarlett, Weapon::Candlestick, Room::Kitchen)
    }

    /// Three seats on a small board; the solution is Scarlett/Candlestick/Kitchen.
    fn three_seat_game() -> Game<StepRng> {
        let catalog = Catalog::new(
            vec![Character::MissScarlett, Character::ColonelMustard, Character::MrsWhite],
            vec![Weapon::Candlestick, Weapon::Rope, Weapon::Dagger],
            vec![Room::Kitchen, Room::Hall, Room::Study],
        );
        let hands = vec![
            Hand::with_cards(vec![Card::from(Character::ColonelMustard), Card::from(Room::Hall)]),
            Hand::with_cards(vec![Card::from(Weapon::Rope), Card::from(Room::Study)]),
            Hand::with_cards(vec![Card::from(Character::MrsWhite), Card::from(Weapon::Dagger)]),
        ];
        let deal = Deal::fixed(&catalog, solution(), hands).unwrap();
        Game::from_deal(deal, StepRng::new(0, 0))
    }

    #[test]
    fn new_game_rejects_single_player() {
        assert_eq!(
            Game::with_seed(1, 0).unwrap_err(),
            ConfigurationError::TooFewPlayers { count: 1 }
        );
    }

    #[test]
    fn seeded_game_exposes_seed_and_starts_with_seat_zero() {
        let game = Game::with_seed(4, 1234).unwrap();
        assert_eq!(game.seed(), Some(1234));
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.revealed_solution(), None);
        assert_eq!(game.player_count(), 4);
    }

    #[test]
    fn move_keeps_the_turn() {
        let mut game = three_seat_game();
        assert_eq!(
            game.dispatch(P0, Action::Move(Room::Study)),
            ActionResult::Moved { room: Room::Study }
        );
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.player(P0).unwrap().current_room(), Some(Room::Study));
    }

    #[test]
    fn move_outside_catalog_is_rejected_without_consuming_the_turn() {
        let mut game = three_seat_game();
        let result = game.dispatch(P0, Action::Move(Room::Ballroom));
        assert_eq!(
            result.rejection(),
            Some(GameError::InvalidInput(Card::from(Room::Ballroom)))
        );
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.player(P0).unwrap().current_room(), None);
    }

    #[test]
    fn suggest_requires_a_prior_move() {
        let mut game = three_seat_game();
        let result = game.dispatch(
            P0,
            Action::Suggest {
                character: Character::MrsWhite,
                weapon: Weapon::Rope,
            },
        );
        assert_eq!(result.rejection(), Some(GameError::PrecedingAction));
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn suggestion_uses_current_room_and_passes_the_turn() {
        let mut game = three_seat_game();
        game.dispatch(P0, Action::Move(Room::Study));
        let result = game.dispatch(
            P0,
            Action::Suggest {
                character: Character::MrsWhite,
                weapon: Weapon::Candlestick,
            },
        );
        assert_eq!(
            result,
            ActionResult::Suggested {
                suggestion: Triple::new(Character::MrsWhite, Weapon::Candlestick, Room::Study),
                refuter: Some(P1),
                shown: Some(Card::from(Room::Study)),
            }
        );
        assert_eq!(
            game.notebook(P0).unwrap().get(Card::from(Room::Study)),
            Some(Entry::ShownBy(P1))
        );
        assert_eq!(game.current_player(), P1);
        assert_eq!(game.turn_number(), 2);
    }

    #[test]
    fn out_of_turn_actions_are_rejected() {
        let mut game = three_seat_game();
        let result = game.dispatch(P2, Action::Move(Room::Hall));
        assert_eq!(
            result.rejection(),
            Some(GameError::OutOfTurn {
                expected: P0,
                actual: P2
            })
        );
        assert_eq!(game.player(P2).unwrap().current_room(), None);
    }

    #[test]
    fn notebook_is_readable_out_of_turn() {
        let mut game = three_seat_game();
        match game.dispatch(P2, Action::InspectNotebook) {
            ActionResult::NotebookSnapshot { player, entries } => {
                assert_eq!(player, P2);
                assert_eq!(entries.len(), 9);
                assert!(entries.contains(&(Card::from(Weapon::Dagger), Entry::Owned)));
            }
            other => panic!("expected notebook snapshot, got {other:?}"),
        }
        assert_eq!(game.current_player(), P0);
    }

    #[test]
    fn unknown_seat_is_rejected() {
        let mut game = three_seat_game();
        assert_eq!(
            game.dispatch(PlayerId::new(9), Action::InspectNotebook).rejection(),
            Some(GameError::UnknownPlayer(9))
        );
    }

    #[test]
    fn correct_accusation_wins_and_freezes_the_game() {
        let mut game = three_seat_game();
        assert_eq!(
            game.dispatch(P0, Action::Accuse(solution())),
            ActionResult::Accused {
                accusation: solution(),
                correct: true
            }
        );
        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(P0));
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.revealed_solution(), Some(solution()));
        assert_eq!(
            game.dispatch(P0, Action::InspectNotebook).rejection(),
            Some(GameError::GameOver)
        );
    }

    #[test]
    fn wrong_accusation_eliminates_and_skips_the_accuser() {
        let mut game = three_seat_game();
        let wrong = Triple::new(Character::MrsWhite, Weapon::Candlestick, Room::Kitchen);
        assert_eq!(
            game.dispatch(P0, Action::Accuse(wrong)),
            ActionResult::Accused {
                accusation: wrong,
                correct: false
            }
        );
        assert!(!game.player(P0).unwrap().is_active());
        assert_eq!(game.current_player(), P1);
        assert!(!game.is_terminal());

        game.dispatch(P1, Action::Move(Room::Hall));
        game.dispatch(
            P1,
            Action::Suggest {
                character: Character::MissScarlett,
                weapon: Weapon::Candlestick,
            },
        );
        assert_eq!(game.current_player(), P2);

        game.dispatch(P2, Action::Move(Room::Hall));
        game.dispatch(
            P2,
            Action::Suggest {
                character: Character::MissScarlett,
                weapon: Weapon::Candlestick,
            },
        );
        assert_eq!(game.current_player(), P1, "eliminated seat is skipped");
        assert_eq!(
            game.dispatch(P0, Action::Move(Room::Kitchen)).rejection(),
            Some(GameError::Eliminated(P0))
        );
    }

    #[test]
    fn eliminated_players_do_not_refute() {
        let mut game = three_seat_game();
        let wrong = Triple::new(Character::MrsWhite, Weapon::Rope, Room::Study);
        game.dispatch(P0, Action::Accuse(wrong));

        game.dispatch(P1, Action::Move(Room::Kitchen));
        // Seat 0 holds Mustard but is out; seat 2 holds nothing asked for.
        let result = game.dispatch(
            P1,
            Action::Suggest {
                character: Character::ColonelMustard,
                weapon: Weapon::Candlestick,
            },
        );
        assert_eq!(
            result,
            ActionResult::Suggested {
                suggestion: Triple::new(
                    Character::ColonelMustard,
                    Weapon::Candlestick,
                    Room::Kitchen
                ),
                refuter: None,
                shown: None,
            }
        );
        assert_eq!(
            game.notebook(P1)
                .unwrap()
                .get(Card::from(Character::ColonelMustard)),
            Some(Entry::SuspectedClear)
        );
    }

    #[test]
    fn everyone_wrong_ends_with_no_winner() {
        let mut game = three_seat_game();
        let wrong = Triple::new(Character::MrsWhite, Weapon::Rope, Room::Study);
        for seat in [P0, P1, P2] {
            assert_eq!(game.current_player(), seat);
            game.dispatch(seat, Action::Accuse(wrong));
        }
        assert_eq!(game.status(), GameStatus::AllEliminated);
        assert!(game.is_terminal());
        assert_eq!(game.winner(), None);
        assert_eq!(game.active_count(), 0);
    }

    #[test]
    fn last_active_player_keeps_the_turn() {
        let mut game = three_seat_game();
        let wrong = Triple::new(Character::MrsWhite, Weapon::Rope, Room::Study);
        game.dispatch(P0, Action::Accuse(wrong));
        game.dispatch(P1, Action::Accuse(wrong));
        assert_eq!(game.current_player(), P2);

        game.dispatch(P2, Action::Move(Room::Hall));
        game.dispatch(
            P2,
            Action::Suggest {
                character: Character::MissScarlett,
                weapon: Weapon::Rope,
            },
        );
        assert_eq!(game.current_player(), P2);
        assert!(!game.is_terminal());
    }

    #[test]
    fn accusation_with_card_outside_catalog_is_rejected() {
        let mut game = three_seat_game();
        let result = game.dispatch(
            P0,
            Action::Accuse(Triple::new(
                Character::ProfessorPlum,
                Weapon::Candlestick,
                Room::Kitchen,
            )),
        );
        assert_eq!(
            result.rejection(),
            Some(GameError::InvalidInput(Card::from(Character::ProfessorPlum)))
        );
        assert!(game.player(P0).unwrap().is_active());
    }

    #[test]
    fn game_keeps_the_catalog_its_deal_was_checked_against() {
        let game = three_seat_game();
        let catalog = game.catalog().clone();
        assert_eq!(catalog.len(), 9);

        let dealt: usize = game.players().iter().map(|p| p.hand().len()).sum();
        assert_eq!(dealt + 3, catalog.len());
        for player in game.players() {
            assert_eq!(player.notebook().entries().len(), catalog.len());
            assert!(player.hand().iter().all(|card| catalog.contains(*card)));
        }
    }

    #[test]
    fn generated_deal_carries_its_catalog_into_the_game() {
        let small = Catalog::new(
            vec![Character::MissScarlett, Character::ColonelMustard],
            vec![Weapon::Candlestick, Weapon::Rope],
            vec![Room::Kitchen, Room::Hall],
        );
        let game = Game::with_catalog(small.clone(), 2, StepRng::new(0, 0)).unwrap();
        assert_eq!(game.catalog(), &small);

        let mut game = game;
        assert_eq!(
            game.dispatch(P0, Action::Move(Room::Study)).rejection(),
            Some(GameError::InvalidInput(Card::from(Room::Study)))
        );
    }

    #[test]
    fn suggestion_outside_catalog_is_rejected_without_consuming_the_turn() {
        let mut game = three_seat_game();
        game.dispatch(P0, Action::Move(Room::Hall));
        let result = game.dispatch(
            P0,
            Action::Suggest {
                character: Character::ProfessorPlum,
                weapon: Weapon::Rope,
            },
        );
        assert_eq!(
            result.rejection(),
            Some(GameError::InvalidInput(Card::from(Character::ProfessorPlum)))
        );

        let result = game.dispatch(
            P0,
            Action::Suggest {
                character: Character::MrsWhite,
                weapon: Weapon::Wrench,
            },
        );
        assert_eq!(
            result.rejection(),
            Some(GameError::InvalidInput(Card::from(Weapon::Wrench)))
        );
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.turn_number(), 1);
        assert_eq!(
            game.notebook(P0).unwrap().get(Card::from(Character::MrsWhite)),
            Some(Entry::Unknown)
        );
    }

    #[test]
    fn eliminated_seat_may_still_read_its_notebook() {
        let mut game = three_seat_game();
        let wrong = Triple::new(Character::MrsWhite, Weapon::Rope, Room::Study);
        game.dispatch(P0, Action::Accuse(wrong));
        assert!(!game.dispatch(P0, Action::InspectNotebook).is_rejected());
        assert_eq!(
            game.dispatch(P0, Action::Accuse(solution())).rejection(),
            Some(GameError::Eliminated(P0))
        );
    }
}
