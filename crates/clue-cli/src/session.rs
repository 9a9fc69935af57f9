use crate::command::{Command, HELP};
use clue_core::game::action::{Action, ActionResult};
use clue_core::game::error::GameError;
use clue_core::game::serialization::TableSnapshot;
use clue_core::game::state::{Game, GameStatus};
use clue_core::model::card::{Card, Category};
use clue_core::model::notebook::Entry;
use clue_core::model::player::PlayerId;
use rand::Rng;
use rand::rngs::StdRng;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use tracing::{Level, event};

/// What the loop should do after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Hot-seat console session: every line acts for the player whose turn it is.
pub struct Session<R: Rng = StdRng> {
    game: Game<R>,
}

impl<R: Rng> Session<R> {
    pub fn new(game: Game<R>) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Reads commands until `quit`, end of input or the end of the game.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> io::Result<GameStatus> {
        writeln!(output, "Welcome to Cluedo! {} players at the table.", self.game.player_count())?;
        writeln!(output, "Type 'help' for commands.")?;
        writeln!(output, "{}", self.prompt())?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.handle_line(&line) {
                Reply::Text(text) => writeln!(output, "{text}")?,
                Reply::Quit => {
                    writeln!(output, "Goodbye.")?;
                    break;
                }
            }
            if self.game.is_terminal() {
                writeln!(output, "{}", self.final_report())?;
                break;
            }
            writeln!(output, "{}", self.prompt())?;
        }

        output.flush()?;
        Ok(self.game.status())
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => return Reply::Text(format!("Invalid input: {err}")),
        };
        event!(
            target: "clue_cli::session",
            Level::DEBUG,
            command = ?command,
            player = %self.game.current_player(),
            message = "command received"
        );

        let seat = self.game.current_player();
        let text = match command {
            Command::Quit => return Reply::Quit,
            Command::Help => HELP.to_string(),
            Command::Status => self.status_text(),
            Command::Hand => self.hand_text(seat),
            Command::Notebook => describe(seat, self.game.dispatch(seat, Action::InspectNotebook)),
            Command::Move(room) => describe(seat, self.game.dispatch(seat, Action::Move(room))),
            Command::Suggest(character, weapon) => {
                describe(seat, self.game.dispatch(seat, Action::Suggest { character, weapon }))
            }
            Command::Accuse(accusation) => {
                describe(seat, self.game.dispatch(seat, Action::Accuse(accusation)))
            }
        };
        Reply::Text(text)
    }

    pub fn prompt(&self) -> String {
        let seat = self.game.current_player();
        let room = self
            .game
            .player(seat)
            .and_then(|player| player.current_room())
            .map_or_else(|| "the hallway".to_string(), |room| format!("the {room}"));
        format!("[turn {}] {seat}, you are in {room}.", self.game.turn_number())
    }

    fn hand_text(&self, seat: PlayerId) -> String {
        let Some(hand) = self.game.hand(seat) else {
            return format!("Rejected: {}", GameError::UnknownPlayer(seat.index()));
        };
        let mut out = format!("Cards held by {seat}:");
        for category in Category::ALL {
            let _ = write!(out, "\n{}:", category_heading(category));
            for card in hand.iter().filter(|card| card.category() == category) {
                let _ = write!(out, "\n  - {card}");
            }
        }
        out
    }

    fn status_text(&self) -> String {
        let snapshot = TableSnapshot::capture(&self.game);
        let mut out = format!(
            "Turn {} - {} to play.",
            snapshot.turn_number, snapshot.current_player
        );
        for seat in &snapshot.seats {
            let room = seat
                .room
                .map_or_else(|| "hallway".to_string(), |room| room.to_string());
            let state = if seat.active { "active" } else { "eliminated" };
            let _ = write!(
                out,
                "\n  {}: {state}, in {room}, {} cards",
                seat.player, seat.hand_size
            );
        }
        out
    }

    pub fn final_report(&self) -> String {
        let verdict = match self.game.status() {
            GameStatus::Won(player) => format!("Game over. {player} solved the case."),
            GameStatus::AllEliminated => "Game over. Every player was eliminated.".to_string(),
            GameStatus::InProgress => "The game is still running.".to_string(),
        };
        match self.game.revealed_solution() {
            Some(solution) => format!("{verdict}\nThe solution was {solution}."),
            None => verdict,
        }
    }
}

fn describe(seat: PlayerId, result: ActionResult) -> String {
    match result {
        ActionResult::Moved { room } => format!("{seat} moved to the {room}."),
        ActionResult::Suggested {
            suggestion,
            refuter,
            shown,
        } => {
            let header = format!(
                "{seat} suggested: {}, {}, {}",
                suggestion.character, suggestion.weapon, suggestion.room
            );
            match (refuter, shown) {
                (Some(refuter), Some(card)) => {
                    format!("{header}\n{refuter} refuted with card: {card}")
                }
                _ => format!("{header}\nNo one could refute the suggestion. Maybe it's the truth?"),
            }
        }
        ActionResult::Accused {
            accusation,
            correct: true,
        } => format!("{seat} WINS! Correct accusation: {accusation}"),
        ActionResult::Accused { correct: false, .. } => {
            format!("Wrong accusation. {seat} is eliminated.")
        }
        ActionResult::NotebookSnapshot { player, entries } => notebook_text(player, &entries),
        ActionResult::Rejected { reason } => format!("Rejected: {reason}"),
    }
}

fn category_heading(category: Category) -> &'static str {
    match category {
        Category::Character => "Characters",
        Category::Weapon => "Weapons",
        Category::Room => "Rooms",
    }
}

fn notebook_text(player: PlayerId, entries: &[(Card, Entry)]) -> String {
    let mut out = format!("Notebook of {player}:");
    for category in Category::ALL {
        let _ = write!(out, "\n{}:", category_heading(category));
        for (card, entry) in entries.iter().filter(|(card, _)| card.category() == category) {
            let _ = write!(out, "\n  {card}: {entry}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Reply, Session};
    use clue_core::game::deal::Deal;
    use clue_core::game::state::{Game, GameStatus};
    use clue_core::model::card::{Card, Character, Room, Weapon};
    use clue_core::model::catalog::Catalog;
    use clue_core::model::hand::Hand;
    use clue_core::model::player::PlayerId;
    use clue_core::model::triple::Triple;
    use rand::rngs::mock::StepRng;

    /// Seat 0 holds Mustard, seat 1 holds Rope and Hall.
    /// Solution: Scarlett, Candlestick, Kitchen.
    fn session() -> Session<StepRng> {
        let catalog = Catalog::new(
            vec![Character::MissScarlett, Character::ColonelMustard],
            vec![Weapon::Candlestick, Weapon::Rope],
            vec![Room::Kitchen, Room::Hall],
        );
        let deal = Deal::fixed(
            &catalog,
            Triple::new(Character::MissScarlett, Weapon::Candlestick, Room::Kitchen),
            vec![
                Hand::with_cards(vec![Card::from(Character::ColonelMustard)]),
                Hand::with_cards(vec![Card::from(Weapon::Rope), Card::from(Room::Hall)]),
            ],
        )
        .expect("valid deal");
        Session::new(Game::from_deal(deal, StepRng::new(0, 0)))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn suggestion_before_move_is_rejected() {
        let mut session = session();
        let reply = text(session.handle_line("suggest mustard rope"));
        assert_eq!(reply, "Rejected: you must move to a room before suggesting");
    }

    #[test]
    fn move_then_suggest_reports_the_refuter() {
        let mut session = session();
        assert_eq!(
            text(session.handle_line("move hall")),
            "Player 0 moved to the Hall."
        );
        let reply = text(session.handle_line("suggest mustard rope"));
        assert_eq!(
            reply,
            "Player 0 suggested: Colonel Mustard, Rope, Hall\nPlayer 1 refuted with card: Rope"
        );
        assert!(session.prompt().contains("Player 1"));
    }

    #[test]
    fn notebook_lists_every_category() {
        let mut session = session();
        let reply = text(session.handle_line("notebook"));
        assert!(reply.starts_with("Notebook of Player 0:"));
        assert!(reply.contains("Characters:\n  Miss Scarlett: Unknown\n  Colonel Mustard: Owned"));
        assert!(reply.contains("Rooms:\n  Kitchen: Unknown\n  Hall: Unknown"));
    }

    #[test]
    fn hand_and_notebook_only_show_the_seat_to_play() {
        let mut session = session();
        let reply = text(session.handle_line("hand"));
        assert!(reply.starts_with("Cards held by Player 0:"));
        assert!(reply.contains("Characters:\n  - Colonel Mustard"));
        assert!(!reply.contains("Rope"));

        let reply = text(session.handle_line("hand 1"));
        assert_eq!(reply, "Invalid input: usage: hand");
        let reply = text(session.handle_line("notebook 1"));
        assert_eq!(reply, "Invalid input: usage: notebook");

        session.handle_line("move hall");
        session.handle_line("suggest mustard rope");
        let reply = text(session.handle_line("hand"));
        assert!(reply.starts_with("Cards held by Player 1:"));
        assert!(reply.contains("Weapons:\n  - Rope"));
        let reply = text(session.handle_line("notebook"));
        assert!(reply.starts_with("Notebook of Player 1:"));
        assert!(reply.contains("  Rope: Owned"));
    }

    #[test]
    fn bad_input_keeps_the_turn() {
        let mut session = session();
        let reply = text(session.handle_line("move narnia"));
        assert_eq!(reply, "Invalid input: unknown room 'narnia'");
        assert!(session.prompt().starts_with("[turn 1] Player 0"));
    }

    #[test]
    fn run_stops_on_a_winning_accusation() {
        let mut session = session();
        let script = b"status\naccuse scarlett candlestick kitchen\nmove hall\n";
        let mut output = Vec::new();
        let status = session.run(&script[..], &mut output).expect("io");
        let output = String::from_utf8(output).expect("utf8");

        assert_eq!(status, GameStatus::Won(PlayerId::new(0)));
        assert!(output.contains("Player 0 WINS!"));
        assert!(output.contains(
            "The solution was Miss Scarlett with the Candlestick in the Kitchen."
        ));
        assert!(!output.contains("moved to the Hall"));
    }

    #[test]
    fn run_stops_on_quit() {
        let mut session = session();
        let mut output = Vec::new();
        let status = session.run(&b"\nquit\nmove hall\n"[..], &mut output).expect("io");
        assert_eq!(status, GameStatus::InProgress);
        let output = String::from_utf8(output).expect("utf8");
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn wrong_accusations_eliminate_everyone() {
        let mut session = session();
        let mut output = Vec::new();
        let script = b"accuse mustard rope hall\naccuse mustard rope hall\n";
        let status = session.run(&script[..], &mut output).expect("io");
        assert_eq!(status, GameStatus::AllEliminated);
        let output = String::from_utf8(output).expect("utf8");
        assert!(output.contains("Wrong accusation. Player 0 is eliminated."));
        assert!(output.contains("Wrong accusation. Player 1 is eliminated."));
        assert!(output.contains("Game over. Every player was eliminated."));
    }
}
