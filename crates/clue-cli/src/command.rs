use clue_core::model::card::{Character, ParseCardError, Room, Weapon};
use clue_core::model::triple::Triple;
use core::str::FromStr;
use thiserror::Error;

/// One line typed at the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Room),
    Suggest(Character, Weapon),
    Accuse(Triple),
    /// Both only ever show the seat whose turn it is.
    Notebook,
    Hand,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Card(#[from] ParseCardError),
}

pub const HELP: &str = "\
Commands (multi-word names take dashes, e.g. lead-pipe, dining-room):
  move <room>                           walk into a room
  suggest <character> <weapon>          suggest in your current room, ends your turn
  accuse <character> <weapon> <room>    final accusation; wrong means elimination
  notebook                              show what you have learned
  hand                                  show the cards you hold
  status                                table overview
  help                                  this text
  quit                                  leave the game";

const MOVE_USAGE: &str = "move <room>";
const SUGGEST_USAGE: &str = "suggest <character> <weapon>";
const ACCUSE_USAGE: &str = "accuse <character> <weapon> <room>";
const NOTEBOOK_USAGE: &str = "notebook";
const HAND_USAGE: &str = "hand";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        match verb.to_ascii_lowercase().as_str() {
            "move" | "m" => {
                if args.is_empty() {
                    return Err(CommandError::Usage(MOVE_USAGE));
                }
                // "move dining room" reads naturally, so join the words.
                Ok(Command::Move(args.join(" ").parse()?))
            }
            "suggest" | "s" => match args.as_slice() {
                [character, weapon] => Ok(Command::Suggest(character.parse()?, weapon.parse()?)),
                _ => Err(CommandError::Usage(SUGGEST_USAGE)),
            },
            "accuse" | "a" => match args.as_slice() {
                [character, weapon, room] => Ok(Command::Accuse(Triple::new(
                    character.parse()?,
                    weapon.parse()?,
                    room.parse()?,
                ))),
                _ => Err(CommandError::Usage(ACCUSE_USAGE)),
            },
            "notebook" | "n" => no_args(&args, Command::Notebook, NOTEBOOK_USAGE),
            "hand" | "h" => no_args(&args, Command::Hand, HAND_USAGE),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn no_args(args: &[&str], command: Command, usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::Usage(usage))
    }
}
