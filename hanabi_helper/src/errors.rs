use crate::{Card, Color, Number, TileId};

/// The error type for actions that break the helper's invariants.
///
/// These are bugs in the calling sequence, not game states. Every action
/// that returns one of these leaves the game exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    NoSuchPlayer { player: usize },
    NoSuchTile { tile: TileId },
    TileAlreadyUsed { tile: TileId },
    /// Only tiles bound to a card can be played or discarded.
    TileNotResolved { tile: TileId },
    NumberNotCandidate { tile: TileId, number: Number },
    ColorNotCandidate { tile: TileId, color: Color },
    EliminatesLastNumber { tile: TileId, number: Number },
    EliminatesLastColor { tile: TileId, color: Color },
    CardNotInPool { card: Card },
    EmptyClue,
    NoTargets,
    TargetsSpanPlayers,
    NoPendingAction,
    RevealOnPrimaryPlayer { tile: TileId },
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::NoSuchPlayer { player } => write!(f, "There is no player {}", player),
            IllegalAction::NoSuchTile { tile } => write!(f, "There is no tile {}", tile),
            IllegalAction::TileAlreadyUsed { tile } => {
                write!(f, "Tile {} was already played or discarded", tile)
            }
            IllegalAction::TileNotResolved { tile } => {
                write!(f, "Tile {} cannot be used before its card is known", tile)
            }
            IllegalAction::NumberNotCandidate { tile, number } => {
                write!(f, "Tile {} cannot be a {}", tile, number)
            }
            IllegalAction::ColorNotCandidate { tile, color } => {
                write!(f, "Tile {} cannot be {}", tile, color)
            }
            IllegalAction::EliminatesLastNumber { tile, number } => write!(
                f,
                "Tile {} is known to be a {}, it cannot be ruled out",
                tile, number
            ),
            IllegalAction::EliminatesLastColor { tile, color } => write!(
                f,
                "Tile {} is known to be {}, it cannot be ruled out",
                tile, color
            ),
            IllegalAction::CardNotInPool { card } => {
                write!(f, "No {} is left to bind to a tile", card)
            }
            IllegalAction::EmptyClue => write!(f, "A clue needs a number or a color"),
            IllegalAction::NoTargets => write!(f, "A hint needs at least one target tile"),
            IllegalAction::TargetsSpanPlayers => {
                write!(f, "All tiles of a hint must belong to the same player")
            }
            IllegalAction::NoPendingAction => write!(f, "No action is waiting for a choice"),
            IllegalAction::RevealOnPrimaryPlayer { tile } => write!(
                f,
                "Tile {} belongs to the primary player, whose cards cannot be read",
                tile
            ),
        }
    }
}
