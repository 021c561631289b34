use serde::{Deserialize, Serialize};

use crate::{Color, ColorRule, GameView, Number, PendingAction, TileId, Update};

/// Request from a UI to the helper.
///
/// Sent as one JSON object per line, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Discards the current game, if any, and deals a new one.
    ///
    /// The response is a [`Response::View`].
    NewGame {
        player_count: u8,
        #[serde(default)]
        color_rule: ColorRule,
    },
    AssignNumber { tiles: Vec<TileId>, number: Number },
    AssignColor { tiles: Vec<TileId>, color: Color },
    /// A complete hint. `targets` are slots of `player`'s hand.
    Hint {
        player: usize,
        targets: Vec<usize>,
        #[serde(default)]
        number: Option<Number>,
        #[serde(default)]
        color: Option<Color>,
    },
    MarkUsed { tile: TileId },
    BeginUse { tile: TileId },
    BeginHint { player: usize, targets: Vec<usize> },
    BeginFullReveal { tile: TileId },
    ChooseNumber { number: Number },
    ChooseColor { color: Color },
    Cancel,
    Undo,
    /// The response is a [`Response::View`].
    View,
    /// The response is a [`Response::Text`] rendering of the game.
    Render,
    /// The session should shut down. Gets no response.
    Bye,
}

/// Response from the helper, one JSON object per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// An action settled.
    Update(Update),
    /// An action is waiting for a number or color.
    Pending { pending: PendingAction },
    View(GameView),
    Text { text: String },
    /// The request was rejected and nothing changed.
    Error { message: String },
}
