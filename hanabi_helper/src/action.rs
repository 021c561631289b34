use serde::{Deserialize, Serialize};

use crate::{Clue, TileId};

/// An action that is waiting for the user to pick a number and/or color.
///
/// No pending action means the game is idle. An action settles as soon as
/// [`is_ready()`](Self::is_ready) holds, and the game becomes idle again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingAction {
    /// The primary player plays or discards a tile whose card they don't know
    /// yet. Both dimensions are needed, no other tile is affected.
    Use { tile: TileId, clue: Clue },
    /// A clue about `targets`. Every other current tile of the same player is
    /// told it does not match. One dimension is enough.
    Hint { player: usize, targets: Vec<usize>, clue: Clue },
    /// Someone reads another player's card. Both dimensions are needed, no
    /// other tile is affected.
    FullReveal { tile: TileId, clue: Clue },
}

impl PendingAction {
    pub fn clue(&self) -> Clue {
        match self {
            PendingAction::Use { clue, .. }
            | PendingAction::Hint { clue, .. }
            | PendingAction::FullReveal { clue, .. } => *clue,
        }
    }

    pub(crate) fn clue_mut(&mut self) -> &mut Clue {
        match self {
            PendingAction::Use { clue, .. }
            | PendingAction::Hint { clue, .. }
            | PendingAction::FullReveal { clue, .. } => clue,
        }
    }

    /// The tiles whose candidates constrain the choice.
    pub fn tiles(&self) -> Vec<TileId> {
        match self {
            PendingAction::Use { tile, .. } | PendingAction::FullReveal { tile, .. } => vec![*tile],
            PendingAction::Hint {
                player, targets, ..
            } => targets
                .iter()
                .map(|&slot| TileId {
                    player: *player,
                    slot,
                })
                .collect(),
        }
    }

    pub fn is_ready(&self) -> bool {
        match self {
            PendingAction::Hint { clue, .. } => !clue.is_empty(),
            PendingAction::Use { clue, .. } | PendingAction::FullReveal { clue, .. } => {
                clue.is_complete()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Number};

    #[test]
    fn readiness_depends_on_kind() {
        let mut hint = PendingAction::Hint {
            player: 0,
            targets: vec![1, 2],
            clue: Clue::default(),
        };
        assert!(!hint.is_ready());
        hint.clue_mut().color = Some(Color::Red);
        assert!(hint.is_ready());

        let mut reveal = PendingAction::FullReveal {
            tile: TileId { player: 1, slot: 0 },
            clue: Clue::number(Number::Three),
        };
        assert!(!reveal.is_ready());
        reveal.clue_mut().color = Some(Color::Blue);
        assert!(reveal.is_ready());
    }

    #[test]
    fn serialized_with_tag() {
        let action = PendingAction::Use {
            tile: TileId { player: 0, slot: 2 },
            clue: Clue::number(Number::One),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"type":"use","tile":{"player":0,"slot":2},"clue":{"number":1}}"#
        );
    }
}
