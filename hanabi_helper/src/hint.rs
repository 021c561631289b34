use serde::{Deserialize, Serialize};

use crate::{Color, GameState, IllegalAction, Number, TileId};

/// The value a hint reveals: a number, a color, or both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Clue {
    pub fn number(number: Number) -> Self {
        Self {
            number: Some(number),
            color: None,
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            number: None,
            color: Some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.color.is_none()
    }

    /// Both dimensions are known.
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && self.color.is_some()
    }
}

impl GameState {
    /// Tells `targets` that they match the clue and `non_targets` that they
    /// don't. Does not propagate.
    ///
    /// All tiles must belong to one player. Non-targets that also appear in
    /// `targets` are skipped.
    pub(crate) fn apply_clue(
        &mut self,
        targets: &[TileId],
        non_targets: &[TileId],
        clue: Clue,
    ) -> Result<(), IllegalAction> {
        if clue.is_empty() {
            return Err(IllegalAction::EmptyClue);
        }
        let Some(first) = targets.first() else {
            return Err(IllegalAction::NoTargets);
        };
        if targets
            .iter()
            .chain(non_targets)
            .any(|id| id.player != first.player)
        {
            return Err(IllegalAction::TargetsSpanPlayers);
        }
        let others: Vec<TileId> = non_targets
            .iter()
            .copied()
            .filter(|id| !targets.contains(id))
            .collect();

        if let Some(number) = clue.number {
            for &id in targets {
                self.tile_mut(id)?.set_number(id, number)?;
            }
            for &id in &others {
                self.tile_mut(id)?.set_not_number(id, number)?;
            }
        }
        if let Some(color) = clue.color {
            for &id in targets {
                self.tile_mut(id)?.set_color(id, color)?;
            }
            for &id in &others {
                self.tile_mut(id)?.set_not_color(id, color)?;
            }
        }
        Ok(())
    }

    /// The tiles a hint to `player` about `target_slots` rules out: every
    /// other tile still in that player's hand.
    pub fn hint_non_targets(
        &self,
        player: usize,
        target_slots: &[usize],
    ) -> Result<Vec<TileId>, IllegalAction> {
        Ok(self
            .player(player)?
            .current_slots()
            .filter(|slot| !target_slots.contains(slot))
            .map(|slot| TileId { player, slot })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorRule, ColorSet, GameConfig, NumberSet};

    fn ids(player: usize, slots: &[usize]) -> Vec<TileId> {
        slots.iter().map(|&slot| TileId { player, slot }).collect()
    }

    fn state() -> GameState {
        GameState::new(GameConfig::new(4, ColorRule::Standard).unwrap())
    }

    #[test]
    fn number_hint_eliminates_from_the_rest() {
        let mut s = state();
        let targets = ids(2, &[1, 3]);
        let others = s.hint_non_targets(2, &[1, 3]).unwrap();
        assert_eq!(others, ids(2, &[0, 2]));
        let four = Clue::number(Number::Four);
        s.apply_clue(&targets, &others, four).unwrap();
        for id in &targets {
            assert_eq!(s.tile(*id).unwrap().numbers(), NumberSet::singleton(Number::Four));
        }
        for id in &others {
            assert!(!s.tile(*id).unwrap().numbers().contains(Number::Four));
            assert_eq!(s.tile(*id).unwrap().colors(), ColorRule::Standard.colors());
        }
    }

    #[test]
    fn color_hint() {
        let mut s = state();
        let others = s.hint_non_targets(0, &[0]).unwrap();
        let white = Clue::color(Color::White);
        s.apply_clue(&ids(0, &[0]), &others, white).unwrap();
        assert_eq!(
            s.tile(TileId { player: 0, slot: 0 }).unwrap().colors(),
            ColorSet::singleton(Color::White)
        );
        assert_eq!(
            s.tile(TileId { player: 0, slot: 3 }).unwrap().colors().len(),
            4
        );
    }

    #[test]
    fn malformed_hints() {
        let mut s = state();
        assert_eq!(
            s.apply_clue(&ids(0, &[0]), &[], Clue::default()),
            Err(IllegalAction::EmptyClue)
        );
        assert_eq!(
            s.apply_clue(&[], &ids(0, &[1]), Clue::number(Number::One)),
            Err(IllegalAction::NoTargets)
        );
        assert_eq!(
            s.apply_clue(&ids(0, &[0]), &ids(1, &[1]), Clue::number(Number::One)),
            Err(IllegalAction::TargetsSpanPlayers)
        );
    }

    #[test]
    fn contradicting_hint_is_rejected() {
        let mut s = state();
        let two = Clue::number(Number::Two);
        s.apply_clue(&ids(1, &[0]), &[], two).unwrap();
        // Tile 1/0 is a two, so it cannot be left out of a hint about twos.
        let result = s.apply_clue(&ids(1, &[1]), &ids(1, &[0]), Clue::number(Number::Two));
        assert_eq!(
            result,
            Err(IllegalAction::EliminatesLastNumber {
                tile: TileId { player: 1, slot: 0 },
                number: Number::Two
            })
        );
    }
}
