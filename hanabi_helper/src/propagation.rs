use std::sync::Arc;

use tracing::{debug, trace};

use crate::{recompute_possibilities, GameState, IllegalAction, TileId};

impl GameState {
    /// Re-derives every current, unbound tile against the pool until the
    /// pool stops changing.
    ///
    /// A tile that ends up specified takes its card out of the pool, which
    /// can narrow other tiles in the next pass. Each pass that changes
    /// anything shrinks the pool, so this terminates after at most
    /// `pool.len() + 1` passes. Returns whether the pool changed.
    ///
    /// Tiles that no pool card fits are left alone: they are dead ends, and
    /// the information that led there was valid when it was applied.
    pub(crate) fn propagate(&mut self) -> Result<bool, IllegalAction> {
        let (pool_changed, _passes) = self.propagate_counting_passes()?;
        Ok(pool_changed)
    }

    /// [`Self::propagate`], also returning how many passes it took.
    fn propagate_counting_passes(&mut self) -> Result<(bool, usize), IllegalAction> {
        let mut pool_changed = false;
        let mut pass = 0;
        loop {
            pass += 1;
            let mut changed = false;
            for player in 0..self.players.len() {
                for slot in 0..self.players[player].tiles().len() {
                    changed |= self.settle_tile(TileId { player, slot })?;
                }
            }
            trace!(pass, changed, pool = self.pool.len(), "Propagation pass");
            if !changed {
                break;
            }
            pool_changed = true;
        }
        Ok((pool_changed, pass))
    }

    /// One step of propagation for one tile. Returns whether it took a card.
    fn settle_tile(&mut self, id: TileId) -> Result<bool, IllegalAction> {
        let tile = *self.tile(id)?;
        if tile.is_used() || tile.resolved_card().is_some() {
            return Ok(false);
        }
        let (numbers, colors) = recompute_possibilities(&tile, &self.pool);
        if numbers.is_empty() {
            return Ok(false);
        }
        let tile = self.tile_mut(id)?;
        tile.narrow(numbers, colors);
        let Some(card) = tile.specified_card() else {
            return Ok(false);
        };
        // The card was just seen in the pool, so this only fails on a bug.
        let taken = Arc::make_mut(&mut self.pool).remove_one(card)?;
        self.tile_mut(id)?.bind(taken);
        debug!(tile = %id, card = %taken, "Tile resolved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, Color, ColorRule, GameConfig, Number, NumberSet};

    fn state(players: u8, rule: ColorRule) -> GameState {
        GameState::new(GameConfig::new(players, rule).unwrap())
    }

    const A: TileId = TileId { player: 0, slot: 0 };
    const B: TileId = TileId { player: 0, slot: 1 };
    const C: TileId = TileId { player: 1, slot: 0 };

    #[test]
    fn nothing_to_do_on_fresh_deal() {
        let mut s = state(2, ColorRule::Standard);
        let before = s.clone();
        assert_eq!(s.propagate(), Ok(false));
        assert_eq!(s, before);
    }

    #[test]
    fn binding_cascades_to_later_pass() {
        let mut s = state(2, ColorRule::Standard);
        // The earlier tile can only become specified once the later one took the last red 5.
        s.assign_number(A, Number::Five).unwrap();
        for color in [Color::Green, Color::Blue, Color::White] {
            s.tile_mut(A).unwrap().set_not_color(A, color).unwrap();
        }
        s.assign_number(C, Number::Five).unwrap();
        s.assign_color(C, Color::Red).unwrap();

        let initial_pool = s.pool().len();
        let (pool_changed, passes) = s.propagate_counting_passes().unwrap();
        assert!(pool_changed);
        // Bind C, then A, then one pass that changes nothing.
        assert_eq!(passes, 3);
        assert!(passes <= initial_pool + 1);
        assert_eq!(s.tile(C).unwrap().resolved_card(), Some(card!("5r")));
        assert_eq!(s.tile(A).unwrap().resolved_card(), Some(card!("5y")));
        assert_eq!(s.pool().len(), 48);
    }

    #[test]
    fn exhausted_identity_narrows_fresh_tiles() {
        let mut s = state(2, ColorRule::Standard);
        s.assign_number(A, Number::Five).unwrap();
        s.assign_color(A, Color::Blue).unwrap();
        s.assign_number(B, Number::Five).unwrap();
        s.propagate().unwrap();
        let b = s.tile(B).unwrap();
        assert_eq!(b.numbers(), NumberSet::singleton(Number::Five));
        assert!(!b.colors().contains(Color::Blue));
        assert_eq!(b.resolved_card(), None);
    }

    #[test]
    fn rainbow_specified_by_elimination_only() {
        let mut s = state(3, ColorRule::Rainbow);
        assert_eq!(s.pool().len(), 60);
        s.assign_number(A, Number::Two).unwrap();
        for color in [Color::Red, Color::Yellow, Color::Green, Color::Blue, Color::White] {
            s.tile_mut(A).unwrap().set_not_color(A, color).unwrap();
        }
        assert_eq!(s.propagate(), Ok(true));
        assert_eq!(s.tile(A).unwrap().resolved_card(), Some(card!("2m")));
        assert_eq!(s.pool().count(card!("2m")), 1);
    }

    #[test]
    fn dead_end_is_tolerated() {
        let mut s = state(2, ColorRule::Standard);
        s.assign_number(A, Number::Five).unwrap();
        s.assign_color(A, Color::Green).unwrap();
        s.propagate().unwrap();
        // A second tile claiming the only green 5 can never be filled.
        s.assign_number(B, Number::Five).unwrap();
        s.assign_color(B, Color::Green).unwrap();
        assert_eq!(s.propagate(), Ok(false));
        let b = s.tile(B).unwrap();
        assert!(b.is_specified());
        assert_eq!(b.resolved_card(), None);
        assert_eq!(s.is_dead_end(B), Ok(true));
        assert_eq!(s.is_dead_end(A), Ok(false));
    }
}
