use std::sync::Arc;

use serde::Serialize;

use crate::{Card, Color, GameConfig, IllegalAction, Number, Player, Pool, Tile, TileId};

/// How many cards of each identity were played or discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UsedTally {
    // Indexed by color, then number.
    counts: [[u8; 5]; 6],
}

impl UsedTally {
    pub fn get(&self, card: Card) -> u8 {
        self.counts[card.color.index()][card.number.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().map(|&n| n as usize).sum()
    }

    pub(crate) fn record(&mut self, card: Card) {
        self.counts[card.color.index()][card.number.index()] += 1;
    }
}

/// Everything that undo has to restore: pool, tally and every tile.
///
/// Cloning is cheap enough to do once per action. The pool sits behind an
/// [`Arc`] and is only copied when an action actually takes a card out of it,
/// so consecutive snapshots share it until then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) pool: Arc<Pool>,
    pub(crate) used: UsedTally,
    pub(crate) players: Vec<Player>,
}

impl GameState {
    /// The initial deal: a full pool and unconstrained hands.
    pub fn new(config: GameConfig) -> Self {
        let colors = config.colors();
        Self {
            config,
            pool: Arc::new(Pool::build(colors)),
            used: UsedTally::default(),
            players: (0..config.player_count())
                .map(|_| Player::new(config.hand_size(), colors))
                .collect(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn used(&self) -> &UsedTally {
        &self.used
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player: usize) -> Result<&Player, IllegalAction> {
        self.players
            .get(player)
            .ok_or(IllegalAction::NoSuchPlayer { player })
    }

    pub fn tile(&self, id: TileId) -> Result<&Tile, IllegalAction> {
        self.player(id.player)?
            .tile(id.slot)
            .ok_or(IllegalAction::NoSuchTile { tile: id })
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile, IllegalAction> {
        self.players
            .get_mut(id.player)
            .and_then(|p| p.tile_mut(id.slot))
            .ok_or(IllegalAction::NoSuchTile { tile: id })
    }

    /// All tiles ever dealt, player-major then slot-major.
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.players.iter().enumerate().flat_map(|(player, p)| {
            p.tiles()
                .iter()
                .enumerate()
                .map(move |(slot, tile)| (TileId { player, slot }, tile))
        })
    }

    /// Tiles still in a hand (not used).
    pub fn current_tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.tiles().filter(|(_, tile)| !tile.is_used())
    }

    /// Tiles in a hand that have not taken a card from the pool yet.
    pub fn unbound_count(&self) -> usize {
        self.current_tiles()
            .filter(|(_, tile)| tile.resolved_card().is_none())
            .count()
    }

    /// Cards bound to tiles that are still in a hand.
    pub fn bound_count(&self) -> usize {
        self.current_tiles()
            .filter(|(_, tile)| tile.resolved_card().is_some())
            .count()
    }

    /// Copies of `card` that have not been played or discarded yet.
    pub fn remaining(&self, card: Card) -> usize {
        let bound = self
            .current_tiles()
            .filter(|(_, tile)| tile.resolved_card() == Some(card))
            .count();
        self.pool.count(card) + bound
    }

    /// A current tile that no pool card can fill anymore.
    pub fn is_dead_end(&self, id: TileId) -> Result<bool, IllegalAction> {
        let tile = self.tile(id)?;
        Ok(!tile.is_used()
            && tile.resolved_card().is_none()
            && !self.pool.iter().any(|&card| tile.could_be(card)))
    }

    pub(crate) fn assign_number(
        &mut self,
        id: TileId,
        number: Number,
    ) -> Result<bool, IllegalAction> {
        self.tile_mut(id)?.set_number(id, number)
    }

    pub(crate) fn assign_color(&mut self, id: TileId, color: Color) -> Result<bool, IllegalAction> {
        self.tile_mut(id)?.set_color(id, color)
    }

    /// Moves the tile's card to the used tally, and deals its owner a
    /// replacement if the pool can still fill one more tile.
    ///
    /// Returns the slot of the replacement tile, if one was dealt.
    pub(crate) fn mark_used(&mut self, id: TileId) -> Result<Option<usize>, IllegalAction> {
        let card = self.tile_mut(id)?.mark_used(id)?;
        self.used.record(card);
        if self.pool.len() > self.unbound_count() {
            let colors = self.config.colors();
            let slot = self.players[id.player].new_tile(colors);
            Ok(Some(slot))
        } else {
            Ok(None)
        }
    }
}
