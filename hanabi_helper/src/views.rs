use serde::Serialize;

use crate::{Card, ColorSet, GameConfig, GameState, NumberSet, PendingAction, Tile, TileId};

/// What a UI needs to draw one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub id: TileId,
    pub numbers: NumberSet,
    pub colors: ColorSet,
    pub is_used: bool,
    pub resolved_card: Option<Card>,
}

impl TileView {
    pub fn new(id: TileId, tile: &Tile) -> Self {
        Self {
            id,
            numbers: tile.numbers(),
            colors: tile.colors(),
            is_used: tile.is_used(),
            resolved_card: tile.resolved_card(),
        }
    }
}

/// Per-identity tally for the "used cards" display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardCount {
    pub card: Card,
    /// Played or discarded.
    pub used: u8,
    /// Copies left in the pool, i.e. not bound to any tile.
    pub in_pool: usize,
}

fn card_counts(state: &GameState) -> impl Iterator<Item = CardCount> + '_ {
    state.config().colors().into_iter().flat_map(move |color| {
        NumberSet::all().into_iter().map(move |number| {
            let card = Card { number, color };
            CardCount {
                card,
                used: state.used().get(card),
                in_pool: state.pool().count(card),
            }
        })
    })
}

/// The whole game, as shown to a UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub config: GameConfig,
    /// One list per player, in slot order.
    pub hands: Vec<Vec<TileView>>,
    pub counts: Vec<CardCount>,
    pub pool_size: usize,
    pub can_undo: bool,
    pub pending: Option<PendingAction>,
}

impl GameView {
    pub(crate) fn new(state: &GameState, can_undo: bool, pending: Option<PendingAction>) -> Self {
        let hands = state
            .players()
            .iter()
            .enumerate()
            .map(|(player, p)| {
                p.tiles()
                    .iter()
                    .enumerate()
                    .map(|(slot, tile)| TileView::new(TileId { player, slot }, tile))
                    .collect()
            })
            .collect();
        Self {
            config: state.config(),
            hands,
            counts: card_counts(state).collect(),
            pool_size: state.pool().len(),
            can_undo,
            pending,
        }
    }
}

/// What an action changed, so a UI can redraw only that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Update {
    /// New or modified tiles.
    pub changed_tiles: Vec<TileView>,
    /// Tiles that no longer exist, which only happens on undo.
    pub removed_tiles: Vec<TileId>,
    pub pool_changed: bool,
    /// Card identities whose used or pool count changed.
    pub counts: Vec<CardCount>,
}

impl Update {
    /// Diffs two states of the same game.
    pub fn between(before: &GameState, after: &GameState) -> Self {
        let mut changed_tiles = Vec::new();
        for (id, tile) in after.tiles() {
            if before.tile(id).ok() != Some(tile) {
                changed_tiles.push(TileView::new(id, tile));
            }
        }
        let removed_tiles = before
            .tiles()
            .map(|(id, _)| id)
            .filter(|&id| after.tile(id).is_err())
            .collect();
        let counts = card_counts(after)
            .zip(card_counts(before))
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a)
            .collect();
        Self {
            changed_tiles,
            removed_tiles,
            pool_changed: before.pool() != after.pool(),
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_tiles.is_empty() && self.removed_tiles.is_empty() && !self.pool_changed
    }
}
