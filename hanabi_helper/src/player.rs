use crate::{ColorSet, Tile};

/// One player's hand during a game.
///
/// Holds every tile the player was ever dealt, in slot order. Used tiles
/// stay in place so that slots keep addressing the same tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    tiles: Vec<Tile>,
}

impl Player {
    pub(crate) fn new(hand_size: usize, colors: ColorSet) -> Self {
        Self {
            tiles: vec![Tile::new(colors); hand_size],
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    pub(crate) fn tile_mut(&mut self, slot: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(slot)
    }

    /// Slots of the tiles still in the hand.
    pub fn current_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.is_used())
            .map(|(slot, _)| slot)
    }

    /// Appends an unconstrained tile and returns its slot.
    pub(crate) fn new_tile(&mut self, colors: ColorSet) -> usize {
        self.tiles.push(Tile::new(colors));
        self.tiles.len() - 1
    }
}
