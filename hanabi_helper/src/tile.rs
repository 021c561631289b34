use serde::{Deserialize, Serialize};

use crate::{Card, Color, ColorSet, IllegalAction, Number, NumberSet, Pool};

/// Addresses a tile: the owning player and the slot in their hand.
///
/// Slots are never reused, a used tile keeps its slot and replacements are
/// appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId {
    pub player: usize,
    pub slot: usize,
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.player, self.slot)
    }
}

/// A card slot in a player's hand, tracked as the set of cards it could be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Never empty.
    numbers: NumberSet,
    /// Never empty.
    colors: ColorSet,
    /// Once set, `numbers` and `colors` are the singletons of its fields.
    resolved_card: Option<Card>,
    is_used: bool,
}

impl Tile {
    /// A fresh tile that could be any card of the game.
    pub(crate) fn new(colors: ColorSet) -> Self {
        Self {
            numbers: NumberSet::all(),
            colors,
            resolved_card: None,
            is_used: false,
        }
    }

    pub fn numbers(&self) -> NumberSet {
        self.numbers
    }

    pub fn colors(&self) -> ColorSet {
        self.colors
    }

    /// The card this tile took from the pool, if any.
    pub fn resolved_card(&self) -> Option<Card> {
        self.resolved_card
    }

    /// Whether the tile was played or discarded.
    pub fn is_used(&self) -> bool {
        self.is_used
    }

    /// Both candidate sets are singletons.
    pub fn is_specified(&self) -> bool {
        self.specified_card().is_some()
    }

    pub fn specified_card(&self) -> Option<Card> {
        Some(Card {
            number: self.numbers.single()?,
            color: self.colors.single()?,
        })
    }

    pub fn could_be(&self, card: Card) -> bool {
        self.numbers.contains(card.number) && self.colors.contains(card.color)
    }

    /// Narrows the numbers to `{number}`. Returns whether anything changed.
    pub(crate) fn set_number(&mut self, id: TileId, number: Number) -> Result<bool, IllegalAction> {
        self.check_current(id)?;
        if !self.numbers.contains(number) {
            return Err(IllegalAction::NumberNotCandidate { tile: id, number });
        }
        let numbers = NumberSet::singleton(number);
        let changed = self.numbers != numbers;
        self.numbers = numbers;
        Ok(changed)
    }

    /// Rules out `number`. Returns whether anything changed.
    pub(crate) fn set_not_number(
        &mut self,
        id: TileId,
        number: Number,
    ) -> Result<bool, IllegalAction> {
        self.check_current(id)?;
        if !self.numbers.contains(number) {
            return Ok(false);
        }
        if self.numbers.len() == 1 {
            return Err(IllegalAction::EliminatesLastNumber { tile: id, number });
        }
        self.numbers = self.numbers.remove(number);
        Ok(true)
    }

    pub(crate) fn set_color(&mut self, id: TileId, color: Color) -> Result<bool, IllegalAction> {
        self.check_current(id)?;
        if !self.colors.contains(color) {
            return Err(IllegalAction::ColorNotCandidate { tile: id, color });
        }
        let colors = ColorSet::singleton(color);
        let changed = self.colors != colors;
        self.colors = colors;
        Ok(changed)
    }

    pub(crate) fn set_not_color(
        &mut self,
        id: TileId,
        color: Color,
    ) -> Result<bool, IllegalAction> {
        self.check_current(id)?;
        if !self.colors.contains(color) {
            return Ok(false);
        }
        if self.colors.len() == 1 {
            return Err(IllegalAction::EliminatesLastColor { tile: id, color });
        }
        self.colors = self.colors.remove(color);
        Ok(true)
    }

    /// Installs re-derived candidates. Returns whether anything changed.
    pub(crate) fn narrow(&mut self, numbers: NumberSet, colors: ColorSet) -> bool {
        debug_assert!(numbers.is_subset(self.numbers) && colors.is_subset(self.colors));
        debug_assert!(!numbers.is_empty() && !colors.is_empty());
        let changed = (numbers, colors) != (self.numbers, self.colors);
        self.numbers = numbers;
        self.colors = colors;
        changed
    }

    pub(crate) fn bind(&mut self, card: Card) {
        debug_assert!(self.resolved_card.is_none());
        debug_assert_eq!(self.specified_card(), Some(card));
        self.resolved_card = Some(card);
    }

    pub(crate) fn mark_used(&mut self, id: TileId) -> Result<Card, IllegalAction> {
        self.check_current(id)?;
        let card = self
            .resolved_card
            .ok_or(IllegalAction::TileNotResolved { tile: id })?;
        self.is_used = true;
        Ok(card)
    }

    fn check_current(&self, id: TileId) -> Result<(), IllegalAction> {
        if self.is_used {
            Err(IllegalAction::TileAlreadyUsed { tile: id })
        } else {
            Ok(())
        }
    }
}

/// Re-derives what `tile` could be, given the cards left in `pool`.
///
/// A number survives if some pool card has it in one of the tile's colors,
/// and vice versa. The result is always a subset of the tile's current
/// candidates. Both sets come back empty when no pool card fits the tile.
pub fn recompute_possibilities(tile: &Tile, pool: &Pool) -> (NumberSet, ColorSet) {
    let mut numbers = NumberSet::new();
    let mut colors = ColorSet::new();
    for &card in pool {
        if tile.could_be(card) {
            numbers = numbers.insert(card.number);
            colors = colors.insert(card.color);
        }
    }
    (numbers, colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, ColorRule};

    const ID: TileId = TileId { player: 0, slot: 0 };

    fn fresh() -> Tile {
        Tile::new(ColorRule::Standard.colors())
    }

    #[test]
    fn set_number_is_noop_when_already_held() {
        let mut tile = fresh();
        assert_eq!(tile.set_number(ID, Number::Three), Ok(true));
        assert_eq!(tile.set_number(ID, Number::Three), Ok(false));
        assert_eq!(
            tile.set_number(ID, Number::Four),
            Err(IllegalAction::NumberNotCandidate { tile: ID, number: Number::Four })
        );
    }

    #[test]
    fn cannot_eliminate_last_candidate() {
        let mut tile = fresh();
        tile.set_color(ID, Color::Blue).unwrap();
        assert_eq!(tile.set_not_color(ID, Color::Red), Ok(false));
        assert_eq!(
            tile.set_not_color(ID, Color::Blue),
            Err(IllegalAction::EliminatesLastColor { tile: ID, color: Color::Blue })
        );
        assert_eq!(tile.colors(), ColorSet::singleton(Color::Blue));
    }

    #[test]
    fn specification_through_elimination() {
        let mut tile = fresh();
        for number in [Number::One, Number::Two, Number::Three, Number::Four] {
            assert_eq!(tile.set_not_number(ID, number), Ok(true));
        }
        tile.set_color(ID, Color::White).unwrap();
        assert_eq!(tile.specified_card(), Some(card!("5w")));
    }

    #[test]
    fn used_tiles_reject_changes() {
        let mut tile = fresh();
        tile.set_number(ID, Number::One).unwrap();
        tile.set_color(ID, Color::Red).unwrap();
        assert_eq!(tile.mark_used(ID), Err(IllegalAction::TileNotResolved { tile: ID }));
        tile.bind(card!("1r"));
        assert_eq!(tile.mark_used(ID), Ok(card!("1r")));
        assert_eq!(
            tile.set_not_number(ID, Number::Two),
            Err(IllegalAction::TileAlreadyUsed { tile: ID })
        );
    }

    #[test]
    fn recompute_drops_exhausted_cards() {
        let mut pool = Pool::build(ColorRule::Standard.colors());
        pool.remove_one(card!("5r")).unwrap();
        let mut tile = fresh();
        tile.set_number(ID, Number::Five).unwrap();
        let (numbers, colors) = recompute_possibilities(&tile, &pool);
        assert_eq!(numbers, NumberSet::singleton(Number::Five));
        assert!(!colors.contains(Color::Red));
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn recompute_is_empty_without_matching_cards() {
        let mut pool = Pool::build(ColorRule::Standard.colors());
        pool.remove_one(card!("5g")).unwrap();
        let mut tile = fresh();
        tile.set_number(ID, Number::Five).unwrap();
        tile.set_color(ID, Color::Green).unwrap();
        let (numbers, colors) = recompute_possibilities(&tile, &pool);
        assert!(numbers.is_empty() && colors.is_empty());
    }
}
