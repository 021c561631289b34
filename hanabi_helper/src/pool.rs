use serde::Serialize;

use crate::{Card, ColorSet, IllegalAction, NumberSet, COUNT_PER_NUMBER};

/// The physical cards not yet bound to any tile.
///
/// Starts as the full deck of a game and only shrinks, one card per tile
/// that gets resolved. Cards keep their insertion order (color-major, then
/// by number).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pool {
    cards: Vec<Card>,
}

impl Pool {
    /// The full deck for the given colors.
    pub fn build(colors: ColorSet) -> Self {
        Self::with_counts(NumberSet::all(), colors, &COUNT_PER_NUMBER)
    }

    /// Emits `counts[number]` copies of every number for every color.
    ///
    /// No shuffling happens, the tool never deals cards.
    pub fn with_counts(numbers: NumberSet, colors: ColorSet, counts: &[u8; 5]) -> Self {
        let mut cards = Vec::new();
        for color in colors {
            for number in numbers {
                for _ in 0..counts[number.index()] {
                    cards.push(Card { number, color });
                }
            }
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Copies of `card` that are left.
    pub fn count(&self, card: Card) -> usize {
        self.count_matching(|c| c == card)
    }

    pub fn count_matching<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(Card) -> bool,
    {
        self.cards.iter().filter(|&&c| predicate(c)).count()
    }

    /// Takes one copy of `card` out of the pool.
    pub(crate) fn remove_one(&mut self, card: Card) -> Result<Card, IllegalAction> {
        let idx = self
            .cards
            .iter()
            .position(|&c| c == card)
            .ok_or(IllegalAction::CardNotInPool { card })?;
        Ok(self.cards.remove(idx))
    }

    #[cfg(test)]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.cards.truncate(len);
    }
}

impl<'a> IntoIterator for &'a Pool {
    type Item = &'a Card;

    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
