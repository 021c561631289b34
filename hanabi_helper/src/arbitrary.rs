use quickcheck::{Arbitrary, Gen};

use crate::{Color, ColorRule, Number};

/// A random sequence of user actions on a fresh game.
///
/// Steps pick tiles and values by index into whatever is valid at the time
/// they run, so most of them succeed; the rest exercise the error paths.
#[derive(Clone, Debug)]
pub struct Script {
    pub players: u8,
    pub color_rule: ColorRule,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug)]
pub enum Step {
    Hint {
        player: u8,
        /// Bit `i` selects current slot `i`.
        mask: u8,
        number: Option<Number>,
        color: Option<Color>,
    },
    AssignNumber { tile: u8, pick: u8 },
    AssignColor { tile: u8, pick: u8 },
    Use { tile: u8 },
    Undo,
}

impl Arbitrary for Script {
    fn arbitrary(g: &mut Gen) -> Self {
        Script {
            players: *g.choose(&[2, 3, 4, 5]).unwrap(),
            color_rule: ColorRule::arbitrary(g),
            steps: Vec::arbitrary(g),
        }
    }
}

impl Arbitrary for Step {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 10 {
            0..=3 => {
                // Mostly single-dimension clues, like real hints.
                let (number, color) = match u8::arbitrary(g) % 3 {
                    0 => (Some(Number::arbitrary(g)), None),
                    1 => (None, Some(Color::arbitrary(g))),
                    _ => (Some(Number::arbitrary(g)), Some(Color::arbitrary(g))),
                };
                Step::Hint {
                    player: u8::arbitrary(g),
                    mask: u8::arbitrary(g),
                    number,
                    color,
                }
            }
            4 | 5 => Step::AssignNumber {
                tile: u8::arbitrary(g),
                pick: u8::arbitrary(g),
            },
            6 | 7 => Step::AssignColor {
                tile: u8::arbitrary(g),
                pick: u8::arbitrary(g),
            },
            8 => Step::Use {
                tile: u8::arbitrary(g),
            },
            _ => Step::Undo,
        }
    }
}

impl Arbitrary for ColorRule {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[ColorRule::Standard, ColorRule::Rainbow]).unwrap()
    }
}

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Number::ALL).unwrap()
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Color::ALL).unwrap()
    }
}
