use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How many physical copies of each number exist per color, indexed by
/// [`Number::index()`].
pub const COUNT_PER_NUMBER: [u8; 5] = [3, 2, 2, 2, 1];

/// A physical card: one number in one color.
///
/// Cards have no identity beyond their number and color, two cards with the
/// same fields are interchangeable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub number: Number,
    pub color: Color,
}

/// The number of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Number {
    One,
    Two,
    Three,
    Four,
    Five,
}

/// The color of a [card](Card).
///
/// `Rainbow` only takes part in games using the rainbow
/// [color rule](crate::ColorRule).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    White,
    Rainbow,
}

impl Number {
    pub const ALL: [Number; 5] = [
        Number::One,
        Number::Two,
        Number::Three,
        Number::Four,
        Number::Five,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        Self::ALL[idx as usize]
    }

    /// The printed value, 1 to 5.
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Physical copies of this number in one color.
    pub fn copies(self) -> u8 {
        COUNT_PER_NUMBER[self.index()]
    }
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Rainbow,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        Self::ALL[idx as usize]
    }

    /// Single-letter code used by [`Card`]'s `FromStr` and `Display`.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::White => 'w',
            Color::Rainbow => 'm',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Rainbow => "rainbow",
        }
    }
}

/// The error type for converting an integer into a [`Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberOutOfRange(pub u8);

impl std::error::Error for NumberOutOfRange {}

impl std::fmt::Display for NumberOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card numbers go from 1 to 5, got {}", self.0)
    }
}

impl TryFrom<u8> for Number {
    type Error = NumberOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=5 => Ok(Number::from_index(value - 1)),
            _ => Err(NumberOutOfRange(value)),
        }
    }
}

impl From<Number> for u8 {
    fn from(number: Number) -> u8 {
        number.value()
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number.value(), self.color.letter())
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidNumber,
    InvalidColor,
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::LessThanTwoChars => {
                write!(f, "Card code is shorter than two characters")
            }
            CardFromStrErr::MoreThanTwoChars => {
                write!(f, "Card code is longer than two characters")
            }
            CardFromStrErr::InvalidNumber => {
                write!(f, "Card code starts with an invalid number")
            }
            CardFromStrErr::InvalidColor => {
                write!(f, "Card code ends with an invalid color letter")
            }
        }
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let number_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let color_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let number = number_char
            .to_digit(10)
            .and_then(|d| Number::try_from(d as u8).ok())
            .ok_or(CardFromStrErr::InvalidNumber)?;
        let color = Color::ALL
            .into_iter()
            .find(|c| c.letter() == color_char.to_ascii_lowercase())
            .ok_or(CardFromStrErr::InvalidColor)?;
        Ok(Card { number, color })
    }
}

/// Shorthand for creating cards from a two-character string.
///
/// The first character is the [number](Number), the second is the
/// [color](Color) letter (`r`, `y`, `g`, `b`, `w`, or `m` for rainbow).
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use hanabi_helper::{card, Card, Color, Number};
/// assert_eq!(
///     card!("3r"),
///     Card { number: Number::Three, color: Color::Red }
/// );
/// ```
#[macro_export]
macro_rules! card {
    ($nc:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($nc)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see
// https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;
