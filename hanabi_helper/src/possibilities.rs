use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::bitset::bitset_traits;
use crate::{Color, Number};

const ALL_NUMBER_BITS: u8 = 0b11111;
const ALL_COLOR_BITS: u8 = 0b111111;

/// Generates a compact set over a small enum, plus its iterator.
///
/// The element type needs `index()` and `from_index()`.
macro_rules! element_set {
    ($name:ident, $iter:ident, $elem:ident, $valid:expr) => {
        impl $name {
            /// Creates a new, empty set.
            pub fn new() -> Self {
                Self { bits: 0 }
            }

            /// The set of every element.
            pub fn all() -> Self {
                Self { bits: $valid }
            }

            pub fn singleton(elem: $elem) -> Self {
                Self::new().insert(elem)
            }

            pub fn len(self) -> u32 {
                self.bits.count_ones()
            }

            pub fn is_empty(self) -> bool {
                self.bits == 0
            }

            pub fn contains(self, elem: $elem) -> bool {
                (self.bits & (1u8 << elem.index())) != 0
            }

            /// The only element, if there is exactly one.
            pub fn single(self) -> Option<$elem> {
                if self.len() == 1 {
                    Some($elem::from_index(self.bits.trailing_zeros() as u8))
                } else {
                    None
                }
            }

            pub fn is_subset(self, other: Self) -> bool {
                self.bits & !other.bits == 0
            }

            #[must_use] // Because users might expect this to be a mutating method
            pub fn insert(self, elem: $elem) -> Self {
                Self {
                    bits: self.bits | (1u8 << elem.index()),
                }
            }

            #[must_use] // Because users might expect this to be a mutating method
            pub fn remove(self, elem: $elem) -> Self {
                Self {
                    bits: self.bits & !(1u8 << elem.index()),
                }
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<T: IntoIterator<Item = $elem>>(iter: T) -> Self {
                let mut bits = 0;
                for elem in iter {
                    bits |= 1u8 << elem.index();
                }
                Self { bits }
            }
        }

        impl IntoIterator for $name {
            type Item = $elem;

            type IntoIter = $iter;

            fn into_iter(self) -> Self::IntoIter {
                $iter { bits: self.bits }
            }
        }

        /// Iterator over the set in ascending declaration order.
        #[derive(Clone, Copy, Debug)]
        pub struct $iter {
            bits: u8,
        }

        impl Iterator for $iter {
            type Item = $elem;

            fn next(&mut self) -> Option<Self::Item> {
                if self.bits == 0 {
                    None
                } else {
                    let idx = self.bits.trailing_zeros() as u8;
                    self.bits ^= 1u8 << idx;
                    Some($elem::from_index(idx))
                }
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                let size = self.bits.count_ones() as usize;
                (size, Some(size))
            }
        }

        impl ExactSizeIterator for $iter {
            fn len(&self) -> usize {
                self.bits.count_ones() as usize
            }
        }

        impl FusedIterator for $iter {}

        impl From<Vec<$elem>> for $name {
            fn from(elems: Vec<$elem>) -> Self {
                Self::from_iter(elems)
            }
        }

        impl From<$name> for Vec<$elem> {
            fn from(set: $name) -> Self {
                set.into_iter().collect()
            }
        }

        bitset_traits!($name, $valid);
    };
}

/// The numbers a tile could still be.
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place (except for `std::ops::BitXxxAssign`
/// trait methods).
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
///
/// Serializes as an ascending list of numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Number>", into = "Vec<Number>")]
pub struct NumberSet {
    // Only the low 5 bits are used.
    bits: u8,
}

/// The colors a tile could still be. Same conventions as [`NumberSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Color>", into = "Vec<Color>")]
pub struct ColorSet {
    // Only the low 6 bits are used.
    bits: u8,
}

element_set!(NumberSet, NumberSetIter, Number, ALL_NUMBER_BITS);
element_set!(ColorSet, ColorSetIter, Color, ALL_COLOR_BITS);
