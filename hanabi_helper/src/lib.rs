pub use action::*;
pub use cards::*;
pub use config::*;
pub use errors::*;
pub use game::*;
pub use hint::*;
pub use history::*;
pub use player::*;
pub use pool::*;
pub use possibilities::*;
pub use protocol_types::*;
pub use state::*;
pub use tile::*;
pub use views::*;
pub use visualization::*;

mod action;
#[cfg(test)]
mod arbitrary;
mod bitset;
mod cards;
mod config;
mod errors;
mod game;
mod hint;
mod history;
mod player;
mod pool;
mod possibilities;
mod propagation;
mod protocol_types;
mod state;
mod tile;
mod views;
mod visualization;
