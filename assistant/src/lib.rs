mod config;
mod recording;
mod session;
mod simulation;
pub use config::*;
pub use recording::*;
pub use session::*;
pub use simulation::*;
