//! Core data models for the player stats API.

mod award;
mod career;
mod player;
mod season;
mod table;

pub use award::*;
pub use career::*;
pub use player::*;
pub use season::*;
pub use table::*;
