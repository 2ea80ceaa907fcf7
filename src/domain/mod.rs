pub mod game;
mod lenient;
pub mod odds;
pub mod player;
pub mod row;

pub use game::*;
pub use odds::*;
pub use player::*;
pub use row::*;
