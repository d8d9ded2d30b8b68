pub mod common;
pub mod dashboard;
pub mod game_score;
pub mod journal;
pub mod luck_card;
pub mod pile;
pub mod release_note;
pub mod user;

pub use common::*;
pub use dashboard::*;
pub use game_score::*;
pub use journal::*;
pub use luck_card::*;
pub use pile::*;
pub use release_note::*;
pub use user::*;
