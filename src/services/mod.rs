pub mod auth_service;
pub mod card_pool_service;
pub mod dashboard_service;
pub mod game_service;
pub mod journal_service;
pub mod pile_draw_service;
pub mod release_service;

pub use auth_service::*;
pub use card_pool_service::*;
pub use dashboard_service::*;
pub use game_service::*;
pub use journal_service::*;
pub use pile_draw_service::*;
pub use release_service::*;
