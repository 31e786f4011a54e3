// Domain value objects
pub mod cadence;
pub mod game_id;
pub mod period_selector;
pub mod special_rule;

pub use cadence::*;
pub use game_id::*;
pub use period_selector::*;
pub use special_rule::*;
