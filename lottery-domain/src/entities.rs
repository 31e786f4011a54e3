// Domain entities
pub mod draw_record;
pub mod frequency_index;
pub mod game_profile;
pub mod record_store;

pub use draw_record::*;
pub use frequency_index::*;
pub use game_profile::*;
pub use record_store::*;
