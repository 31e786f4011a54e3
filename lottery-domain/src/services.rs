// Pure domain services

pub mod sync_plan;

pub use sync_plan::*;
