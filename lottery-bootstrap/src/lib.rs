pub mod cli;
pub mod context;
pub mod lifecycle;
pub mod logging;

pub use cli::Command;
pub use context::AppContext;
pub use lifecycle::run;
