pub mod http_fetcher;
pub mod system_clock;

pub use http_fetcher::*;
pub use system_clock::*;
