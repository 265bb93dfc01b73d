pub mod logging;
pub mod time;

pub use logging::init_tracing;
pub use time::sleep_with_jitter;
