//! Logging initialization
//!
//! Console logging through `tracing-subscriber`, as text or JSON lines.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
