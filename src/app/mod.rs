//! Main application modules.
//!
//! This module provides progress logging and shutdown handling for the run
//! loop, and the end-of-run statistics printed by the binary.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::spawn_progress_logger;
pub use shutdown::shutdown_gracefully;
pub use statistics::{lookup_statistics_lines, print_lookup_statistics};
