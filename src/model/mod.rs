pub mod config;
pub mod registry;
pub mod stats;
pub mod task;

pub use config::*;
pub use registry::*;
pub use stats::*;
pub use task::*;
