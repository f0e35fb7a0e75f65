pub mod error;
pub mod registry;

pub use error::{PulseError, Result};
pub use registry::SeriesRegistry;
