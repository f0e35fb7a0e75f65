pub mod backend;

pub use backend::{InfluxBackend, MemoryBackend, SeriesBackend, TimescaleBackend};
