pub mod filter;
pub mod granularity;
pub mod point;
pub mod schema;
pub mod series;

pub use filter::TimeSeriesFilter;
pub use granularity::Granularity;
pub use point::TimeSeriesPoint;
pub use schema::{FieldReduction, SeriesSchema};
pub use series::SeriesKey;
