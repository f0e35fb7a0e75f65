pub mod bucket;
pub mod filter;
pub mod options;
pub mod resolver;

pub use options::QueryOptions;
pub use resolver::QueryResolver;
