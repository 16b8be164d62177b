pub mod config;
pub mod engine;
pub mod opener;

pub use engine::{search, SearchOptions, SearchResult};
pub use opener::{open_result, OpenError};
