pub mod types;
pub mod scanner;
pub mod parser;
pub mod matcher;
pub mod search;

pub use types::{MindMapFile, MindMapNode, ParseError, SearchOptions, SearchResult};
pub use scanner::scan_folder;
pub use parser::parse_mind_map;
pub use matcher::{match_node, MatchOutcome};
pub use search::search;
