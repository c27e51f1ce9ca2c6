pub mod config;
pub mod raw;
pub mod registry;
pub mod snapshot;

pub use config::AnalysisConfig;
pub use raw::{RawCharacter, RawItem, RawItemDescription, RawStatRow};
pub use snapshot::{load_characters, load_items, save_characters, save_items};
