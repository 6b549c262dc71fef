pub mod calendar;
pub mod cheat;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod exec;
pub mod fs;
pub mod log;
pub mod markdown;
pub mod search;

// Re-export commonly used types
pub use config::{Config, Finder};
pub use entry::{Entry, EntryKind, Section};
pub use error::DailyError;
pub use fs::DailyStore;
