//! Alert log
//!
//! Alerts raised by the event handlers are appended to a line-delimited
//! JSON file (JSONL), one [`AlertEntry`] per line.

mod entry;
mod logger;

pub use entry::AlertEntry;
pub use logger::AlertLogger;
