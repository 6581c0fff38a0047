//! Storage layer
//!
//! JSON file helpers with atomic writes and the seed document loader.

pub mod file_io;
pub mod seed;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use seed::{load_seed, save_seed, SeedData};
