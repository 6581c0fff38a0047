//! Configuration
//!
//! XDG-style path resolution and the persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
