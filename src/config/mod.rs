//! Configuration module for sharetab
//!
//! - Data directory resolution (env override or platform config dir)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SharetabPaths;
pub use settings::Settings;
