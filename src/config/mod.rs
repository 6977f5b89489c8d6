//! Configuration module for Lajan
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LajanPaths;
pub use settings::Settings;
