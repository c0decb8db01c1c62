//! Configuration loaded from `.foldervault.toml`.

pub mod settings;

pub use settings::Settings;
