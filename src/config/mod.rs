//! Configuration file management.

mod manager;

pub use manager::{
    BackendConfig, ConfigFile, ConfigManager, LogConfig, PathsConfig, ReviewConfig,
};
