pub mod environment;
pub mod project;

pub use environment::validate_environment;
pub use project::{ProjectConfig, load_config, load_config_with, resolve_project_dir};
