pub mod config;

pub use config::{parse_color, AppConfig, OutputConfig, ParameterSet};
