pub mod converter;

pub use converter::{BatchReport, ConvertReport, ConvertService};
