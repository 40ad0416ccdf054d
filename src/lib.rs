//! img2pix - pixel art from the command line
//!
//! Decoding, configuration and batch plumbing around the `pixel-art`
//! pipeline. This library exposes modules for integration testing.

pub mod assets;
pub mod codec;
pub mod error;
pub mod models;
pub mod services;
