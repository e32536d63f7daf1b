//! image-to-ascii library crate.
//!
//! Converts raster images into ASCII art text, one `<name>_ascii.txt` per image.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod convert;
pub mod prompt;
