//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ascii::ScalarPolicy;
use crate::prompt::check_width;

/// Parse and validate the output width (50-340 columns)
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    check_width(width)
}

/// Convert every image in a directory into ASCII art text files
#[derive(Parser, Debug)]
#[command(name = "image-to-ascii")]
#[command(version, about = "Image to ASCII: Convert images into ASCII characters!", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Prompt for width and ramp, convert ./images into ./ascii_conversions
    image-to-ascii

    # Non-interactive, 120 columns, inverted ramp
    image-to-ascii -w 120 --invert

    # Custom directories
    image-to-ascii -i photos -o out -w 200 --normal")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing .jpg, .png and .bmp images
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Directory receiving <name>_ascii.txt files
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output width in columns (50-340)
    #[arg(long, short, value_parser = parse_width)]
    pub width: Option<u32>,

    /// Use the inverted glyph ramp
    #[arg(long, conflicts_with = "normal")]
    pub invert: bool,

    /// Use the normal glyph ramp
    #[arg(long)]
    pub normal: bool,

    /// How to render grayscale pixels
    #[arg(long)]
    pub grayscale: Option<ScalarPolicy>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Ramp choice given on the command line, if any.
    pub fn invert_choice(&self) -> Option<bool> {
        match (self.invert, self.normal) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}
