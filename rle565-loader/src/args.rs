//! Command-line argument parsing for logo tools.
//!
//! This module is only available when the `cli` feature is enabled.
//! It parses command-line arguments and merges them over a [`LogoConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use rle565_loader::args::Args;
//! use rle565_loader::LogoConfig;
//!
//! let args = Args::parse();
//! let config = LogoConfig::from_args(&args)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::LogoConfig;
use crate::errors::LoadError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the decoded surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Surface memory exactly as written (4 bytes per pixel).
    Raw,
    /// Binary PPM (P6) preview.
    Ppm,
}

/// Logo tool command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// RLE565 image to decode (defaults to the configured path)
    #[arg(value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(short = 'W', long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Surface height in pixels
    #[arg(short = 'H', long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Reserved capability flag (accepted, currently has no effect)
    #[arg(long)]
    pub capability_flag: bool,

    /// Configuration file path (TOML format)
    #[arg(short = 'c', long, value_name = "FILE", env = "LOGO_BLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the decoded surface to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format of the output file
    #[arg(short = 'f', long, value_enum, default_value_t = DumpFormat::Raw, requires = "output")]
    pub format: DumpFormat,

    /// Enable verbose logging (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse arguments from an iterator.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}

impl LogoConfig {
    /// Create a configuration from command-line arguments.
    ///
    /// If a config file is specified it is loaded first, then overridden by the
    /// explicit command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or the
    /// merged configuration fails validation.
    pub fn from_args(args: &Args) -> Result<Self, LoadError> {
        let mut config = match &args.config {
            Some(path) => LogoConfig::load(path)?,
            None => LogoConfig::default(),
        };

        if let Some(image) = &args.image {
            config.image.path = image.clone();
        }
        if let Some(width) = args.width {
            config.surface.width = width;
        }
        if let Some(height) = args.height {
            config.surface.height = height;
        }
        if args.capability_flag {
            config.image.capability_flag = true;
        }
        if args.verbose > 0 {
            config.logging.filter = match args.verbose {
                1 => "debug",
                _ => "trace",
            }
            .to_string();
        }

        config.validate()?;
        Ok(config)
    }
}
