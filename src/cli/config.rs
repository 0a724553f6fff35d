// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use tagsniff::{ParseOptions, ParsingMode, TextDecoding};

use crate::cli::output::OutputFormat;

/// tagsniff - print the tags of Ogg/Vorbis and MP3 files
#[derive(Parser, Debug)]
#[command(name = "tagsniff")]
#[command(about = "Read Vorbis comments and ID3 tags from audio files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep whatever was read before a truncated or corrupt frame
    #[arg(long, global = true)]
    pub best_effort: bool,

    /// Decode UTF-16 ID3v2 frames byte by byte, like older readers
    #[arg(long, global = true)]
    pub legacy_text: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Which reader to use for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Reader {
    /// Pick by magic bytes
    #[default]
    Auto,
    Ogg,
    /// ID3v2 if present, otherwise ID3v1
    Id3,
    Id3v1,
    Id3v2,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from audio file(s)
    Read {
        /// Audio file path(s) or glob patterns
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Reader to use
        #[arg(short, long, value_enum, default_value = "auto")]
        reader: Reader,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Detect tag format
    Detect {
        /// Audio file path(s) or glob patterns
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },
}

impl Config {
    /// Decoder options selected by the global flags
    pub fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.best_effort {
            options = options.parsing_mode(ParsingMode::BestEffort);
        }
        if self.legacy_text {
            options = options.text_decoding(TextDecoding::Legacy);
        }
        options
    }

    /// Default log filter for env_logger
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
