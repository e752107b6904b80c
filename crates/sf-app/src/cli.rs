use std::path::PathBuf;

use clap::Parser;

/// Default config location, used only if it exists.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Transcode to text or HTML.
    Decode,
    /// Print a charset-table inspection report.
    Charset,
    /// Print a raw hex dump.
    HexDump,
}

/// sahifeh: decoder for Sahifeh-encoded books.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier d'entrée. Lit l'entrée standard si absent.
    pub input: Option<PathBuf>,

    /// Format de sortie : text, html.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Treat the input as a charset-table file and print its layout.
    #[arg(long, default_value_t = false)]
    pub charset: bool,

    /// Print a hex dump of the input instead of decoding it.
    #[arg(long, default_value_t = false)]
    pub hexdump: bool,

    /// Fichier de configuration TOML. Défaut : config/default.toml s'il existe.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of input bytes read; the rest is dropped.
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that at most one alternate mode is requested.
    ///
    /// # Errors
    /// Returns an error if both `--charset` and `--hexdump` are given.
    pub fn validate_mode(&self) -> anyhow::Result<()> {
        if self.charset && self.hexdump {
            anyhow::bail!("--charset and --hexdump are mutually exclusive.");
        }
        Ok(())
    }

    #[must_use]
    pub fn run_mode(&self) -> RunMode {
        if self.charset {
            RunMode::Charset
        } else if self.hexdump {
            RunMode::HexDump
        } else {
            RunMode::Decode
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_decoding_stdin() {
        let cli = Cli::parse_from(["sahifeh"]);
        assert!(cli.input.is_none());
        assert_eq!(cli.run_mode(), RunMode::Decode);
        assert_eq!(cli.log_level, "warn");
        assert!(cli.validate_mode().is_ok());
    }

    #[test]
    fn alternate_modes() {
        let cli = Cli::parse_from(["sahifeh", "--charset", "font.chr"]);
        assert_eq!(cli.run_mode(), RunMode::Charset);
        let cli = Cli::parse_from(["sahifeh", "--hexdump", "--max-size", "64", "book.sah"]);
        assert_eq!(cli.run_mode(), RunMode::HexDump);
        assert_eq!(cli.max_size, Some(64));
    }

    #[test]
    fn conflicting_modes_are_rejected() {
        let cli = Cli::parse_from(["sahifeh", "--charset", "--hexdump"]);
        assert!(cli.validate_mode().is_err());
    }
}
