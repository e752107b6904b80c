use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use sf_core::charset::{CharsetFile, write_hex_dump};
use sf_core::config::{DecodeConfig, OutputFormat};

pub mod cli;
pub mod input;

use cli::{Cli, RunMode};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider le mode
    cli.validate_mode()?;

    // 4. Charger la config, puis les overrides CLI
    let mut config = resolve_config(&cli)?;
    apply_overrides(&cli, &mut config);

    // 5. Lire l'entrée bornée
    let input = input::open_input(cli.input.as_deref(), config.max_input_bytes)?;

    // 6. Écrire sur stdout
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(cli.run_mode(), &config, &input.bytes, &mut out)?;
    out.flush().context("Failed to flush standard output")?;
    Ok(())
}

/// Resolve config: an explicit --config must exist, the default one may not.
fn resolve_config(cli: &Cli) -> Result<DecodeConfig> {
    if let Some(ref path) = cli.config {
        return sf_core::config::load_config(path);
    }
    let path = Path::new(cli::DEFAULT_CONFIG);
    if path.exists() {
        sf_core::config::load_config(path)
    } else {
        log::debug!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(DecodeConfig::default())
    }
}

fn apply_overrides(cli: &Cli, config: &mut DecodeConfig) {
    if let Some(ref format) = cli.format {
        config.format = match format.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(_) => {
                log::warn!("Format inconnu '{format}', utilisation du défaut.");
                config.format
            }
        };
    }
    if let Some(max) = cli.max_size {
        config.max_input_bytes = max;
    }
    config.clamp_all();
}

/// Run one mode over the buffered input.
fn run(mode: RunMode, config: &DecodeConfig, bytes: &[u8], out: &mut dyn Write) -> Result<()> {
    match mode {
        RunMode::Decode => {
            let report = sf_decode::decode(bytes, config, out)?;
            log::info!(
                "{} bytes, {} pages, {} English runs, {} unknown bytes",
                report.bytes_in,
                report.pages,
                report.english_runs,
                report.unknown_bytes()
            );
        }
        RunMode::Charset => {
            let file = CharsetFile::parse(bytes)?;
            file.write_report(out)
                .context("Failed to write charset report")?;
        }
        RunMode::HexDump => {
            write_hex_dump(out, bytes).context("Failed to write hex dump")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(mode: RunMode, config: &DecodeConfig, bytes: &[u8]) -> String {
        let mut out = Vec::new();
        run(mode, config, bytes, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn format_override_and_fallback() {
        let mut config = DecodeConfig::default();
        apply_overrides(&Cli::parse_from(["sahifeh", "--format", "html"]), &mut config);
        assert_eq!(config.format, OutputFormat::Html);
        apply_overrides(&Cli::parse_from(["sahifeh", "--format", "pdf"]), &mut config);
        assert_eq!(config.format, OutputFormat::Html);
    }

    #[test]
    fn max_size_override_is_clamped() {
        let mut config = DecodeConfig::default();
        apply_overrides(&Cli::parse_from(["sahifeh", "--max-size", "0"]), &mut config);
        assert_eq!(config.max_input_bytes, 1);
        apply_overrides(
            &Cli::parse_from(["sahifeh", "--max-size", "999999999999"]),
            &mut config,
        );
        assert_eq!(config.max_input_bytes, sf_core::config::MAX_INPUT_SIZE);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let cli = Cli::parse_from(["sahifeh", "--config", missing.to_str().unwrap()]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.toml");
        std::fs::write(&path, "[decode]\nformat = \"Html\"\n").unwrap();
        let cli = Cli::parse_from(["sahifeh", "--config", path.to_str().unwrap()]);
        assert_eq!(resolve_config(&cli).unwrap().format, OutputFormat::Html);
    }

    #[test]
    fn decode_mode_writes_text() {
        let text = run_to_string(RunMode::Decode, &DecodeConfig::default(), &[0x01, 0x20, 0x02]);
        assert_eq!(text, "\u{06A9}\u{0647} \u{0628}\u{0647}");
    }

    #[test]
    fn hexdump_mode_prefixes_offsets() {
        let text = run_to_string(RunMode::HexDump, &DecodeConfig::default(), &[0xAB; 20]);
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("00000000  ab ab"));
        assert!(lines.next().unwrap().starts_with("00000010  ab"));
    }

    #[test]
    fn charset_mode_rejects_short_input() {
        let mut out = Vec::new();
        let err = run(RunMode::Charset, &DecodeConfig::default(), &[0; 4], &mut out);
        assert!(err.is_err());
    }
}
