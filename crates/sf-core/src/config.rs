use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Hard upper bound on buffered input: 16 MiB.
pub const MAX_INPUT_SIZE: usize = 1 << 24;

/// Output variant produced by the decoder.
///
/// # Example
/// ```
/// use sf_core::config::OutputFormat;
/// let format: OutputFormat = "html".parse().unwrap();
/// assert_eq!(format, OutputFormat::Html);
/// assert!("pdf".parse::<OutputFormat>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum OutputFormat {
    /// UTF-8 text with bracketed section markers.
    #[default]
    Plain,
    /// UTF-8 HTML document with one span per section.
    Html,
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" | "txt" => Ok(Self::Plain),
            "html" | "htm" => Ok(Self::Html),
            other => Err(CoreError::Config(format!("unknown output format '{other}'"))),
        }
    }
}

/// Options specific to the HTML document wrapper.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Content of the `<title>` element.
    pub title: String,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// External stylesheet URL. Replaces the inline style block when set.
    pub stylesheet: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "Sahifeh".to_string(),
            lang: "fa".to_string(),
            stylesheet: None,
        }
    }
}

/// Configuration of a decode run.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use sf_core::config::{DecodeConfig, MAX_INPUT_SIZE, OutputFormat};
/// let config = DecodeConfig::default();
/// assert_eq!(config.format, OutputFormat::Plain);
/// assert_eq!(config.max_input_bytes, MAX_INPUT_SIZE);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Output variant.
    pub format: OutputFormat,
    /// Input beyond this many bytes is dropped. Never above [`MAX_INPUT_SIZE`].
    pub max_input_bytes: usize,
    /// Decode byte 0x00 as a line break, like 0x75.
    pub null_is_line_break: bool,
    /// HTML wrapper options.
    pub html: HtmlOptions,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            max_input_bytes: MAX_INPUT_SIZE,
            null_is_line_break: true,
            html: HtmlOptions::default(),
        }
    }
}

impl DecodeConfig {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.max_input_bytes = self.max_input_bytes.clamp(1, MAX_INPUT_SIZE);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    decode: Option<DecodeSection>,
    html: Option<HtmlSection>,
}

/// Decode section, all fields optional for partial override.
#[derive(Deserialize)]
struct DecodeSection {
    format: Option<OutputFormat>,
    max_input_bytes: Option<usize>,
    null_is_line_break: Option<bool>,
}

/// HTML section, all fields optional.
#[derive(Deserialize)]
struct HtmlSection {
    title: Option<String>,
    lang: Option<String>,
    stylesheet: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file does not exist, cannot be read, or does not
/// parse.
///
/// # Example
/// ```no_run
/// use sf_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DecodeConfig> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("TOML parse error in {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if `content` is not valid TOML for this schema.
///
/// # Example
/// ```
/// use sf_core::config::{parse_config, OutputFormat};
/// let config = parse_config("[decode]\nformat = \"Html\"\n").unwrap();
/// assert_eq!(config.format, OutputFormat::Html);
/// assert!(config.null_is_line_break);
/// ```
pub fn parse_config(content: &str) -> Result<DecodeConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = DecodeConfig::default();

    if let Some(d) = file.decode {
        if let Some(v) = d.format {
            config.format = v;
        }
        if let Some(v) = d.max_input_bytes {
            config.max_input_bytes = v;
        }
        if let Some(v) = d.null_is_line_break {
            config.null_is_line_break = v;
        }
    }
    if let Some(h) = file.html {
        if let Some(v) = h.title {
            config.html.title = v;
        }
        if let Some(v) = h.lang {
            config.html.lang = v;
        }
        if h.stylesheet.is_some() {
            config.html.stylesheet = h.stylesheet;
        }
    }

    config.clamp_all();
    Ok(config)
}
