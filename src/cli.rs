//! Command-line interface for inspecting composer behavior
//!
//! Supports:
//! - Parsing a canonical string into a document
//! - Checking that a canonical string survives a round trip
//! - Running trigger detection at a cursor offset
//! - Listing and filtering templates
//! - Showing and updating the composer config

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::ComposerConfig;
use crate::serializer::{self, DocumentSkeleton};
use crate::templates::{filter_templates, YamlTemplateCatalog};
use crate::trigger;

/// Reference-aware composer tools
#[derive(Parser, Debug)]
#[command(name = "inlay", version, about = "Reference-aware composer tools")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Parse a canonical string and print the document as JSON
    Parse {
        /// Canonical text (reads stdin if omitted)
        text: Option<String>,
    },
    /// Parse and re-serialize, failing if the result differs
    Roundtrip {
        /// Canonical text (reads stdin if omitted)
        text: Option<String>,
    },
    /// Show the trigger governing a cursor position
    Detect {
        /// Plain text to scan
        text: String,
        /// Cursor offset in characters (defaults to end of text)
        #[arg(long, value_name = "N")]
        cursor: Option<usize>,
    },
    /// List templates matching a filter
    Templates {
        /// Templates file (defaults to the one in the config directory)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Case-insensitive filter on title, description, and category
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Print the effective configuration as YAML
    Config {
        /// Set the search debounce window and save the config file
        #[arg(long, value_name = "MS")]
        debounce_ms: Option<u64>,
    },
}

/// Run a command, returning what it prints
pub fn run(args: CliArgs) -> Result<String> {
    match args.command {
        CliCommand::Parse { text } => {
            let source = text_or_stdin(text)?;
            let document = offline_skeleton(&source);
            serde_json::to_string_pretty(&document).context("Failed to encode document")
        }
        CliCommand::Roundtrip { text } => {
            let source = text_or_stdin(text)?;
            let output = serializer::serialize(&offline_skeleton(&source));
            if output != source {
                bail!("Round trip changed the text:\n  in:  {:?}\n  out: {:?}", source, output);
            }
            Ok(output)
        }
        CliCommand::Detect { text, cursor } => {
            let cursor = cursor.unwrap_or_else(|| text.chars().count());
            match trigger::detect(&text, cursor) {
                Some(ctx) => {
                    serde_json::to_string_pretty(&ctx).context("Failed to encode trigger")
                }
                None => Ok("null".to_string()),
            }
        }
        CliCommand::Templates { file, filter } => {
            let catalog = match file {
                Some(path) => YamlTemplateCatalog::from_file(&path)?,
                None => YamlTemplateCatalog::load_default(),
            };
            let lines: Vec<String> = filter_templates(catalog.items(), &filter)
                .into_iter()
                .map(|t| format!("{}\t{}\t{}", t.id, t.title, t.category))
                .collect();
            Ok(lines.join("\n"))
        }
        CliCommand::Config { debounce_ms } => {
            let mut config = ComposerConfig::load();
            if let Some(ms) = debounce_ms {
                config.set_debounce_ms(ms).map_err(anyhow::Error::msg)?;
            }
            let yaml = serde_yaml::to_string(&config).context("Failed to encode config")?;
            Ok(yaml.trim_end().to_string())
        }
    }
}

/// Resolve without a preview source: every block gets its placeholder preview
fn offline_skeleton(source: &str) -> crate::model::Document {
    DocumentSkeleton::parse(source).resolve_with(|_| Some(String::new()))
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf.strip_suffix('\n').map(str::to_string).unwrap_or(buf))
        }
    }
}
