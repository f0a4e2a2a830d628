//! opgen command-line front end
//!
//! `generate`, `copy` and `save` mirror the three actions of the password
//! form. Passwords and results go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opgen::clipboard::copy_text;
use opgen::{
    generate_password, AppConfig, CredentialRecord, ExportResult, Exporter, ExporterConfig,
    GenerationConfig, ItemSummary, SystemClipboard,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the configured generation options
#[derive(Args, Debug, Clone, Default)]
struct GenerationArgs {
    /// Password length
    #[arg(short, long)]
    length: Option<usize>,

    /// Include uppercase letters
    #[arg(long, overrides_with = "no_uppercase")]
    uppercase: bool,

    /// Leave out uppercase letters
    #[arg(long, overrides_with = "uppercase")]
    no_uppercase: bool,

    /// Include lowercase letters
    #[arg(long, overrides_with = "no_lowercase")]
    lowercase: bool,

    /// Leave out lowercase letters
    #[arg(long, overrides_with = "lowercase")]
    no_lowercase: bool,

    /// Include digits
    #[arg(long, overrides_with = "no_numbers")]
    numbers: bool,

    /// Leave out digits
    #[arg(long, overrides_with = "numbers")]
    no_numbers: bool,

    /// Include symbols
    #[arg(long, overrides_with = "no_symbols")]
    symbols: bool,

    /// Leave out symbols
    #[arg(long, overrides_with = "symbols")]
    no_symbols: bool,
}

/// `--x` forces a class on, `--no-x` off, neither keeps `base`
fn toggle(base: bool, on: bool, off: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        base
    }
}

impl GenerationArgs {
    fn apply(&self, base: &GenerationConfig) -> GenerationConfig {
        GenerationConfig {
            length: self.length.unwrap_or(base.length),
            include_uppercase: toggle(base.include_uppercase, self.uppercase, self.no_uppercase),
            include_lowercase: toggle(base.include_lowercase, self.lowercase, self.no_lowercase),
            include_numbers: toggle(base.include_numbers, self.numbers, self.no_numbers),
            include_symbols: toggle(base.include_symbols, self.symbols, self.no_symbols),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate and print passwords
    Generate {
        #[command(flatten)]
        options: GenerationArgs,

        /// Number of passwords
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Also copy the last password to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Generate a password and copy it without printing
    Copy {
        #[command(flatten)]
        options: GenerationArgs,
    },

    /// Save a login item to 1Password
    Save {
        /// Item title
        #[arg(short, long)]
        title: String,

        /// Username
        #[arg(short, long)]
        username: Option<String>,

        /// Website URL
        #[arg(short, long)]
        website: Option<String>,

        /// Password to store; generated when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Target vault
        #[arg(long)]
        vault: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: GenerationArgs,
    },
}

fn init_logging(debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!("opgen v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        // An explicit path must load
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load_or_default(None),
    };

    match cli.command {
        Command::Generate { options, count, copy } => {
            let generation = options.apply(&config.generator);
            let mut last = String::new();
            for _ in 0..count {
                last = generate_password(&generation)?;
                println!("{}", last);
            }
            if copy && !last.is_empty() {
                copy_to_clipboard(&last)?;
                info!("copied password to clipboard");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Copy { options } => {
            let password = generate_password(&options.apply(&config.generator))?;
            copy_to_clipboard(&password)?;
            info!("copied a {}-character password to clipboard", password.chars().count());
            Ok(ExitCode::SUCCESS)
        }
        Command::Save {
            title,
            username,
            website,
            password,
            vault,
            json,
            options,
        } => {
            let (password, generated) =
                password_for_save(password, &options.apply(&config.generator))?;
            if generated && !json {
                println!("{}", password);
            }

            let exporter = Exporter::new(exporter_config(&config.exporter, vault, json));
            debug!(vault = ?exporter.config().vault, "saving login item");

            let record = CredentialRecord {
                title,
                username,
                password,
                website,
            };
            let result = exporter.export(&record).await;
            report(&result, json)?;

            Ok(ExitCode::from(exit_status(&result)))
        }
    }
}

/// Password given on the command line, or a generated one (`true` when generated)
fn password_for_save(
    given: Option<String>,
    generation: &GenerationConfig,
) -> opgen::Result<(String, bool)> {
    match given {
        Some(password) => Ok((password, false)),
        None => Ok((generate_password(generation)?, true)),
    }
}

/// Configured exporter settings with the command-line overrides
fn exporter_config(base: &ExporterConfig, vault: Option<String>, json: bool) -> ExporterConfig {
    let mut config = base.clone();
    if vault.is_some() {
        config.vault = vault;
    }
    config.json_output |= json;
    config
}

fn exit_status(result: &ExportResult) -> u8 {
    if result.is_success() { 0 } else { 1 }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = SystemClipboard::new().context("Clipboard unavailable")?;
    copy_text(&mut clipboard, text)?;
    Ok(())
}

/// Text shown for `result`; failures in human mode go to stderr
fn render(result: &ExportResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    Ok(match result {
        ExportResult::Success { raw_output } => match ItemSummary::parse(raw_output) {
            Some(item) => format!("Saved \"{}\" ({})", item.title, item.id),
            None => raw_output.trim_end().to_string(),
        },
        ExportResult::Failure { message } => format!("Save failed: {}", message),
    })
}

fn report(result: &ExportResult, json: bool) -> Result<()> {
    let text = render(result, json)?;
    if json || result.is_success() {
        println!("{}", text);
    } else {
        eprintln!("{}", text);
    }
    Ok(())
}
