// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use termguard::app_config::{self, Config};
use termguard::errors::AppError;
use termguard::glossary::{GlossaryStore, LoadStatus, write_curated_glossary};
use termguard::language_utils::{KNOWN_LANGUAGES, get_language_name};
use termguard::pipeline::{GlossaryPipeline, IdentityTranslator};
use termguard::protection::{PlaceholderMap, TermProtector, restore_terms};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace glossary terms with placeholders and print text and map as JSON
    Protect {
        /// Text to protect ("-" reads standard input)
        text: String,

        /// Target language (e.g. 'hindi')
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Replace placeholders in translated text with their target terms
    Restore {
        /// Translated text ("-" reads standard input)
        text: String,

        /// Placeholder map printed by `protect`, as a file path or inline JSON
        #[arg(short, long)]
        map: String,
    },

    /// Protect, translate with the identity function, and restore
    Roundtrip {
        /// Text to process ("-" reads standard input)
        text: String,

        /// Target language (e.g. 'hindi')
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Print glossary statistics as JSON
    Stats,

    /// Write the built-in curated glossary resource
    Generate {
        /// Output file (defaults to the configured glossary path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recognized target languages
    Languages,

    /// Generate shell completions for termguard
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// termguard - glossary term protection for machine translation
///
/// Shields domain terminology from a translation model by swapping terms for
/// placeholders before translation and restoring approved target-language
/// terms afterwards.
#[derive(Parser, Debug)]
#[command(name = "termguard")]
#[command(version)]
#[command(about = "Glossary term protection for machine translation")]
#[command(long_about = "termguard protects glossary terms from machine translation.

EXAMPLES:
    termguard protect \"Check the nut\" -t hindi        # Print protected text and placeholder map
    termguard restore \"Check XGLOSSARYX0001X\" -m map.json
    termguard roundtrip \"Arm the device\"              # Protect and restore without a model
    termguard stats                                   # Glossary statistics
    termguard generate -o resources/defense_glossary.json
    termguard completions bash > termguard.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Glossary file (overrides the configuration)
    #[arg(short, long, global = true)]
    glossary: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Logger starts at info; the configured level is applied once known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termguard", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            for (name, code) in KNOWN_LANGUAGES {
                let iso_name = get_language_name(code).unwrap_or_else(|_| "unknown".to_string());
                println!("{:<10} {}  {}", name, code, iso_name);
            }
            Ok(())
        }
        Commands::Restore { text, map } => {
            let text = read_text_arg(&text)?;
            let placeholders = read_placeholder_map(&map)?;
            let restoration = restore_terms(&text, &placeholders);
            println!("{}", restoration.text);
            Ok(())
        }
        command => {
            let config = load_config(&cli.config_path, cli.glossary.as_deref(), cli.log_level.is_some())?;
            run_with_config(command, &config)
        }
    }
}

/// Load, override and validate the configuration
fn load_config(config_path: &str, glossary: Option<&Path>, level_from_cli: bool) -> Result<Config> {
    let mut config = Config::load_or_create(Path::new(config_path))?;

    if let Some(path) = glossary {
        config.glossary.path = path.to_string_lossy().into_owned();
        config.glossary.enabled = true;
    }

    config.validate().context("Configuration validation failed")?;

    if !level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Using configuration: {:?}", config);
    Ok(config)
}

fn run_with_config(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Protect { text, target_language } => {
            let text = read_text_arg(&text)?;
            let language = target_language.unwrap_or_else(|| config.target_language.clone());
            let protector = TermProtector::new(Arc::new(load_store(config)?));

            let protection = protector.protect(&text, &language);
            let output = serde_json::json!({
                "protected_text": protection.text,
                "placeholders": protection.placeholders,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Commands::Roundtrip { text, target_language } => {
            let text = read_text_arg(&text)?;
            let language = target_language.unwrap_or_else(|| config.target_language.clone());
            let pipeline = GlossaryPipeline::from_config(config);

            let output = pipeline.translate(&text, &language, &IdentityTranslator)?;
            info!("Protected text: {}", output.protected_text);
            println!("{}", output.text);
            Ok(())
        }
        Commands::Stats => {
            let store = load_store(config)?;
            println!("{}", serde_json::to_string_pretty(&store.stats())?);
            Ok(())
        }
        Commands::Generate { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.glossary.path));
            let count = write_curated_glossary(&path)?;
            println!("Wrote {} curated entries to {}", count, path.display());
            Ok(())
        }
        Commands::Completions { .. } | Commands::Languages | Commands::Restore { .. } => {
            Err(anyhow!("Command does not use the configuration"))
        }
    }
}

/// Load the configured glossary; a malformed file is reported to the user
fn load_store(config: &Config) -> Result<GlossaryStore> {
    if !config.glossary.enabled {
        info!("Glossary protection disabled by configuration");
        return Ok(GlossaryStore::empty());
    }

    let store = GlossaryStore::load(&config.glossary.path);
    if let LoadStatus::Failed(e) = store.status() {
        return Err(AppError::Glossary(e.clone()).into());
    }
    Ok(store)
}

/// Read a positional text argument, with "-" meaning standard input
fn read_text_arg(text: &str) -> Result<String> {
    if text != "-" {
        return Ok(text.to_string());
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from standard input")?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

/// Parse a placeholder map given inline or as a path to a JSON file
fn read_placeholder_map(map: &str) -> Result<PlaceholderMap> {
    let json = if map.trim_start().starts_with('{') {
        map.to_string()
    } else {
        std::fs::read_to_string(map).with_context(|| format!("Failed to read placeholder map: {}", map))?
    };

    let value: serde_json::Value = serde_json::from_str(&json).context("Failed to parse placeholder map")?;
    // Accept both the bare map and the full `protect` output
    let nested = value.get("placeholders").cloned();
    let placeholders = nested.unwrap_or(value);
    serde_json::from_value(placeholders).context("Placeholder map must be an object of strings")
}
