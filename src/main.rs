mod collection;
mod config;
mod document;
mod form;
mod list_edit;
mod model;
mod steps;
mod tui;
mod view;
mod wizard;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use dialoguer::Confirm;
use document::OutputPaths;
use model::Resume;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wizard::Wizard;

#[derive(Parser, Debug)]
#[command(
    name = "resume-wizard",
    version,
    about = "Build a resume in the terminal and render it as YAML and Markdown"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Log at debug level")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Start the interactive wizard (the default).
    Create {
        #[arg(long, help = "Pre-fill every step from an existing YAML resume")]
        from: Option<PathBuf>,

        #[arg(long, help = "Where to write the YAML document")]
        yaml: Option<PathBuf>,

        #[arg(long, help = "Where to write the Markdown document")]
        markdown: Option<PathBuf>,
    },
    /// Render an existing YAML resume without the wizard.
    Generate {
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        #[arg(short, long, help = "Output path (defaults to resume.md or resume.yaml)")]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Overwrite an existing output without asking")]
        yes: bool,
    },
    /// Print the version.
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Yaml,
    #[value(alias = "md")]
    Markdown,
}

impl OutputFormat {
    fn default_output(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "resume.yaml",
            OutputFormat::Markdown => "resume.md",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    let command = cli.command.unwrap_or(Command::Create {
        from: None,
        yaml: None,
        markdown: None,
    });

    let interactive = matches!(command, Command::Create { .. });
    init_logging(&config, cli.verbose, interactive)?;

    match command {
        Command::Create {
            from,
            yaml,
            markdown,
        } => create(from.as_deref(), yaml, markdown),
        Command::Generate {
            input,
            format,
            output,
            yes,
        } => generate(&input, format, output, yes),
        Command::Version => {
            println!("resume-wizard v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// The wizard owns the screen, so it only logs when a log file is configured.
fn init_logging(config: &Config, verbose: bool, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_level(verbose)).unwrap_or_else(|_| {
        EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
    });

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn create(from: Option<&Path>, yaml: Option<PathBuf>, markdown: Option<PathBuf>) -> Result<()> {
    let resume = match from {
        Some(path) => {
            let resume = document::load(path)?;
            info!(path = %path.display(), "loaded existing resume");
            resume
        }
        None => Resume::default(),
    };

    let defaults = OutputPaths::default();
    let output = OutputPaths {
        yaml: yaml.unwrap_or(defaults.yaml),
        markdown: markdown.unwrap_or(defaults.markdown),
    };

    let mut wizard = Wizard::new(resume, output, Local::now().date_naive());
    tui::run_tui(&mut wizard)?;

    if wizard.is_saved() {
        println!(
            "Resume saved to {} and {}",
            wizard.output().yaml.display(),
            wizard.output().markdown.display()
        );
    } else {
        println!("Cancelled. Nothing was saved.");
    }
    Ok(())
}

fn generate(input: &Path, format: OutputFormat, output: Option<PathBuf>, yes: bool) -> Result<()> {
    let resume = document::load(input)?;
    let target = output.unwrap_or_else(|| PathBuf::from(format.default_output()));

    let rendered = match format {
        OutputFormat::Yaml => document::render_yaml(&resume)?,
        OutputFormat::Markdown => document::render_markdown(&resume),
    };

    if target.exists() && !yes && std::io::stdin().is_terminal() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", target.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !overwrite {
            println!("Left {} unchanged.", target.display());
            return Ok(());
        }
    }

    document::write_file(&target, rendered.as_bytes())?;
    info!(input = %input.display(), output = %target.display(), ?format, "generated");
    println!("Generated {} from {}", target.display(), input.display());
    Ok(())
}
