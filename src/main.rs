//! Code Grader CLI
//!
//! Entry point for the `code-grader` command-line tool.

use clap::{Parser, Subcommand};
use code_grader::backend::{InterpreterRunner, PipInstaller, VenvProvisioner};
use code_grader::config::{EffectiveConfig, GraderConfig, DEFAULT_CONFIG_FILE};
use code_grader::{Extractor, Grader, TestRequest};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit code for configuration and usage errors
const EXIT_USAGE: i32 = 2;

#[derive(Parser)]
#[command(name = "code-grader")]
#[command(about = "Run a function against its unittest case and report pass/fail", version)]
struct Cli {
    /// Path to config file (default: grader.toml if present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Override the environments root directory
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,

    /// Override the interpreter used to create environments
    #[arg(long, global = true)]
    python: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trim a test transcript (stderr of a unittest run) to its relevant error
    Extract {
        /// Transcript file; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Output the structured excerpt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade a request: prepare the environment, run the test, report the outcome
    Grade {
        /// Request JSON file ("-" for stdin)
        #[arg(long, short = 'r')]
        request: PathBuf,

        /// Write grade_summary.json to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let effective = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    match cli.command {
        Commands::Extract { file, json } => run_extract(&effective, file, json),
        Commands::Grade { request, summary } => run_grade(&effective, &request, summary),
        Commands::Config => run_config(&effective),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "code_grader=debug,info"
        } else {
            "code_grader=info,warn"
        })
    });

    // stdout carries results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn load_config(cli: &Cli) -> Result<EffectiveConfig, String> {
    let path = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()));
        }
        Some(path) => path.clone(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    let mut overrides = serde_json::Map::new();
    if let Some(ref root) = cli.data_root {
        overrides.insert(
            "data_root".to_string(),
            serde_json::Value::String(root.to_string_lossy().to_string()),
        );
    }
    if let Some(ref python) = cli.python {
        overrides.insert("python".to_string(), serde_json::Value::String(python.clone()));
    }
    let overrides = (!overrides.is_empty()).then_some(serde_json::Value::Object(overrides));

    let config = EffectiveConfig::build(Some(&path), overrides).map_err(|e| e.to_string())?;
    debug!(sources = config.sources.len(), "configuration loaded");
    Ok(config)
}

fn settings(effective: &EffectiveConfig) -> GraderConfig {
    match effective.settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(EXIT_USAGE);
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run_extract(effective: &EffectiveConfig, file: Option<PathBuf>, json: bool) {
    let settings = settings(effective);

    let transcript = match read_input(file.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading transcript: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    let excerpt = match Extractor::new(settings.excerpt).extract(&transcript) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("Error extracting excerpt: {}", e);
            process::exit(1);
        }
    };

    if json {
        match excerpt.to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", excerpt.render());
    }
}

fn run_grade(effective: &EffectiveConfig, request_path: &Path, summary_path: Option<PathBuf>) {
    let settings = settings(effective);

    let request: TestRequest = match read_input(Some(request_path))
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading request: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    let grader = Grader::new(
        VenvProvisioner::from_config(&settings),
        PipInstaller::from_config(&settings),
        InterpreterRunner::from_config(&settings),
        settings.excerpt.clone(),
    );

    let report = match grader.grade(&request) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    if let Some(path) = summary_path {
        if let Err(e) = report.summary.write_to_file(&path) {
            eprintln!("Error writing summary to {}: {}", path.display(), e);
        }
    }

    match report.response.to_json() {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }

    process::exit(if report.response.is_success() { 0 } else { 1 });
}

fn run_config(effective: &EffectiveConfig) {
    match effective.to_json() {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
