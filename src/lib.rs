//! Deckguard: a design constraint engine for generated slides.
//!
//! Deckguard decides whether slide content and a visual theme satisfy
//! accessibility and design-quality rules, and repairs contrast and density
//! problems without calling a model. Every check is a pure function over
//! plain data; rule violations are returned as user-presentable strings.
//!
//! # Modules
//!
//! - [`color`]: hex/RGB/HSL/Lab conversions, deltaE, WCAG contrast
//! - [`palette`]: forbidden color pairs and text contrast
//! - [`typography`]: approved fonts, pairing, sizes, deck font budget
//! - [`density`]: bullet/word/table limits, splitting and truncation
//! - [`layout`]: columns, font-size and color variety, image overlays
//! - [`validation`]: the combined slide and deck checks
//! - [`autofix`]: algorithmic repair
//! - [`policy`]: every limit table, with defaults and YAML/JSON loaders
//! - [`model`]: slide, theme and deck types
//! - [`error`]: error types for loading inputs and the CLI

pub mod autofix;
pub mod color;
pub mod density;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod palette;
pub mod policy;
pub mod typography;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use error::DeckguardError;
pub use policy::DesignPolicy;

/// The deckguard CLI application.
#[derive(Parser)]
#[command(name = "deckguard")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log engine decisions to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate one slide in its theme.
    Validate(ReportArgs),

    /// Validate every slide of a deck plus the deck font budget.
    Deck(ReportArgs),

    /// Repair density and contrast problems and print the result as JSON.
    Fix(FixArgs),

    /// Print the WCAG contrast ratio of two colors.
    Contrast(ContrastArgs),
}

/// Arguments shared by the validate and deck subcommands.
#[derive(clap::Args)]
struct ReportArgs {
    /// JSON input file.
    input: PathBuf,

    /// Policy override file (.yaml/.yml or .json).
    #[arg(long, env = "DECKGUARD_POLICY")]
    policy: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the fix subcommand.
#[derive(clap::Args)]
struct FixArgs {
    /// JSON slide document.
    input: PathBuf,

    /// Policy override file (.yaml/.yml or .json).
    #[arg(long, env = "DECKGUARD_POLICY")]
    policy: Option<PathBuf>,
}

/// Arguments for the contrast subcommand.
#[derive(clap::Args)]
struct ContrastArgs {
    /// Foreground (text) color, e.g. '#333333'.
    foreground: String,

    /// Background color, e.g. '#FFFFFF'.
    background: String,

    /// Minimum ratio to pass (defaults to the policy's text contrast).
    #[arg(long)]
    min: Option<f64>,
}

/// Run the deckguard CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DeckguardError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Deck(args)) => run_deck(args),
        Some(Commands::Fix(args)) => run_fix(args),
        Some(Commands::Contrast(args)) => run_contrast(args),
        None => {
            println!("deckguard {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("The design constraint engine for generated slides.");
            println!();
            println!("Run 'deckguard --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs a stderr subscriber so stdout stays clean for reports.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_policy(path: Option<&Path>) -> Result<DesignPolicy, DeckguardError> {
    let policy = match path {
        Some(path) => DesignPolicy::load(path)?,
        None => DesignPolicy::default(),
    };
    let problems = policy.check();
    if !problems.is_empty() {
        return Err(DeckguardError::InvalidPolicy { problems });
    }
    Ok(policy)
}

fn check_output_format(output: &str) -> Result<(), DeckguardError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(DeckguardError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ReportArgs) -> Result<(), DeckguardError> {
    check_output_format(&args.output)?;
    let policy = load_policy(args.policy.as_deref())?;
    let doc = io::read_slide_document(&args.input)?;

    let result = validation::validate_slide_design(&doc.slide, &doc.theme, &policy);

    match args.output.as_str() {
        "json" => io::write_json(std::io::stdout().lock(), &result)?,
        _ => print!("{}", result),
    }

    if result.valid {
        Ok(())
    } else {
        Err(DeckguardError::ValidationFailed {
            violation_count: result.violation_count(),
        })
    }
}

/// Execute the deck subcommand.
fn run_deck(args: ReportArgs) -> Result<(), DeckguardError> {
    check_output_format(&args.output)?;
    let policy = load_policy(args.policy.as_deref())?;
    let deck = io::read_deck(&args.input)?;

    let report = validation::validate_deck(&deck, &policy);

    match args.output.as_str() {
        "json" => io::write_json(std::io::stdout().lock(), &report)?,
        _ => print!("{}", report),
    }

    if report.valid {
        Ok(())
    } else {
        Err(DeckguardError::ValidationFailed {
            violation_count: report.violation_count(),
        })
    }
}

/// Execute the fix subcommand.
fn run_fix(args: FixArgs) -> Result<(), DeckguardError> {
    let policy = load_policy(args.policy.as_deref())?;
    let doc = io::read_slide_document(&args.input)?;

    let result = autofix::auto_fix_slide(&doc.slide, &doc.theme, &policy);
    io::write_json(std::io::stdout().lock(), &result)
}

/// Execute the contrast subcommand.
fn run_contrast(args: ContrastArgs) -> Result<(), DeckguardError> {
    let fg = color::Rgb::from_hex(&args.foreground)?;
    let bg = color::Rgb::from_hex(&args.background)?;
    let required = args
        .min
        .unwrap_or(DesignPolicy::default().palette.min_text_contrast);

    let ratio = color::round2(fg.contrast_ratio(bg));
    let verdict = if ratio >= required { "pass" } else { "fail" };
    println!("{fg} on {bg}: {ratio}:1 ({verdict}, required {required}:1)");

    if ratio >= required {
        Ok(())
    } else {
        Err(DeckguardError::ValidationFailed { violation_count: 1 })
    }
}
