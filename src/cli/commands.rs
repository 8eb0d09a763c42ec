use crate::config::resolve_config;
use crate::generator::generate_all;
use crate::linter::{has_errors, print_lint_issues, LintSeverity};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface for the postal-code generator
///
/// Running without a subcommand generates everything from the current
/// directory.
#[derive(Parser, Debug)]
#[command(name = "postalcode-gen")]
#[command(about = "Generate postal-code validators, tests and factory from JSON specifications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute (default: generate)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Generate validator, test and factory artifacts
    Generate {
        /// Directory holding the specification documents and skeletons
        #[arg(short, long, default_value = ".")]
        spec_dir: PathBuf,

        /// Path to the generator configuration (postalcode-gen.toml)
        /// If not provided, will auto-detect inside the spec directory
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Render everything but write nothing; print what would be written
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lint the specification documents without generating
    ///
    /// Checks for:
    /// - Unparseable documents and missing required fields
    /// - Country codes that are not two letters
    /// - Country codes produced by more than one source
    /// - Values that would break an emitted string literal
    /// - Test codes listed twice in one category
    Lint {
        /// Directory holding the specification documents
        #[arg(short, long, default_value = ".")]
        spec_dir: PathBuf,

        /// Path to the generator configuration (postalcode-gen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Generate {
            spec_dir: PathBuf::from("."),
            config: None,
            dry_run: false,
        }
    }
}

/// Execute the parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or_default() {
        Commands::Generate {
            spec_dir,
            config,
            dry_run,
        } => run_generate(&spec_dir, config.as_deref(), dry_run),
        Commands::Lint {
            spec_dir,
            config,
            fail_on_error,
            errors_only,
        } => run_lint(&spec_dir, config.as_deref(), fail_on_error, errors_only),
    }
}

fn run_generate(spec_dir: &Path, config: Option<&Path>, dry_run: bool) -> anyhow::Result<()> {
    let config = resolve_config(config, spec_dir)?;
    tracing::debug!(spec_dir = %config.spec_dir.display(), templates = %config.templates_dir.display(), "Resolved configuration");

    let report = generate_all(&config, dry_run)?;

    println!();
    println!(
        "✅ Generated {} validator(s), {} test file(s), factory with {} countr{}",
        report.validators.len(),
        report.tests.len(),
        report.registry.len(),
        if report.registry.len() == 1 { "y" } else { "ies" }
    );
    if !report.overridden.is_empty() {
        println!("   Overridden: {}", report.overridden.join(", "));
    }
    if dry_run {
        println!("   (dry run: nothing was written)");
    } else {
        println!();
        println!("!!! Please make sure the generated files are added to the csproj file.");
    }
    Ok(())
}

fn run_lint(
    spec_dir: &Path,
    config: Option<&Path>,
    fail_on_error: bool,
    errors_only: bool,
) -> anyhow::Result<()> {
    let config = resolve_config(config, spec_dir)?;
    let mut issues = crate::linter::lint_spec_dir(&config)?;
    if errors_only {
        issues.retain(|i| i.severity == LintSeverity::Error);
    }
    print_lint_issues(&issues);

    if fail_on_error && has_errors(&issues) {
        let count = issues
            .iter()
            .filter(|i| i.severity == LintSeverity::Error)
            .count();
        anyhow::bail!("{count} lint error(s) found");
    }
    Ok(())
}
