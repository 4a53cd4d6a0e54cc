//! CI entry point for the LFS tracking policy check.
//!
//! Exit codes: `0` clean, `1` policy violation, `2` operational error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lfs_warden::{CheckReport, ExemptList, Policy, Scanner};

/// Check that binary files are tracked by git LFS.
///
/// Walks the tree of a revision and fails when a file with a watched
/// extension is committed as a regular blob instead of an LFS pointer.
#[derive(Parser, Debug)]
#[command(name = "lfs-warden", version, about)]
struct Args {
    /// Repository path (any directory inside the working tree)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Revision to check
    #[arg(long, env = "LFS_WARDEN_REV", default_value = lfs_warden::DEFAULT_REV)]
    rev: String,

    /// Extension that must be LFS-tracked (repeatable; default: png)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Path prefix exempt from the policy (repeatable)
    #[arg(short = 'x', long = "exempt", value_name = "PREFIX")]
    exempt: Vec<String>,

    /// File of exempt prefixes, one per line (# comments allowed)
    #[arg(long, env = "LFS_WARDEN_EXEMPT_FILE", value_name = "FILE")]
    exempt_from: Option<PathBuf>,

    /// Emit the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Only report violations, no summary
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("lfs-warden: error: {}", e);
            return ExitCode::from(2);
        }
    };

    if args.json {
        // Serialization of the report cannot fail; the types are plain data.
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("lfs-warden: error: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        for v in &report.violations {
            println!("{}", v);
        }
        if !args.quiet {
            print_summary(&report);
        }
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run(args: &Args) -> lfs_warden::Result<CheckReport> {
    let inline: Vec<&str> = args.exempt.iter().map(String::as_str).collect();
    let exempt = ExemptList::with_options(
        if inline.is_empty() { None } else { Some(&inline) },
        args.exempt_from.as_deref(),
    )?;

    let extensions: Vec<&str> = args.extensions.iter().map(String::as_str).collect();
    let policy = Policy::new(&extensions, exempt)?;

    log::debug!(
        "checking {} at {} (extensions: {:?}, exempt: {:?})",
        args.path.display(),
        args.rev,
        policy.extensions(),
        policy.exempt().prefixes(),
    );

    let scanner = Scanner::open(&args.path)?;
    let report = scanner.check(&args.rev, &policy)?;

    log::info!(
        "scanned {} files, {} candidates, {} exempt, {} lfs-tracked, {} violations",
        report.scanned,
        report.candidates,
        report.exempted,
        report.lfs_tracked,
        report.violations.len(),
    );

    Ok(report)
}

fn print_summary(report: &CheckReport) {
    if report.passed() {
        eprintln!(
            "lfs-warden: ok ({} candidate files, {} exempt, {} lfs-tracked)",
            report.candidates, report.exempted, report.lfs_tracked,
        );
    } else {
        eprintln!(
            "lfs-warden: {} file(s) must be tracked with git LFS",
            report.violations.len(),
        );
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
