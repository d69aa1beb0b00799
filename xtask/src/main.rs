use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

const CORE: &str = "replay_core";
const CLI: &str = "replay_cli";

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the fleet replay workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Replay the configured trip files in the terminal
    Run {
        /// Arguments forwarded to replay_cli
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the synthetic fleet example (50 trips at 60x)
    Example,
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run the ignored load tests in replay_core
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Example and CLI smoke run
    Examples,
    /// Benchmarks
    Bench,
    /// Everything above
    All,
}

/// Runs cargo with `args`, exiting with cargo's status on failure.
fn cargo(label: &str, args: &[&str]) {
    eprintln!("\n=== {label} ===\n+ cargo {}", args.join(" "));
    let status = match Command::new("cargo").args(args).status() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute cargo: {err}");
            exit(1);
        }
    };
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn example() {
    cargo(
        "Example fleet_replay",
        &["run", "-p", CORE, "--example", "fleet_replay", "--release"],
    );
}

fn bench() {
    cargo(
        "Benchmarks",
        &["bench", "-p", CORE, "--bench", "performance"],
    );
}

fn check() {
    cargo("Formatting", &["fmt", "--all", "--", "--check"]);
    cargo(
        "Clippy",
        &["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
    );
    cargo("Test replay_core", &["test", "-p", CORE]);
    cargo("Test replay_cli", &["test", "-p", CLI]);
}

fn ci(job: CiJob) {
    let smoke = || {
        example();
        cargo(
            "replay_cli argument parsing",
            &["run", "-p", CLI, "--", "--help"],
        );
    };
    match job {
        CiJob::Check => check(),
        CiJob::Examples => smoke(),
        CiJob::Bench => bench(),
        CiJob::All => {
            check();
            smoke();
            bench();
        }
    }
    eprintln!("\nCI job passed.");
}

fn main() {
    match Cli::parse().command {
        Task::Run { args } => {
            let mut cargo_args = vec!["run", "-p", CLI, "--release", "--"];
            cargo_args.extend(args.iter().map(String::as_str));
            cargo("Replay", &cargo_args);
        }
        Task::Example => example(),
        Task::Bench => bench(),
        Task::Ci { job } => ci(job),
        Task::LoadTest => cargo(
            "Load tests",
            &["test", "-p", CORE, "--test", "load_tests", "--", "--ignored"],
        ),
    }
}
