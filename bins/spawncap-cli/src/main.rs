use anyhow::Result;
use clap::Parser;
use tracing::info;

use spawncap_process::{LaunchRequest, ProcessRunner};

/// Run a command and capture its stdout/stderr.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command to run (path or PATH-searched name)
    #[arg(default_value = "/bin/ls")]
    command: String,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Launch without waiting for completion (no capture, no reaping)
    #[arg(long)]
    no_wait: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.debug);

    let mut request = LaunchRequest::new(&args.command, args.args.clone());
    if args.no_wait {
        request = request.fire_and_forget();
    }

    info!(command = %args.command, "launching");
    let outcome = ProcessRunner::run(&request)?;

    println!("PID:    {}", outcome.pid);
    println!("Output: {}", outcome.stdout_text());
    println!("Error:  {}", outcome.stderr_text());

    if args.no_wait {
        ProcessRunner::reap(outcome.pid)?;
    }

    Ok(())
}

fn initialize_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
