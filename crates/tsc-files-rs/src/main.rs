//! tsc-files-rs: type-check explicit file lists with a temporary tsconfig.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsc_files_rs::orchestrator;

/// Type-check explicitly listed files by invoking tsc with a temporary
/// tsconfig. Unrecognized flags are forwarded to tsc untouched.
#[derive(Debug, Parser)]
#[command(name = "tsc-files-rs")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source files to check, plus any tsc flags to forward
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match orchestrator::run(args.rest).await {
        Ok(result) => {
            if !result.stdout.is_empty() {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
            std::process::exit(result.exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
