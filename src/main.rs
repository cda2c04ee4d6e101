#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! op-managers — report the managers of every group with access to a 1Password vault.

mod cli;
mod op;
mod report;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, forward_stderr, write_error};
use op::OpClient;
use report::ManagerFilter;
use types::ErrorOutput;

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.csv, cli.no_header);
    let filter = if cli.include_inactive {
        ManagerFilter::AnyState
    } else {
        ManagerFilter::ActiveOnly
    };
    let client = OpClient::new(cli.op_bin, cli.account);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = report::run(&client, &cli.vault, filter, &ctx, &mut out) {
        if err.is_broken_pipe() {
            return;
        }
        match err.forwarded_stderr() {
            Some(text) => forward_stderr(text),
            None => write_error(&ErrorOutput::from_report_error(&err), ctx.format),
        }
        std::process::exit(err.exit_code());
    }
}
