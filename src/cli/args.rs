/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

use crate::op::DEFAULT_OP_BIN;

/// op-managers — list the managers of every group with access to a vault.
#[derive(Debug, Parser)]
#[command(
    name = "op-managers",
    about = "Print the managers of all groups with access to a 1Password vault",
    version
)]
pub struct Cli {
    /// Name of the vault to get managers from.
    pub vault: String,

    /// Shortname of your 1Password account, forwarded to every `op` call.
    #[arg(short, long, env = "OP_ACCOUNT", value_name = "SHORTNAME")]
    pub account: Option<String>,

    /// Print output in CSV format. Shorthand for --output csv.
    #[arg(short, long, conflicts_with = "output")]
    pub csv: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Omit the CSV header line and table headers.
    #[arg(long)]
    pub no_header: bool,

    /// Count managers whose account is not ACTIVE (e.g., suspended) as well.
    #[arg(long)]
    pub include_inactive: bool,

    /// Path to the 1Password CLI binary.
    #[arg(long, env = "OP_BIN", value_name = "PATH", default_value = DEFAULT_OP_BIN)]
    pub op_bin: String,

    /// Log `op` invocations and phase timings to stderr.
    #[arg(long)]
    pub debug: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Group name, then one "name, email" line per manager.
    #[default]
    Text,
    /// `group,name,email` rows, one per manager.
    Csv,
    /// Pretty-printed JSON array of groups.
    Json,
    /// Aligned table with headers (human-readable).
    Table,
}
