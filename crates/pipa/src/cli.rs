//! Clap derive structures for the `pipa` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pipa -- poll PIPA audio codecs over SNMP
#[derive(Debug, Parser)]
#[command(
    name = "pipa",
    version,
    about = "Inspect streams and counters on PIPA audio codecs",
    long_about = "Polls Broadcom PIPA audio codecs over SNMP v1/v2c.\n\n\
        Lists configured streams (receive streams by default), the unit name,\n\
        and per-stream receive counters. Every invocation is a fresh poll.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Codec profile to use
    #[arg(long, short = 'p', env = "PIPA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Codec address, optionally with :port (overrides profile)
    #[arg(long, short = 'H', env = "PIPA_HOST", global = true)]
    pub host: Option<String>,

    /// SNMP community string
    #[arg(long, short = 'c', env = "PIPA_COMMUNITY", global = true, hide_env_values = true)]
    pub community: Option<String>,

    /// SNMP protocol version (1 or 2 for v2c)
    #[arg(
        long = "snmp-version",
        env = "PIPA_SNMP_VERSION",
        value_parser = clap::value_parser!(u8).range(1..=2),
        global = true
    )]
    pub snmp_version: Option<u8>,

    /// Retries per request after a timeout
    #[arg(long, short = 'r', env = "PIPA_RETRIES", global = true)]
    pub retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, short = 't', env = "PIPA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PIPA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List configured streams (receive streams unless --all)
    #[command(alias = "s")]
    Streams(StreamsArgs),

    /// Show the unit name configured on the codec
    Unit,

    /// Show receive counters for both streams and the combined channel
    #[command(alias = "ctr")]
    Counters,

    /// Unit name, receive streams, and counters from one session
    Status,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct StreamsArgs {
    /// Include transmit streams
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or replace the active profile from --host, --snmp-version,
    /// --retries, and --timeout
    Init {
        /// Read the community from this environment variable at run time
        #[arg(long)]
        community_env: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Show the current configuration
    Show,

    /// Print the config file path
    Path,

    /// Store the community string for the active profile
    SetCommunity {
        /// Community string (read from stdin when omitted)
        community: Option<String>,

        /// Write it to the config file instead of the system keyring
        #[arg(long)]
        plaintext: bool,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
