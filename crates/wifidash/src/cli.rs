//! Clap derive structures for the `wifidash` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wifidash -- manage the devices on your home WiFi
#[derive(Debug, Parser)]
#[command(
    name = "wifidash",
    version,
    about = "Manage the devices on your home WiFi from the command line",
    long_about = "Pause, block, and rename the devices on your WiFi network,\n\
        review access controls, and see who is using the most data.\n\n\
        Device state lives in memory for one invocation; use `wifidash session`\n\
        to keep a registry alive across several commands.",
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
    /// Device seed file (TOML, or JSON with a .json extension)
    #[arg(long, env = "WIFIDASH_SEED", global = true)]
    pub seed: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "WIFIDASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the config file's setting, else table)
    #[arg(long, short = 'o', env = "WIFIDASH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// List, pause, block, and rename devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Network status: connected devices and total usage
    #[command(alias = "st")]
    Status,

    /// Data usage by device, heaviest first
    #[command(alias = "u")]
    Usage(UsageArgs),

    /// Access controls: pause-all, schedules, usage limits
    #[command(alias = "ctl")]
    Controls(ControlsArgs),

    /// Interactive session over a single in-memory registry
    Session,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices in network order
    #[command(alias = "ls")]
    List {
        /// Filter by name or MAC (case-insensitive) or IP (exact substring)
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show device details
    Get {
        /// Device ID or MAC address
        device: String,
    },

    /// Pause or resume internet access for a device
    Pause {
        /// Device ID or MAC address
        device: String,
    },

    /// Block or unblock a device (blocking clears a pause)
    Block {
        /// Device ID or MAC address
        device: String,
    },

    /// Give a device a new display name
    Rename {
        /// Device ID or MAC address
        device: String,

        /// New name
        name: String,
    },
}

// ── Usage ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Only show the heaviest N devices
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Bar width in characters
    #[arg(long, default_value = "24")]
    pub width: u16,
}

// ── Controls ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ControlsArgs {
    #[command(subcommand)]
    pub command: ControlsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ControlsCommand {
    /// Show configured access controls
    Show,

    /// List schedules active at a given time
    Active {
        /// Time of day as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Pause every connected device (or resume all with --off)
    PauseAll {
        /// Resume every paused device instead
        #[arg(long)]
        off: bool,
    },

    /// Pause devices that reached their configured usage limit
    Enforce,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
