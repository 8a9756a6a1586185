use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use credhash_core::VERSION;

/// credhash - Argon2id credential hashing and verification
#[derive(Parser)]
#[command(name = "credhash")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "CREDHASH_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Where to read a secret from when `CREDHASH_SECRET` is not set
#[derive(Args)]
pub struct SecretArgs {
    /// Read the secret from the first line of stdin
    #[arg(long)]
    pub stdin: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `verify` command
#[derive(Args)]
pub struct VerifyArgs {
    /// Stored credential string
    #[arg(value_name = "ENCODED")]
    pub encoded: String,

    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Stored credential string
    #[arg(value_name = "ENCODED")]
    pub encoded: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a new secret and print the encoded credential
    Hash(SecretArgs),

    /// Check a secret against a stored credential
    Verify(VerifyArgs),

    /// Show the parameters of a stored credential
    Inspect(InspectArgs),

    /// Manage the cost profile config file
    Config {
        #[command(subcommand)]
        command: ConfigSubcommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write the default cost profile to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective cost profile
    Show,
}
