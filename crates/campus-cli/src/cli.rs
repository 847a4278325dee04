use std::path::PathBuf;

use campus_core::resolution::Resolution;
use campus_core::ResourceKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Manage school records from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name for API configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List records of a resource family
    #[command(alias = "ls")]
    List {
        /// Resource family, e.g. teachers or leave-allocations
        resource: ResourceKind,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Fetch every page
        #[arg(long, conflicts_with = "page")]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a record, resolving deleted duplicates
    #[command(alias = "new")]
    Create {
        /// Resource family
        resource: ResourceKind,
        /// JSON request body (read from stdin when omitted)
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,
        /// What to do when a deleted record with the same details exists
        #[arg(long, value_enum, default_value_t = ConflictChoice::Prompt)]
        on_conflict: ConflictChoice,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore a soft-deleted record
    Reactivate {
        /// Resource family
        resource: ResourceKind,
        /// Record ID
        id: String,
    },
    /// Show a single record
    Show {
        /// Resource family
        resource: ResourceKind,
        /// Record ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Resource family
        resource: ResourceKind,
        /// Record ID
        id: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Manage the API token stored for a profile
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// How `create` answers a deleted-duplicate conflict.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ConflictChoice {
    /// Ask interactively (cancels when stdin is not a terminal)
    Prompt,
    Reactivate,
    CreateNew,
    Cancel,
}

impl ConflictChoice {
    /// The fixed resolution, or `None` when the user must be asked.
    pub const fn resolution(self) -> Option<Resolution> {
        match self {
            Self::Prompt => None,
            Self::Reactivate => Some(Resolution::Reactivate),
            Self::CreateNew => Some(Resolution::CreateNew),
            Self::Cancel => Some(Resolution::Cancel),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// School management API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Organization sent with every request
        #[arg(long, value_name = "ID")]
        organization_id: Option<String>,
        /// Role used to pick visible resources (admin, teacher, parent)
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an API token for the profile in the OS keychain
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Bearer token issued by the API
        #[arg(long, value_name = "TOKEN")]
        token: String,
    },
    /// Show auth status for profile
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Remove the stored token for the profile
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
