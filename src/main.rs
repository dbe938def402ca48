use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
enum Commands {
    /// Create a bin and make it the active one here
    Init {
        /// Bin name (omit for a temporary bin)
        name: Option<String>,
        /// Use the global slot instead of this workspace
        #[arg(long)]
        global: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Select an existing bin by id or prefix
    Use {
        id: String,
        #[arg(long)]
        global: bool,
    },

    /// Show the active bin
    Bin {
        #[arg(long)]
        global: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List bins on the backend
    Bins {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recently used bins for this workspace
    Recent {
        #[arg(long)]
        global: bool,
    },

    /// Forget the active bin (the bin itself is kept)
    Clear {
        #[arg(long)]
        global: bool,
    },

    /// List captured requests, newest first
    Requests {
        /// Operate on this bin instead of the active one
        #[arg(long)]
        bin: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect one captured request
    Show {
        /// Index (1 = newest), id, or id prefix
        r#ref: Option<String>,
        #[arg(long)]
        bin: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-send a captured request against a target
    Replay {
        /// Index (1 = newest), id, or id prefix
        r#ref: Option<String>,
        /// Base URL to replay against, e.g. http://localhost:3000
        #[arg(long)]
        target: String,
        #[arg(long)]
        bin: Option<String>,
    },

    /// Compare two captured requests
    Diff {
        from: Option<String>,
        to: Option<String>,
        #[arg(long)]
        bin: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the backend URL of a captured request
    Open {
        r#ref: Option<String>,
        #[arg(long)]
        bin: Option<String>,
    },

    /// Stream new requests as they arrive
    Listen {
        /// Replay this much history first, e.g. 30s, 5m, 250ms
        #[arg(long)]
        last: Option<String>,
        /// Enable the `r` (replay latest) key against this base URL
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        bin: Option<String>,
        #[arg(long)]
        global: bool,
    },

    /// Export a bin's requests
    Export {
        /// Export format: json or curl
        #[arg(long, default_value = "json")]
        format: String,
        #[arg(long)]
        bin: Option<String>,
    },

    /// Delete a bin (defaults to the active one)
    Delete {
        id: Option<String>,
        #[arg(long)]
        global: bool,
    },

    /// Store the API key used for backend calls
    Login {
        #[arg(long)]
        api_key: String,
    },

    /// Show the authenticated account
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the stored configuration
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Change configuration values
    Set {
        /// Backend base URL
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
