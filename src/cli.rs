use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "dictsite",
    version,
    about = "Search, filter and role simulation for the dictionary site"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Search index location (dir, index.json file, or http(s) base URL)"
    )]
    pub base_url: Option<String>,
    #[arg(short, long, global = true, help = "Debug-level logging on stderr")]
    pub verbose: bool,
    #[arg(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one query against the search index.
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = Placement::Page)]
        placement: Placement,
        #[arg(long, help = "Print the rendered results panel markup")]
        html: bool,
    },
    /// Run one card filter pass over a page snapshot.
    Filter {
        #[arg(long)]
        page: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        data_type: Option<String>,
        #[arg(long, help = "Print the no-results panel markup when it is visible")]
        html: bool,
    },
    /// Simulate attribute/action visibility for a role.
    Roles {
        #[arg(long)]
        page: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Load the index strictly and report malformed entries.
    Validate,
    /// Replay widget events read line by line from stdin.
    Session {
        #[arg(long)]
        page: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Page,
    Navbar,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Page => "page",
            Placement::Navbar => "navbar",
        }
    }
}
