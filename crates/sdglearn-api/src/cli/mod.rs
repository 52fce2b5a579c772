//! CLI command definitions and dispatch for the `sdgl` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `sdgl create sdg`, `sdgl list sdgs`).

pub mod progress;
pub mod sdg;
pub mod seed;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage the SDG learning catalog.
#[derive(Parser)]
#[command(name = "sdgl", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of an SDG and its modules.
    Show {
        /// SDG slug to display.
        slug: String,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Seed the catalog with the 17 canonical UN goals (skips existing).
    Seed,

    /// Show a learner's completion across the catalog.
    Progress {
        /// Learner user id.
        user_id: String,

        /// Restrict to one SDG (slug).
        #[arg(long)]
        sdg: Option<String>,
    },

    /// System status dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a new SDG.
    Sdg {
        /// Display number (1-17 for the canonical goals).
        #[arg(short, long)]
        number: Option<i32>,

        /// Goal title.
        #[arg(short, long)]
        title: Option<String>,

        /// Short description.
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List all SDGs.
    Sdgs,

    /// List the modules of one SDG.
    Modules {
        /// SDG slug.
        #[arg(long)]
        sdg: String,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete an SDG with all its modules and sections.
    Sdg {
        /// SDG slug.
        slug: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
