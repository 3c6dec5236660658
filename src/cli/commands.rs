use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flickr-search")]
#[command(about = "Search the public Flickr photo feed by tag")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single search and print the results
    Search {
        /// Tag to search for
        tag: String,

        /// Show the detail view of the Nth result (1-based)
        #[arg(short, long)]
        detail: Option<usize>,

        /// Print the displayable items as JSON
        #[arg(long, conflicts_with = "detail")]
        json: bool,
    },

    /// Read queries from stdin, one per line, with debounced searching
    Interactive,
}
