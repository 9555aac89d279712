use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pm", about = concat!("[*] pinmap v", env!("CARGO_PKG_VERSION"), " - drop pins on a map from your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new pin board in the current directory
    Init(InitArgs),
    /// List confirmed pins (newest first)
    List,
    /// Show pin details
    Show(ShowArgs),
    /// Search pins by title or description substring
    Search(SearchArgs),
    /// Add a confirmed pin at the given coordinates
    Add(AddArgs),
    /// Delete pins by id
    Delete(DeleteArgs),
    /// Delete all pins
    Clear(ClearArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Initial map center: --center <LAT> <LNG>
    #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true)]
    pub center: Vec<f64>,
    /// Reinitialize even if pinboard/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Pin id to show
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to match (case-insensitive)
    pub term: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lng: f64,
    /// Pin title (max 50 characters)
    pub title: String,
    /// Optional description (max 200 characters)
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Pin ids to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
