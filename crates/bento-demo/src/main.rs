//! Terminal demo for the bento input field and data table.
//!
//! ```text
//! bento-demo                       # form + users table
//! bento-demo --story selectable    # one table story
//! bento-demo --loading --log-file bento.log
//! ```

mod app;

use app::{App, Flags, Story};
use bento::ProgramOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bento-demo")]
#[command(about = "Input field and data table demo", long_about = None)]
struct Cli {
    /// Screen to show
    #[arg(long, value_enum, default_value_t = Story::App)]
    story: Story,

    /// Redraw rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Append runtime debug output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start the input fields and the table in the loading state
    #[arg(long)]
    loading: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let options = ProgramOptions {
        fps: cli.fps,
        title: Some("bento demo".to_string()),
        log_file: cli.log_file.clone(),
        ..ProgramOptions::default()
    };
    let flags = Flags {
        story: cli.story,
        loading: cli.loading,
        log_file: cli.log_file,
    };
    bento::run_with::<App>(flags, options).await?;
    Ok(())
}
