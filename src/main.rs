use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::str::FromStr;

use tiller::core::config;
use tiller::tui;

#[derive(Parser)]
#[command(name = "tiller", about = "Screen navigation playground")]
struct Args {
    /// Disable open/close animations
    #[arg(long)]
    instant: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("tiller: {e}; continuing with defaults");
        config::TillerConfig::default()
    });
    let cli_animated = args.instant.then_some(false);
    let resolved = config::resolve(&file_config, cli_animated, args.log_level.as_deref());

    // Initialize file logger - writes to tiller.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = LevelFilter::from_str(&resolved.log_level).unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("tiller.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!("Tiller starting up (animated: {})", resolved.animated);

    tui::run(resolved)
}
