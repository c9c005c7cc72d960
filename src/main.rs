use clap::Parser;
use psalm139::core::config::{self, CliOverrides, ProcessEnv};
use psalm139::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "psalm139", about = "A terminal meditation on Psalm 139")]
struct Args {
    /// Gemini model used for prayer generation
    #[arg(long)]
    model: Option<String>,

    /// Gemini API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "psalm139.log")]
    log_file: String,

    /// Log at debug level instead of info
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    // Configuration problems are fatal before the terminal is touched
    let overrides = CliOverrides {
        model: args.model.as_deref(),
        base_url: args.base_url.as_deref(),
    };
    let resolved = config::load_config()
        .and_then(|file_config| config::resolve(&file_config, &ProcessEnv, &overrides));
    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("psalm139: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Psalm 139 starting up with model {}", resolved.model);

    match tui::run(resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("psalm139: {e}");
            ExitCode::FAILURE
        }
    }
}
