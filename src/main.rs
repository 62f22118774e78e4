use clap::Parser;
use otp_input::core::config::{self, CliOverrides, Diagnostic};
use otp_input::core::state::App;
use otp_input::tui::{self, Outcome};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "otp-input", about = "Enter a one-time code, one digit per cell")]
struct Args {
    /// Number of digits in the code
    #[arg(short, long)]
    length: Option<usize>,

    /// Pre-filled code; non-digits become empty cells
    #[arg(short, long)]
    value: Option<String>,

    /// Print the submitted code as JSON
    #[arg(long)]
    json: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Nothing can be logged yet; collect and replay after the logger is up
    let mut diagnostics = Vec::new();
    let file_config = config::load_config(&mut diagnostics).unwrap_or_else(|e| {
        diagnostics.push(Diagnostic::warn(format!("Ignoring config file: {e}")));
        Default::default()
    });
    let mut resolved = config::resolve(
        &file_config,
        &CliOverrides {
            value_length: args.length,
            initial_value: args.value,
            log_file: args.log_file,
        },
    );

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    diagnostics.append(&mut resolved.diagnostics);
    for diagnostic in &diagnostics {
        diagnostic.emit();
    }
    log::info!(
        "otp-input starting with {} cells, log level {}",
        resolved.value_length,
        resolved.log_level
    );

    let app = App::from_config(&resolved);
    match tui::run(app)? {
        Outcome::Submitted(code) => {
            let digits = code.to_string();
            if args.json {
                let payload = serde_json::json!({
                    "code": digits,
                    "length": resolved.value_length,
                });
                println!("{payload}");
            } else {
                println!("{digits}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cancelled => {
            log::info!("Cancelled");
            Ok(ExitCode::FAILURE)
        }
    }
}
