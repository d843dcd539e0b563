// Entrypoint for the CLI application.
// - Parses arguments, loads the secrets file once and builds the client.
// - Returns `anyhow::Result` so setup failures exit non-zero with context.

use clap::Parser;
use langdetect_cli::api::DetectorClient;
use langdetect_cli::batch::detect_batch;
use langdetect_cli::cli::{verbosity_to_log_level, Cli, Mode};
use langdetect_cli::config::Config;
use langdetect_cli::ui::{input_loop, TerminalConsole};
use log::info;
use simple_logger::SimpleLogger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(verbosity_to_log_level(cli.verbose))
        .init()?;

    let config = Config::from_secrets_file(&cli.secrets)?.with_output_path(cli.output.clone());
    info!("Using endpoint {} in region {}", config.endpoint, config.region);
    let output = config.output_path.clone();
    let detector = DetectorClient::new(config)?;

    match cli.mode() {
        Mode::Batch { path, label } => {
            let outcome = detect_batch(&detector, &path, &label, &output)?;
            info!("Batch run finished: {:?}", outcome);
        }
        Mode::Interactive => input_loop(&detector, &mut TerminalConsole)?,
    }
    Ok(())
}
