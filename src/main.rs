//! stamp's main application entry point and orchestration logic.
//! Handles command-line argument parsing, mode detection, value resolution,
//! and the substitution run over the target path.

use stamp::{
    banner,
    cli::{get_args, Args},
    config::Config,
    error::{default_error_handler, Result},
    processor::process_target,
    resolver::get_value_source,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Flow
/// 1. Captures the environment snapshot and detects the active mode
/// 2. Resolves the replacement map from the selected value source
/// 3. Logs the startup banner
/// 4. Applies the map to the target file or directory tree
fn run(args: Args) -> Result<()> {
    let config = Config::from_env();
    let mode = config.mode();

    let source = get_value_source(&config)?;
    let map = source.resolve()?;

    log::info!("{}", banner::render(&map, mode));

    process_target(&args.target, &map)
}
