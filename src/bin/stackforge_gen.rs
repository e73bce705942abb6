use stackforge::cli::run_cli;
use stackforge::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    run_cli()
}
