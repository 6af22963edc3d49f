use std::env;
use std::io;
use std::process;

use anyhow::Result;
use log::{debug, error, info};

use seamcheck::cli::{self, Command};

/// SEAMCHECK - data-access seam, mock harness and MC/DC analysis
fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = match cli::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!();
            cli::print_usage(&mut io::stderr())?;
            process::exit(2);
        }
    };

    seamcheck::init_logging(options.log_level);
    info!("Starting {} v{}", seamcheck::PKG_NAME, seamcheck::VERSION);
    debug!("Command: {:?}", options.command);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::run(&options.command, &mut out) {
        Ok(true) => {}
        Ok(false) => {
            if let Command::Mcdc { .. } = options.command {
                error!("MC/DC not achieved");
            }
            process::exit(1);
        }
        Err(e) => {
            error!("Error running {:?}: {:#}", options.command, e);
            process::exit(1);
        }
    }

    info!("{} exiting", seamcheck::PKG_NAME);
    Ok(())
}
