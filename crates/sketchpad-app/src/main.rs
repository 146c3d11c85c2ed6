//! Command line entry point.

use clap::Parser;
use sketchpad_app::cli::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match sketchpad_app::commands::run(cli) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
