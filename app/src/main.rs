//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point. Snapshot JSON goes to stdout, log lines
//          (seq|level|category|message) to stderr and the optional log file.

use clap::Parser;

fn main() {
    let cli = app_lib::Cli::parse();

    match app_lib::run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            app_lib::log_error!("APP", "{}", e);
            std::process::exit(1);
        }
    }
}
