// src/bin/cli.rs
use railgazer::cli;

fn main() {
    // `cli::run` has already printed the failure.
    if cli::run().is_err() {
        std::process::exit(1);
    }
}
