//! Binary entrypoint for the `miler` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();

    // Recording and replay are selected in commands::sync via MILER_RECORD / MILER_REPLAY.
    match miler::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
