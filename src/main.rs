//! Binary entrypoint for the `code-monitor` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match code_monitor::parse(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    code_monitor::logging::init(cli.verbose);

    match code_monitor::commands::dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
