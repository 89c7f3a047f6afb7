use std::{env::args_os, process::ExitCode};

use portrait_channel_selector::{select_channel_for_ppm, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match select_channel_for_ppm(&arguments) {
        Ok(selection) => {
            println!("Best channel: {}", selection);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Channel selection failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
