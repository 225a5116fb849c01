//! failfast CLI: runs the scripted demonstrations and the concurrency
//! stress harness.
//!
//! - `failfast demo [--kind K]` - mutate-during-traversal script
//! - `failfast stress [--kind K] [--size N] [--insertions M] [--workers W] [--live]`

mod commands;
mod format;
mod logging;
mod parse;

use std::process;

use tracing::debug;

use commands::build_cli;
use format::{format_demonstration, format_error, format_stress, OutputMode};
use parse::{matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    logging::init(matches.get_one::<String>("log").map(|s| s.as_str()));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let exit_code = match matches_to_action(&matches) {
        Ok(action) => run(action, output_mode),
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            1
        }
    };
    process::exit(exit_code);
}

fn run(action: CliAction, mode: OutputMode) -> i32 {
    debug!(?action, "dispatching");
    match action {
        CliAction::Demo(kinds) => {
            for kind in kinds {
                let report = failfast::demonstration::run(kind);
                println!("{}", format_demonstration(&report, mode));
            }
            0
        }
        CliAction::Stress { kinds, config } => {
            let mut exit_code = 0;
            for kind in kinds {
                match failfast::harness::run(kind, &config) {
                    Ok(report) => {
                        if !report.is_consistent() {
                            exit_code = 2;
                        }
                        println!("{}", format_stress(&report, mode));
                    }
                    Err(e) => {
                        eprintln!("{}", format_error(&e.to_string(), mode));
                        return 1;
                    }
                }
            }
            exit_code
        }
    }
}
