//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use failfast::{ContainerKind, StressConfig};

/// The result of parsing the command line.
#[derive(Debug)]
pub enum CliAction {
    /// Run demonstrations for these kinds, in order
    Demo(Vec<ContainerKind>),
    /// Run the stress harness for these kinds with one configuration
    Stress {
        kinds: Vec<ContainerKind>,
        config: StressConfig,
    },
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "demo" => {
            let kinds = kinds(sub_matches, &ContainerKind::STRICT)?;
            Ok(CliAction::Demo(kinds))
        }
        "stress" => parse_stress(sub_matches),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn kinds(matches: &ArgMatches, default: &[ContainerKind]) -> Result<Vec<ContainerKind>, String> {
    match matches.get_one::<String>("kind") {
        Some(name) => {
            let kind = name.parse::<ContainerKind>().map_err(|e| e.to_string())?;
            Ok(vec![kind])
        }
        None => Ok(default.to_vec()),
    }
}

fn count(matches: &ArgMatches, name: &str) -> Result<Option<usize>, String> {
    matches
        .get_one::<String>(name)
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| format!("Invalid {}: {}", name, e))
}

fn parse_stress(matches: &ArgMatches) -> Result<CliAction, String> {
    let kinds = kinds(matches, &ContainerKind::ALL)?;

    let mut builder = StressConfig::builder();
    if let Some(size) = count(matches, "size")? {
        builder = builder.initial_size(size);
    }
    if let Some(insertions) = count(matches, "insertions")? {
        builder = builder.insertions(insertions);
    }
    if let Some(workers) = count(matches, "workers")? {
        builder = builder.traversal_workers(workers);
    }
    if matches.get_flag("live") {
        builder = builder.live();
    }
    if matches.get_flag("no-yield") {
        builder = builder.yield_between(false);
    }
    let config = builder.build().map_err(|e| e.to_string())?;

    Ok(CliAction::Stress { kinds, config })
}
