//! Clap command tree for the failfast CLI.

use clap::{Arg, ArgAction, Command};

use failfast::ContainerKind;

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("failfast")
        .about("Fail-fast traversal demonstrations and concurrency stress runs")
        .subcommand_required(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print reports as JSON"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .value_name("FILTER")
                .help("Log filter, e.g. \"info\" or \"failfast=debug\" (overrides RUST_LOG)"),
        )
        .subcommand(demo_command())
        .subcommand(stress_command())
}

fn kind_arg(help: &'static str) -> Arg {
    Arg::new("kind")
        .long("kind")
        .short('k')
        .value_parser(ContainerKind::ALL.map(|kind| kind.name()))
        .help(help)
}

fn demo_command() -> Command {
    Command::new("demo")
        .about("Run the scripted mutate-during-traversal demonstration")
        .arg(kind_arg(
            "Container to demonstrate (default: sequence, mapping and set)",
        ))
}

fn stress_command() -> Command {
    Command::new("stress")
        .about("Run traversal workers against a concurrent mutator")
        .arg(kind_arg("Container to stress (default: every kind)"))
        .arg(
            Arg::new("size")
                .long("size")
                .value_name("N")
                .help("Initial container size [default: 10000]"),
        )
        .arg(
            Arg::new("insertions")
                .long("insertions")
                .value_name("M")
                .help("Insertions performed by the mutator [default: 100]"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .value_name("W")
                .help("Traversal workers [default: 2]"),
        )
        .arg(
            Arg::new("live")
                .long("live")
                .action(ArgAction::SetTrue)
                .help("Traverse shared strict containers directly instead of a copy"),
        )
        .arg(
            Arg::new("no-yield")
                .long("no-yield")
                .action(ArgAction::SetTrue)
                .help("Do not yield between steps"),
        )
}
