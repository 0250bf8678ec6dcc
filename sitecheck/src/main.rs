use colored::Colorize;
use sitecheck::commands::command_argument_builder;
use sitecheck::handlers::{handle_check, init_logging, report_fatal};
use sitecheck_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_flag("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    let outcome = match chosen_command.subcommand() {
        Some(("check", primary_command)) => tokio::select! {
            outcome = handle_check(primary_command, quiet) => outcome,
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", "Exiting...".yellow());
                std::process::exit(130);
            }
        },
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        report_fatal(&e);
        println!("{}", "Exiting...".yellow());
        std::process::exit(1);
    }

    println!("{}", "Exiting...".bright_black());
}
