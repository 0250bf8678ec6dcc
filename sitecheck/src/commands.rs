use clap::{arg, command};
use sitecheck_core::config::{parse_concurrency, parse_delay_ms, parse_order, parse_sitemap_url};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitecheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitecheck")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log worker activity to stderr").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("check")
                .about(
                    "Check the status of every URL listed in a sitemap. Settings not given as \
                flags are prompted for.",
                )
                .arg(
                    arg!(-s --"sitemap" <URL>)
                        .required(false)
                        .help("URL of the sitemap (or sitemap index) to check")
                        .value_parser(parse_sitemap_url),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM_WORKERS>)
                        .required(false)
                        .help("Number of concurrent workers, 1 to 14")
                        .value_parser(parse_concurrency),
                )
                .arg(
                    arg!(-d --"delay" <MS>)
                        .required(false)
                        .help("Delay in milliseconds each worker waits after a request, above 250")
                        .value_parser(parse_delay_ms),
                )
                .arg(
                    arg!(-o --"order" <ORDER>)
                        .required(false)
                        .help("Traversal order: sequential or random")
                        .value_parser(parse_order),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for random order, for reproducible runs")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"errors-file" <PATH>)
                        .required(false)
                        .help("Write non-OK results to this JSON file (skips the save prompt)"),
                )
                .arg(
                    arg!(--"results-file" <PATH>)
                        .required(false)
                        .help("Write every recorded result to this JSON file (skips the save prompt)"),
                )
                .arg(
                    arg!(--"record-failures-in-all")
                        .required(false)
                        .help("Also record connection failures in the full results list")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
