use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::MultiProgress;
use sitecheck_core::config::{parse_concurrency, parse_delay_ms, parse_order, parse_sitemap_url};
use sitecheck_core::output::{
    DEFAULT_ERRORS_FILE, DEFAULT_RESULTS_FILE, generate_check_report, save_results,
};
use sitecheck_core::{CheckOptions, RunConfig, execute_check};
use sitecheck_scanner::checker::{DEFAULT_CONCURRENCY, DEFAULT_DELAY};
use sitecheck_scanner::{CheckResults, FailureRecording, PauseToken, TraversalOrder};
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, error, info};

/// Where a finished run's two record lists are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    pub errors: PathBuf,
    pub results: PathBuf,
}

/// Install the stderr log subscriber. WARN by default, DEBUG with `--verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

/// Ask until `parse` accepts the answer. An empty answer takes `default` when
/// there is one. Fails only if input is closed.
pub fn prompt_until_valid<T, R, W, F>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: Option<&str>,
    parse: F,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> std::result::Result<T, String>,
{
    loop {
        match default {
            Some(default) => write!(output, "{} [{}]: ", message.bright_cyan().bold(), default)?,
            None => write!(output, "{}: ", message.bright_cyan().bold())?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer given for '{}'", message),
            ));
        }

        let answer = match (line.trim(), default) {
            ("", Some(default)) => default,
            (answer, _) => answer,
        };

        match parse(answer) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "{} {}", "✗".red().bold(), e)?,
        }
    }
}

/// `y`/`yes` and `n`/`no`, any case. Anything else is the default.
pub fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Expand `~` in a user-supplied path, falling back to `default` when blank.
pub fn resolve_output_path(answer: &str, default: &str) -> PathBuf {
    let answer = answer.trim();
    let chosen = if answer.is_empty() { default } else { answer };
    PathBuf::from(shellexpand::tilde(chosen).as_ref())
}

/// Output files named on the command line, if either was.
pub fn output_targets_from_args(args: &ArgMatches) -> Option<OutputTargets> {
    let errors = args.get_one::<String>("errors-file");
    let results = args.get_one::<String>("results-file");
    if errors.is_none() && results.is_none() {
        return None;
    }

    Some(OutputTargets {
        errors: resolve_output_path(errors.map(String::as_str).unwrap_or(""), DEFAULT_ERRORS_FILE),
        results: resolve_output_path(
            results.map(String::as_str).unwrap_or(""),
            DEFAULT_RESULTS_FILE,
        ),
    })
}

/// Build the run configuration from flags, prompting for anything missing.
pub fn resolve_run_config<R: BufRead, W: Write>(
    args: &ArgMatches,
    input: &mut R,
    output: &mut W,
) -> Result<RunConfig> {
    let sitemap_url = match args.get_one::<String>("sitemap") {
        Some(url) => url.clone(),
        None => prompt_until_valid(input, output, "Sitemap URL", None, parse_sitemap_url)?,
    };

    let concurrency = match args.get_one::<usize>("concurrency") {
        Some(concurrency) => *concurrency,
        None => prompt_until_valid(
            input,
            output,
            "Concurrent workers (1-14)",
            Some(&DEFAULT_CONCURRENCY.to_string()),
            parse_concurrency,
        )?,
    };

    let delay_ms = match args.get_one::<u64>("delay") {
        Some(delay) => *delay,
        None => prompt_until_valid(
            input,
            output,
            "Delay between requests in ms (above 250)",
            Some(&DEFAULT_DELAY.as_millis().to_string()),
            parse_delay_ms,
        )?,
    };

    let order = match args.get_one::<TraversalOrder>("order") {
        Some(order) => *order,
        None => prompt_until_valid(
            input,
            output,
            "Order (sequential/random)",
            Some(TraversalOrder::Sequential.as_str()),
            parse_order,
        )?,
    };

    let failure_recording = if args.get_flag("record-failures-in-all") {
        FailureRecording::Everywhere
    } else {
        FailureRecording::NonSuccessOnly
    };

    let config = RunConfig::new(&sitemap_url, concurrency, delay_ms, order)?
        .with_seed(args.get_one::<u64>("seed").copied())
        .with_failure_recording(failure_recording);

    Ok(config)
}

/// Post-run question: save, and if so where.
pub fn prompt_output_targets<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<OutputTargets>> {
    let save = prompt_until_valid(input, output, "Save results? (y/N)", Some("n"), |answer| {
        Ok(parse_yes_no(answer, false))
    })?;
    if !save {
        return Ok(None);
    }

    let errors = prompt_until_valid(
        input,
        output,
        "File for non-OK results",
        Some(DEFAULT_ERRORS_FILE),
        |answer| Ok(resolve_output_path(answer, DEFAULT_ERRORS_FILE)),
    )?;
    let results = prompt_until_valid(
        input,
        output,
        "File for all results",
        Some(DEFAULT_RESULTS_FILE),
        |answer| Ok(resolve_output_path(answer, DEFAULT_RESULTS_FILE)),
    )?;

    Ok(Some(OutputTargets { errors, results }))
}

fn print_run_summary(config: &RunConfig) {
    print_divider();
    println!("{}", "  SITEMAP CHECK".bright_white().bold());
    print_divider();
    println!("{} Sitemap: {}", "→".blue(), config.sitemap_url.bright_white());
    println!("{} Workers: {}", "→".blue(), config.concurrency);
    println!("{} Delay: {}ms", "→".blue(), config.delay.as_millis());
    match config.seed {
        Some(seed) if config.order == TraversalOrder::Random => {
            println!("{} Order: {} (seed {})", "→".blue(), config.order, seed)
        }
        _ => println!("{} Order: {}", "→".blue(), config.order),
    }
    #[cfg(unix)]
    println!(
        "{} Send SIGUSR1 (kill -USR1 {}) to pause or resume",
        "→".blue(),
        std::process::id()
    );
    println!();
}

/// Run a stdin dialogue on the blocking pool so the runtime stays free to
/// handle Ctrl-C while the operator is being asked something.
async fn prompt_blocking<T, F>(dialogue: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut StdinLock<'static>, &mut Stdout) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut input = io::stdin().lock();
        dialogue(&mut input, &mut io::stdout())
    })
    .await
    .context("Prompt task failed")?
}

fn print_line(progress: Option<&MultiProgress>, message: &str) {
    match progress {
        Some(multi) => multi.suspend(|| println!("{}", message)),
        None => println!("{}", message),
    }
}

/// Flip the pause token on every SIGUSR1 for as long as the process lives.
#[cfg(unix)]
fn spawn_pause_listener(
    pause: PauseToken,
    progress: Option<MultiProgress>,
) -> Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut usr1 =
        signal(SignalKind::user_defined1()).context("Failed to listen for SIGUSR1")?;

    Ok(tokio::spawn(async move {
        while usr1.recv().await.is_some() {
            if pause.toggle() {
                info!("Run paused");
                print_line(
                    progress.as_ref(),
                    &format!("{} Paused, send SIGUSR1 again to resume", "⏸".yellow().bold()),
                );
            } else {
                info!("Run resumed");
                print_line(progress.as_ref(), &format!("{} Resumed", "▶".green().bold()));
            }
        }
    }))
}

async fn run_check(config: RunConfig, quiet: bool) -> Result<CheckResults> {
    let pause = PauseToken::new();
    let progress = (!quiet).then(MultiProgress::new);

    #[cfg(unix)]
    let listener = spawn_pause_listener(pause.clone(), progress.clone())?;

    let callback_progress = progress.clone();
    let progress_callback = Arc::new(move |msg: String| {
        if !quiet {
            print_line(callback_progress.as_ref(), &msg);
        }
    });

    let options = CheckOptions { config, progress };

    let outcome = execute_check(options, pause, Some(progress_callback)).await;

    #[cfg(unix)]
    listener.abort();

    outcome.context("Check failed")
}

pub async fn handle_check(args: &ArgMatches, quiet: bool) -> Result<()> {
    let flags = args.clone();
    let config =
        prompt_blocking(move |input, output| resolve_run_config(&flags, input, output)).await?;

    if !quiet {
        print_run_summary(&config);
    }

    let results = run_check(config, quiet).await?;

    println!("\n{} Check complete!", "✓".green().bold());
    print!("{}", generate_check_report(&results));

    let targets = match output_targets_from_args(args) {
        Some(targets) => Some(targets),
        None => {
            prompt_blocking(|input, output| Ok(prompt_output_targets(input, output)?)).await?
        }
    };

    if let Some(targets) = targets {
        save_results(&results, &targets.errors, &targets.results).with_context(|| {
            format!(
                "Failed to save results to {} and {}",
                targets.errors.display(),
                targets.results.display()
            )
        })?;
        println!(
            "{} Saved {} non-OK results to {}",
            "✓".green().bold(),
            results.non_success.len(),
            targets.errors.display()
        );
        println!(
            "{} Saved {} results to {}",
            "✓".green().bold(),
            results.all.len(),
            targets.results.display()
        );
    }

    Ok(())
}

/// Log a fatal error the way every exit path reports it.
pub fn report_fatal(e: &anyhow::Error) {
    error!("{:#}", e);
    eprintln!("{} {:#}", "✗".red().bold(), e);
}
