pub mod check;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod sitemap;

pub use check::{CheckOptions, CheckProgressCallback, build_checker, execute_check};
pub use config::{ConfigError, RunConfig};
pub use error::CheckError;

use colored::Colorize;

const BANNER: &str = r#"
     _ _             _               _
 ___(_) |_ ___   ___| |__   ___  ___| | __
/ __| | __/ _ \ / __| '_ \ / _ \/ __| |/ /
\__ \ | ||  __/| (__| | | |  __/ (__|   <
|___/_|\__\___| \___|_| |_|\___|\___|_|\_\
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "sitemap status checker".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
