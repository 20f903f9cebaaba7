use std::{path::PathBuf, time::Duration};

use clap::Parser;

pub const DEFAULT_URL: &str = "https://wakatime.com/share/@81040334-6dc6-4aad-a76c-3863c8b0c02e/d2e354b3-4097-4a04-b581-1b1ab65817a5.json";
pub const DEFAULT_START_MARKER: &str = "<!--START_SECTION:wakatime-totel-->";
pub const DEFAULT_END_MARKER: &str = "<!--END_SECTION:wakatime-totel-->";
pub const DEFAULT_FORMAT: &str = "Total time spent in editors (WakaTime): {total}";

#[derive(Parser, Debug, Clone)]
#[command(name = "wakatotal", version, about = "Writes the WakaTime grand total into a README marker block")]
pub struct Cli {
    #[arg(short = 'u', long = "url", env = "WAKATOTAL_URL", default_value = DEFAULT_URL, help = "WakaTime share JSON/JSONP URL")]
    pub url: String,

    #[arg(short = 'r', long = "readme", env = "WAKATOTAL_README", default_value = "README.md", help = "Path to the document to update")]
    pub readme: PathBuf,

    #[arg(long = "start-marker", env = "WAKATOTAL_START_MARKER", default_value = DEFAULT_START_MARKER, help = "Start marker comment")]
    pub start_marker: String,

    #[arg(long = "end-marker", env = "WAKATOTAL_END_MARKER", default_value = DEFAULT_END_MARKER, help = "End marker comment")]
    pub end_marker: String,

    #[arg(short = 'f', long = "format", env = "WAKATOTAL_FORMAT", default_value = DEFAULT_FORMAT, help = "Template line, {total} is replaced with the human readable total")]
    pub format: String,

    #[arg(short = 't', long = "timeout", env = "WAKATOTAL_TIMEOUT", default_value = "10", value_parser = parse_timeout, help = "Request timeout in seconds")]
    pub timeout: Duration,

    #[arg(short = 'n', long = "dry-run", help = "Print the updated document instead of writing it")]
    pub dry_run: bool,

    #[arg(short = 'q', long = "quiet", help = "Hide the spinner and the confirmation message")]
    pub quiet: bool,

    #[arg(short = 'v', long = "verbose", help = "Log request and file details")]
    pub verbose: bool,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|err| format!("{err}"))?;
    if seconds <= 0.0 {
        return Err(format!("timeout must be greater than zero, got {value}"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|err| format!("{err}"))
}
