// ABOUTME: CLI binary for pagesift.
// ABOUTME: Fetches a URL (or reads an HTML file), extracts structured data, and writes it as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pagesift::{save_to_json, to_json, Extractor, ExtractionRecord, ScrapeError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(about = "Extract structured data from a web page into JSON")]
struct Args {
    /// Page URL to scrape; also the base for resolving links
    url: String,

    /// Output file path (default: <host>_scraped_data.json)
    output: Option<PathBuf>,

    /// HTML file to parse instead of fetching the URL
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Request timeout in seconds (at least 1)
    #[arg(long = "timeout", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// User-Agent header to send
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Print the JSON to stdout instead of writing a file
    #[arg(long = "stdout")]
    stdout: bool,

    /// Write compact JSON instead of pretty
    #[arg(long = "compact")]
    compact: bool,

    /// Do not print the summary
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn extract(args: &Args) -> Result<ExtractionRecord, ScrapeError> {
    if let Some(html_path) = &args.html {
        let html = fs::read_to_string(html_path).map_err(|e| {
            ScrapeError::fetch(
                &args.url,
                "ReadHtml",
                Some(anyhow::anyhow!("cannot read {}: {}", html_path.display(), e)),
            )
        })?;
        return Extractor::from_html(&args.url, &html)?.extract_all();
    }

    let mut builder = Extractor::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    builder.build(&args.url).scrape_all()
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let record = match extract(&args) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("error scraping {}: {}", args.url, e);
            return ExitCode::from(1);
        }
    };

    if args.stdout {
        return match to_json(&record, !args.compact) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(1)
            }
        };
    }

    if !args.quiet {
        println!("{}", record.summary());
    }

    match save_to_json(&record, args.output.as_deref(), !args.compact) {
        Ok(path) => {
            if !args.quiet {
                println!("Data saved to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
