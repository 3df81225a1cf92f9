mod config;
mod fetcher;
mod report;
mod stats;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use argh::FromArgs;
use config::Config;
use fetcher::Fetcher;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(FromArgs, Debug)]
/// Fetch a JSON dataset and print summary statistics of its `value` field
struct Args {
    /// url of the endpoint returning a JSON array, defaults to $DATA_REPORT_URL
    #[argh(option, short = 'u')]
    url: Option<Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Reported,
    NoData,
    FetchFailed,
}

impl Outcome {
    fn exit_code(self) -> u8 {
        match self {
            Outcome::Reported | Outcome::NoData => 0,
            Outcome::FetchFailed => 1,
        }
    }
}

fn run<W: Write>(fetcher: &Fetcher, out: &mut W) -> io::Result<Outcome> {
    let dataset = match fetcher.fetch() {
        Ok(dataset) => dataset,
        Err(err) => {
            writeln!(out, "エラー: {}", err)?;
            writeln!(out, "データの取得に失敗しました")?;
            return Ok(Outcome::FetchFailed);
        }
    };
    writeln!(out, "データ取得成功: {}件", dataset.len())?;

    match stats::analyze(&dataset, &mut *out)? {
        Some(stats) => {
            report::report(&stats, &mut *out)?;
            Ok(Outcome::Reported)
        }
        None => Ok(Outcome::NoData),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args: Args = argh::from_env();
    let config = Config::from_env(args.url).context("Failed to resolve configuration")?;

    let outcome = run(&Fetcher::new(config.url), &mut io::stdout().lock())
        .context("Failed to write to stdout")?;
    Ok(ExitCode::from(outcome.exit_code()))
}
