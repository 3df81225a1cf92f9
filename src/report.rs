use std::{
    fmt,
    io::{self, Write},
};

use chrono::{DateTime, Local};

use crate::stats::Stats;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct Report<'a> {
    pub generated_at: DateTime<Local>,
    pub stats: &'a Stats,
}

/// Two decimals, or `N/A` for statistics that are undefined for the dataset.
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.is_finite() {
            true => write!(f, "{:.2}", self.0),
            false => write!(f, "N/A"),
        }
    }
}

impl<'a> Report<'a> {
    pub fn new(stats: &'a Stats) -> Report<'a> {
        Report {
            generated_at: Local::now(),
            stats,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "データ分析レポート")?;
        writeln!(f, "==================")?;
        writeln!(f, "生成日時: {}", self.generated_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "データ件数: {}", self.stats.count)?;
        writeln!(f, "平均値: {}", Decimal(self.stats.mean))?;
        writeln!(f, "中央値: {}", Decimal(self.stats.median))?;
        write!(f, "標準偏差: {}", Decimal(self.stats.std))
    }
}

pub fn report<W: Write>(stats: &Stats, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", Report::new(stats))
}
