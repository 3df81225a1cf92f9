use std::io::{self, Write};

use crate::fetcher::Dataset;

/// Summary of the `value` field over a whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, NaN for fewer than two values.
    pub std: f64,
}

impl Stats {
    pub fn compute(data: &[f64]) -> Option<Stats> {
        if data.is_empty() {
            return None;
        }
        let count = data.len();
        let mean = data.iter().sum::<f64>() / count as f64;

        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.
        } else {
            sorted[mid]
        };

        let std = if count < 2 {
            f64::NAN
        } else {
            let variance = data
                .iter()
                .map(|value| (mean - value).powf(2.))
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        };

        Some(Stats {
            count,
            mean,
            median,
            std,
        })
    }
}

/// Computes statistics over the dataset, printing a notice when there is nothing to analyze.
pub fn analyze<W: Write>(dataset: &Dataset, out: &mut W) -> io::Result<Option<Stats>> {
    if dataset.is_empty() {
        writeln!(out, "データがありません")?;
        return Ok(None);
    }
    let values = dataset.iter().map(|record| record.value).collect::<Vec<_>>();
    Ok(Stats::compute(&values))
}
