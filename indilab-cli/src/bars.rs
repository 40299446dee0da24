//! CSV bar loading.
//!
//! Expected header: `time,open,high,low,close[,volume]` (case-insensitive
//! aliases `Date`, `Open`, ... are accepted). Time is `%Y-%m-%d %H:%M:%S`,
//! `%Y-%m-%dT%H:%M:%S` or a bare `%Y-%m-%d`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use indilab_core::domain::{Bar, BarSeries};

#[derive(Debug, Deserialize)]
struct CsvBar {
    #[serde(alias = "Time", alias = "date", alias = "Date", alias = "datetime")]
    time: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(default, alias = "Volume")]
    volume: f64,
}

pub fn parse_time(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(time);
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("unrecognised bar time '{text}'"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

/// Read bars from any CSV source.
pub fn read_bars<R: std::io::Read>(reader: R, point: f64) -> Result<BarSeries> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut bars = Vec::new();
    for (row, record) in rdr.deserialize::<CsvBar>().enumerate() {
        // +2: one-based, after the header line
        let record = record.with_context(|| format!("CSV row {}", row + 2))?;
        let bar = Bar {
            time: parse_time(&record.time).with_context(|| format!("CSV row {}", row + 2))?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        };
        if !bar.is_sane() {
            tracing::warn!(row = row + 2, time = %bar.time, "bar fails OHLC sanity check");
        }
        bars.push(bar);
    }

    if let Some(pair) = bars.windows(2).find(|w| w[1].time < w[0].time) {
        bail!("bars are not in time order at {}", pair[1].time);
    }

    tracing::info!(bars = bars.len(), point, "loaded bars");
    Ok(BarSeries::from_bars(&bars, point)?)
}

pub fn load_bars(path: &Path, point: f64) -> Result<BarSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open bar file {}", path.display()))?;
    read_bars(file, point).with_context(|| format!("read bar file {}", path.display()))
}
