use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::Value;
use strum::Display;

use crate::{domain::filters::FilterSet, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// JSON file with the records to page through (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Page size (overrides the config file)
    #[arg(short, long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Filter as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, Value)>,

    /// Stop after this many pages
    #[arg(long, value_name = "COUNT")]
    pub max_pages: Option<usize>,

    /// Simulated latency of every page load
    #[arg(long, value_name = "MILLIS", default_value_t = 0)]
    pub latency_ms: u64,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,
}

impl Cli {
    pub fn filter_set(&self) -> FilterSet {
        self.filters.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One line per loaded page plus totals
    Summary,
    /// The final list as a JSON array
    Json,
}

fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
