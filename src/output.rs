use std::io::{self, Write};

use serde::Serialize;

use crate::data::Item;
use crate::observer::{LoadObserver, LoadStatus};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub views: Vec<LoadStatus>,
}

impl LoadReport {
    pub fn failures(&self) -> usize {
        self.views.iter().filter(|status| !status.is_success()).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KeysReport {
    pub keys: Vec<String>,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_load(report: &LoadReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_keys(report: &KeysReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_item(item: &Item) -> io::Result<()> {
        Self::print_json(item)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
        out.flush()
    }
}

/// Prints one colored line per finished load to stderr.
pub struct StatusLines;

impl LoadObserver for StatusLines {
    fn on_status(&self, status: &LoadStatus) {
        let green = "\x1b[32m";
        let red = "\x1b[31m";
        let reset = "\x1b[0m";
        match status {
            LoadStatus::Ready { key, items } => {
                eprintln!("{green}ready{reset} {key} ({items} items)");
            }
            LoadStatus::Failed { key, error } => {
                eprintln!("{red}failed{reset} {key}: {error}");
            }
        }
    }
}
