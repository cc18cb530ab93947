//! Select command implementation.
//!
//! Reads one record per line and prints the records whose labels satisfy the
//! expression. Labels on a line are separated by whitespace and/or commas;
//! a blank line is a record with no labels.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use super::{CommandContext, CommandError, LabelValue, Result};
use crate::output::{format_select_json, format_select_text, Record};

/// Options for the select command.
#[derive(Debug)]
pub struct SelectOptions {
    /// Expression or @name.
    pub expression: String,
    /// Input file; stdin when `None`.
    pub input: Option<PathBuf>,
    /// Select records that do not match.
    pub invert: bool,
    /// Print only the count.
    pub count: bool,
}

/// Parses the labels on one input line.
pub fn parse_labels(line: &str, line_number: usize) -> Result<Vec<LabelValue>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<LabelValue>().map_err(|e| CommandError::Input {
                line: line_number,
                message: format!("'{}' is not a label ({})", part, e),
            })
        })
        .collect()
}

/// Reads all records from `reader`.
pub fn read_records(reader: impl BufRead) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let text = line?;
        let line_number = index + 1;
        let labels = parse_labels(&text, line_number)?;
        records.push(Record {
            line: line_number,
            text,
            labels,
        });
    }
    Ok(records)
}

/// Executes the select command and returns the number of selected records.
pub fn execute(ctx: &CommandContext, opts: &SelectOptions) -> Result<usize> {
    let filter = ctx.compile(&opts.expression)?;

    let records = match &opts.input {
        Some(path) => {
            log::debug!("reading records from {}", path.display());
            read_records(BufReader::new(File::open(path)?))?
        }
        None => read_records(io::stdin().lock())?,
    };

    let selected: Vec<&Record> = records
        .iter()
        .filter(|record| filter.check(&record.labels) != opts.invert)
        .collect();
    log::debug!(
        "selected {} of {} records with {:?}",
        selected.len(),
        records.len(),
        filter.expression()
    );

    if ctx.json_output {
        println!(
            "{}",
            format_select_json(filter.expression(), records.len(), &selected, opts.count)?
        );
    } else if opts.count {
        println!("{}", selected.len());
    } else {
        print!("{}", format_select_text(&selected));
    }

    Ok(selected.len())
}
