//! # CSV Export Module
//!
//! Converts a spreadsheet export of the dictionary (comma delimited, with the
//! definition wrapped in double quotes) into the `;` delimited layout loaded
//! into PostgreSQL with `COPY latin FROM ... DELIMITER ';'`.
//!
//! ```text
//! 1,absent,absens,"(adj) foo; not present",absent,ausente,assente
//! 1;absent;absens;(adj) foo, not present;absent;ausente;assente
//! ```

use log::{debug, info};
use std::io::{Read, Write};

pub const EXPORT_COLUMNS: usize = 7;
const DEFINITION_COLUMN: usize = 3;

#[derive(Debug)]
pub enum ReformatError {
    /// Malformed CSV input
    Csv(csv::Error),
    /// Failure writing the output
    Io(std::io::Error),
    /// A row without exactly seven columns
    ColumnCount { line: u64, found: usize },
}

impl std::fmt::Display for ReformatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReformatError::Csv(e) => write!(f, "CSV error: {e}"),
            ReformatError::Io(e) => write!(f, "I/O error: {e}"),
            ReformatError::ColumnCount { line, found } => {
                write!(f, "Line {line}: expected {EXPORT_COLUMNS} columns, found {found}")
            }
        }
    }
}

impl std::error::Error for ReformatError {}

impl From<csv::Error> for ReformatError {
    fn from(err: csv::Error) -> Self {
        ReformatError::Csv(err)
    }
}

impl From<std::io::Error> for ReformatError {
    fn from(err: std::io::Error) -> Self {
        ReformatError::Io(err)
    }
}

/// Join one exported record with `;`, keeping the definition free of `;`
pub fn reformat_record(record: &csv::StringRecord) -> String {
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if i == DEFINITION_COLUMN {
                field.replace(';', ",")
            } else {
                field.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Reformat every row of `input` into `output`, returning the row count
pub fn reformat<R: Read, W: Write>(input: R, mut output: W) -> Result<usize, ReformatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = 0_usize;
    for result in reader.records() {
        let record = result?;
        if record.len() != EXPORT_COLUMNS {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ReformatError::ColumnCount {
                line,
                found: record.len(),
            });
        }
        let line = reformat_record(&record);
        debug!("{line}");
        writeln!(output, "{line}")?;
        rows += 1;
    }

    output.flush()?;
    info!("Reformatted {rows} dictionary rows");
    Ok(rows)
}
