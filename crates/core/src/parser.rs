//! Tabular parsing and baseline structural checks.
//!
//! The engine only needs column names, rows, and a list of structural
//! problems; [`TabularParser`] is the seam for plugging in another parser.
//! [`CsvParser`] is the default, built on the `csv` crate.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::types::{Row, TabularData, ValidationFailure};

/// Output of a parser: the data plus its baseline structural failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub data: TabularData,
    pub baseline_failures: Vec<ValidationFailure>,
}

/// Converts raw file bytes into tabular data.
pub trait TabularParser {
    fn parse(&self, raw: &[u8]) -> Result<ParsedTable, EngineError>;
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Comma-separated (or other single-byte delimited) text with a header row.
///
/// Reported as baseline failures: undecodable input, a missing header,
/// blank or duplicate header labels, rows with extra cells, and completely
/// blank rows. Rows shorter than the header are read with the missing
/// cells absent and are not reported.
///
/// Row numbers on baseline failures count data rows from 1; the header row
/// is not counted, matching the numbering used by rule failures.
#[derive(Debug, Clone)]
pub struct CsvParser {
    pub delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl TabularParser for CsvParser {
    fn parse(&self, raw: &[u8]) -> Result<ParsedTable, EngineError> {
        let mut failures = Vec::new();

        let decoded = match std::str::from_utf8(raw) {
            Ok(text) => std::borrow::Cow::Borrowed(text),
            Err(e) => {
                failures.push(ValidationFailure::file(format!(
                    "The data source could not be successfully decoded: {e}"
                )));
                String::from_utf8_lossy(raw)
            }
        };
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&*decoded);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header = match records.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => {
                failures.push(ValidationFailure::file(format!(
                    "The header row could not be read: {e}"
                )));
                return Ok(ParsedTable {
                    data: TabularData::default(),
                    baseline_failures: failures,
                });
            }
            None => {
                failures.push(ValidationFailure::file("The data source has no header row"));
                return Ok(ParsedTable {
                    data: TabularData::default(),
                    baseline_failures: failures,
                });
            }
        };

        let columns = column_names(header.iter(), &mut failures);

        let mut rows = Vec::new();
        for (index, record) in records.enumerate() {
            let row_number = index + 1;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    failures.push(ValidationFailure::row(
                        row_number,
                        format!("Row {row_number} could not be read: {e}"),
                    ));
                    continue;
                }
            };

            if record.iter().all(|cell| cell.is_empty()) {
                failures.push(ValidationFailure::row(
                    row_number,
                    format!("Row {row_number} is completely blank"),
                ));
            }
            for position in columns.len()..record.len() {
                failures.push(ValidationFailure::row(
                    row_number,
                    format!(
                        "Row {row_number} has an extra value in field at position {}",
                        position + 1
                    ),
                ));
            }

            let row: Row = columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = record.get(i).filter(|c| !c.is_empty()).map(str::to_string);
                    (column.clone(), cell)
                })
                .collect();
            rows.push(row);
        }

        tracing::debug!(
            columns = columns.len(),
            rows = rows.len(),
            baseline_failures = failures.len(),
            "Parsed tabular data"
        );

        Ok(ParsedTable {
            data: TabularData { columns, rows },
            baseline_failures: failures,
        })
    }
}

/// Turn header labels into unique column names, reporting blank labels
/// (renamed `field<position>`) and duplicates (renamed `<label><n>`).
fn column_names<'a>(
    labels: impl Iterator<Item = &'a str>,
    failures: &mut Vec<ValidationFailure>,
) -> Vec<String> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::new();

    for (index, label) in labels.enumerate() {
        let position = index + 1;
        if label.trim().is_empty() {
            failures.push(ValidationFailure::file(format!(
                "Label in the header in field at position {position} is blank"
            )));
            columns.push(format!("field{position}"));
            continue;
        }

        let count = occurrences.entry(label.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            first_seen.insert(label.to_string(), position);
            columns.push(label.to_string());
        } else {
            let original = first_seen.get(label).copied().unwrap_or(position);
            failures.push(ValidationFailure::file(format!(
                "Label \"{label}\" in the header at position {position} is duplicated to a label at position {original}"
            )));
            columns.push(format!("{label}{count}"));
        }
    }

    columns
}
