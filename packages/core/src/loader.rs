//! One-shot CSV loader for the venue table.
//!
//! [`load_venues`] reads the whole file, coerces every numeric column and
//! assigns sequential ids starting at 1 in file order. The first bad row
//! aborts the load: callers either get every row or an error, never a
//! partial table.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::venue::{Venue, COLUMNS, WEEKDAY_COLUMNS};

/// Errors that abort startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("header is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("line {line}: missing value for column `{column}`")]
    MissingField { line: u64, column: &'static str },

    #[error("line {line}: column `{column}` is not a number: {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: column `{column}` is not an integer: {value:?}")]
    InvalidInteger {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Load every venue from the CSV file at `path`.
pub fn load_venues(path: impl AsRef<Path>) -> Result<Vec<Venue>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_venues_from_reader(file)
}

/// Load every venue from any CSV byte source.
pub fn load_venues_from_reader<R: Read>(reader: R) -> Result<Vec<Venue>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = ColumnIndex::resolve(csv_reader.headers()?)?;

    let mut venues = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let id = venues.len() as i64 + 1;
        venues.push(header.parse_row(&record, id)?);
    }

    Ok(venues)
}

/// Position of each required column within the file's header row.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn resolve(header: &StringRecord) -> Result<Self, LoadError> {
        // Duplicate header names resolve to the last occurrence.
        let by_name: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(position, name)| (name, position))
            .collect();

        let mut positions = HashMap::with_capacity(COLUMNS.len());
        for column in COLUMNS {
            let position = by_name
                .get(column)
                .copied()
                .ok_or(LoadError::MissingColumn { column })?;
            positions.insert(column, position);
        }

        Ok(Self { positions })
    }

    fn parse_row(&self, record: &StringRecord, id: i64) -> Result<Venue, LoadError> {
        let row = Row {
            record,
            index: self,
            line: record.position().map(|p| p.line()).unwrap_or(0),
        };

        // Evaluated in column order so the first bad cell is the one reported.
        let name = row.text("name")?;
        let lat = row.float("lat")?;
        let lng = row.float("lng")?;
        let kind = row.text("type")?;
        let address = row.text("address")?;
        let description = row.text("description")?;
        let phone = row.text("phone")?;
        let website = row.text("website")?;
        let [mon, tue, wed, thu, fri, sat, sun] = row.weekdays()?;

        Ok(Venue {
            id,
            name,
            lat,
            lng,
            kind,
            address,
            description,
            phone,
            website,
            mon,
            tue,
            wed,
            thu,
            fri,
            sat,
            sun,
            payment: row.integer("payment")?,
            price: row.price("price")?,
            info_website: row.text("info_website")?,
        })
    }
}

/// A single data record viewed through the resolved header.
struct Row<'a> {
    record: &'a StringRecord,
    index: &'a ColumnIndex,
    line: u64,
}

impl<'a> Row<'a> {
    fn raw(&self, column: &'static str) -> Result<&'a str, LoadError> {
        self.index
            .positions
            .get(column)
            .and_then(|&position| self.record.get(position))
            .ok_or(LoadError::MissingField {
                line: self.line,
                column,
            })
    }

    fn text(&self, column: &'static str) -> Result<String, LoadError> {
        self.raw(column).map(str::to_string)
    }

    /// Finite floats only: `NaN` and `inf` have no JSON representation.
    fn float(&self, column: &'static str) -> Result<f64, LoadError> {
        let value = self.raw(column)?;
        match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(LoadError::InvalidNumber {
                line: self.line,
                column,
                value: value.to_string(),
            }),
        }
    }

    fn integer(&self, column: &'static str) -> Result<i64, LoadError> {
        let value = self.raw(column)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| LoadError::InvalidInteger {
                line: self.line,
                column,
                value: value.to_string(),
            })
    }

    /// Open flags in [`WEEKDAY_COLUMNS`] order.
    fn weekdays(&self) -> Result<[i64; 7], LoadError> {
        let mut days = [0; 7];
        for (day, column) in days.iter_mut().zip(WEEKDAY_COLUMNS) {
            *day = self.integer(column)?;
        }
        Ok(days)
    }

    /// Like [`Row::float`], except an empty value means free (0.0).
    fn price(&self, column: &'static str) -> Result<f64, LoadError> {
        if self.raw(column)?.is_empty() {
            return Ok(0.0);
        }
        self.float(column)
    }
}
