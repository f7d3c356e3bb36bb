//! Circuit list ingestion from `circuits.csv`.
//!
//! The file has a header row; `country`, `lat`, `lng` and `name` columns are
//! located by header name so extra columns are tolerated. Row order is the
//! tour order.

use tracing::debug;

use crate::core::types::GeoPoint;
use crate::error::{GlobeError, GlobeResult};

/// One tour stop, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl Circuit {
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lng, self.lat)
    }
}

/// Parses circuit rows from CSV text.
///
/// No repository dependency exists for CSV; the format here is plain
/// comma-separated fields with optional double quotes around a field.
pub fn parse_circuits_csv(text: &str) -> GlobeResult<Vec<Circuit>> {
    let mut lines = text.lines().enumerate();
    let (_, header) = lines
        .next()
        .ok_or_else(|| GlobeError::Circuits {
            line: 1,
            message: "empty file, expected a header row".to_owned(),
        })?;

    let columns = split_row(header);
    let column = |name: &str| -> GlobeResult<usize> {
        columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| GlobeError::Circuits {
                line: 1,
                message: format!("missing required column `{name}`"),
            })
    };
    let country_col = column("country")?;
    let lat_col = column("lat")?;
    let lng_col = column("lng")?;
    let name_col = column("name")?;

    let mut circuits = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let fields = split_row(line);

        circuits.push(Circuit {
            country: field(&fields, country_col, "country", line_number)?
                .trim()
                .to_owned(),
            lat: coordinate(&fields, lat_col, "lat", line_number)?,
            lng: coordinate(&fields, lng_col, "lng", line_number)?,
            name: field(&fields, name_col, "name", line_number)?.trim().to_owned(),
        });
    }

    debug!(circuits = circuits.len(), "parsed circuit list");
    Ok(circuits)
}

fn field<'a>(fields: &'a [String], col: usize, label: &str, line: usize) -> GlobeResult<&'a str> {
    fields
        .get(col)
        .map(String::as_str)
        .ok_or_else(|| GlobeError::Circuits {
            line,
            message: format!("row has no `{label}` field"),
        })
}

fn coordinate(fields: &[String], col: usize, label: &str, line: usize) -> GlobeResult<f64> {
    let raw = field(fields, col, label, line)?;
    raw.trim().parse::<f64>().map_err(|_| GlobeError::Circuits {
        line,
        message: format!("`{label}` value `{raw}` is not a number"),
    })
}

/// Splits one CSV row, honoring double-quoted fields with doubled-quote
/// escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
