//! Ingestion of already-split textual rows.
//!
//! Each row is `frame_id, label, tlx, tly, brx, bry` with an optional
//! trailing `confidence`. Reading the rows from disk is left to the caller.

use crate::error::{DetectionEvalError, Result};
use crate::frames::{BoxInput, FrameCollection};
use crate::types::FrameId;

/// Split one line on `delimiter`, trimming every field.
///
/// # Example
///
/// ```
/// use detection_eval::records::split_line;
///
/// assert_eq!(split_line("f1, car, 1, 2, 3, 4", ","), vec!["f1", "car", "1", "2", "3", "4"]);
/// ```
pub fn split_line<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    line.split(delimiter).map(str::trim).collect()
}

/// Parse a row of 6 or 7 fields into a [`BoxInput`].
///
/// # Errors
///
/// [`DetectionEvalError::UnsupportedArity`] for any other field count,
/// [`DetectionEvalError::InvalidRecord`] when a numeric field does not parse.
pub fn parse_row<S: AsRef<str>>(fields: &[S]) -> Result<BoxInput> {
    if fields.len() != 6 && fields.len() != 7 {
        return Err(DetectionEvalError::UnsupportedArity(fields.len()));
    }

    let frame_id = FrameId::from(fields[0].as_ref().trim());
    let label = fields[1].as_ref().trim().to_string();
    let values = fields[2..]
        .iter()
        .map(|field| parse_number(field.as_ref()))
        .collect::<Result<Vec<f64>>>()?;

    BoxInput::from_positional(frame_id, label, &values)
}

fn parse_number(field: &str) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| DetectionEvalError::InvalidRecord(format!("'{}' is not a number: {}", field.trim(), e)))
}

/// Group parsed rows into a [`FrameCollection`].
///
/// Rows with at most one field are blank lines and are skipped.
pub fn collection_from_rows<I, R, S>(rows: I) -> Result<FrameCollection>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut collection = FrameCollection::new();
    for row in rows {
        let fields = row.as_ref();
        if fields.len() <= 1 {
            continue;
        }
        collection.insert(parse_row(fields)?)?;
    }
    Ok(collection)
}

/// Parse delimited text, one record per line.
pub fn collection_from_str(text: &str, delimiter: &str) -> Result<FrameCollection> {
    collection_from_rows(text.lines().map(|line| split_line(line, delimiter)))
}
