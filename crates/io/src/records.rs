//! Whitespace-separated record reading for the FLO-2D text files.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::IoError;

/// One non-blank line split into whitespace-separated fields.
pub(crate) struct Record<'a> {
    path: &'a Path,
    line: usize,
    fields: Vec<&'a str>,
}

impl Record<'_> {
    /// Number of fields on the line.
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// 1-based line number.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Build an [`IoError::UnknownFormat`] pointing at this line.
    pub(crate) fn format_error(&self, reason: impl Into<String>) -> IoError {
        IoError::UnknownFormat {
            path: self.path.to_path_buf(),
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Fail unless the line has exactly `n` fields.
    pub(crate) fn expect_len(&self, n: usize) -> Result<(), IoError> {
        if self.len() == n {
            Ok(())
        } else {
            Err(self.format_error(format!("expected {n} fields, got {}", self.len())))
        }
    }

    fn field(&self, i: usize) -> Result<&str, IoError> {
        self.fields
            .get(i)
            .copied()
            .ok_or_else(|| self.format_error(format!("missing field {}", i + 1)))
    }

    /// Field `i` as a floating-point number.
    pub(crate) fn f64(&self, i: usize) -> Result<f64, IoError> {
        let s = self.field(i)?;
        s.parse::<f64>()
            .map_err(|_| self.format_error(format!("field {} is not a number: '{s}'", i + 1)))
    }

    /// Field `i` as a non-negative integer.
    pub(crate) fn usize(&self, i: usize) -> Result<usize, IoError> {
        let s = self.field(i)?;
        s.parse::<usize>().map_err(|_| {
            self.format_error(format!(
                "field {} is not a non-negative integer: '{s}'",
                i + 1
            ))
        })
    }

    /// Field `i` as a 1-based index, converted to 0-based. Zero is rejected.
    pub(crate) fn index(&self, i: usize) -> Result<usize, IoError> {
        match self.usize(i)? {
            0 => Err(self.format_error(format!("field {} must be a 1-based id, got 0", i + 1))),
            n => Ok(n - 1),
        }
    }

    /// Field `i` as a 1-based reference where 0 means "none".
    pub(crate) fn optional_index(&self, i: usize) -> Result<Option<usize>, IoError> {
        Ok(self.usize(i)?.checked_sub(1))
    }
}

/// Call `f` for every non-blank line of the file at `path`, stopping at the
/// first error.
///
/// Returns [`IoError::FileNotFound`] if the file does not exist.
pub(crate) fn for_each_record<F>(path: &Path, mut f: F) -> Result<(), IoError>
where
    F: FnMut(&Record<'_>) -> Result<(), IoError>,
{
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::from(e),
    })?;

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let record = Record {
            path,
            line: i + 1,
            fields,
        };
        f(&record)?;
    }
    Ok(())
}
