use crate::error::{Error, Result};

/// Options controlling CSV line generation.
///
/// `depth` selects how many leading identifying columns precede the value
/// column (4, 3 or 2); any other value, or no depth at all, renders the
/// value column only. `full` forces depth 4 regardless of `depth`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Number of columns to include, counted from the value backwards.
    pub depth: Option<u8>,
    /// Force the full four-column shape.
    pub full: bool,
}

pub(crate) fn resolve_depth(options: &CsvOptions) -> u8 {
    if options.full {
        return 4;
    }
    match options.depth {
        Some(depth @ 2..=4) => depth,
        _ => 1,
    }
}

/// Generate exactly one CSV line with standard quoting, without a trailing
/// line terminator.
pub(crate) fn generate_line(fields: &[String]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| Error::csv(e.to_string()))?;
    let bytes = writer.into_inner().map_err(|e| Error::csv(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}

/// Read a document expected to hold exactly one CSV data row.
pub(crate) fn read_single_record(document: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(document.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::malformed_input(format!("invalid CSV: {e}")))?;
        rows.push(record);
    }

    match rows.as_slice() {
        [row] => Ok(row.iter().map(str::to_string).collect()),
        [] => Err(Error::malformed_input("empty CSV document")),
        _ => Err(Error::malformed_input("expected exactly one CSV row")),
    }
}
