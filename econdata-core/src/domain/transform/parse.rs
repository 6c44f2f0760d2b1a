// econdata-core/src/domain/transform/parse.rs

/// How the raw text of a source is split into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMode {
    /// Regular CSV with a header row. Short rows read as missing trailing cells.
    Headered,
    /// Tolerant positional parsing: rows are padded with empty fields (or
    /// truncated) to exactly `width` fields. Used for files whose older rows
    /// carry fewer trailing columns than the current header.
    Padded { width: usize },
}

/// All-text view of a parsed source, before any typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawFrame {
    pub fn position_of(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn cell(&self, row: usize, index: usize) -> Option<&str> {
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

pub fn parse(text: &str, mode: &ParseMode) -> Result<RawFrame, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if let ParseMode::Padded { width } = mode {
            row.resize(*width, String::new());
        }
        rows.push(row);
    }

    if let ParseMode::Padded { width } = mode {
        let present = headers.len();
        headers.truncate(*width);
        headers.extend((present..*width).map(|i| format!("column_{}", i)));
    }

    Ok(RawFrame { headers, rows })
}
