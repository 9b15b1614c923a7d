use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::models::{Dataset, Record};

/// Parses uploaded CSV text into a dataset.
///
/// The first non-blank line supplies the headers. Every later line is zipped
/// positionally against them: missing positions become `""` and surplus
/// values are dropped. Quotes carry no meaning, so every newline ends a row
/// and a quoted comma still splits. Nothing here fails; unreadable rows are
/// skipped.
pub fn parse_dataset(text: &str) -> Dataset {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line = line + 1, error = %err, "skipping unreadable csv row");
                continue;
            }
        };

        if is_blank(&row) {
            continue;
        }

        let fields: Vec<String> = row.iter().map(clean_field).collect();
        match &headers {
            None => headers = Some(fields),
            Some(names) => records.push(zip_row(names, &fields)),
        }
    }

    let headers = headers.unwrap_or_default();
    debug!(
        columns = headers.len(),
        rows = records.len(),
        "parsed csv upload"
    );

    Dataset { headers, records }
}

fn is_blank(row: &StringRecord) -> bool {
    row.len() <= 1 && row.get(0).map_or(true, |field| field.trim().is_empty())
}

fn clean_field(field: &str) -> String {
    field.replace('"', "").trim().to_string()
}

fn zip_row(headers: &[String], fields: &[String]) -> Record {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let value = fields.get(index).cloned().unwrap_or_default();
            (header.clone(), value)
        })
        .collect()
}
