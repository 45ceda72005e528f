use crate::domain::model::{Dataset, Record};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// Parse CSV bytes into a [`Dataset`]. The first row is the header; every
/// following row becomes one [`Record`] keyed by it.
///
/// A repeated header name keeps its first position and takes the value of
/// its last column. Rows with a different column count than the header are
/// rejected, as is invalid UTF-8. `source` only labels errors.
pub fn parse_csv(bytes: &[u8], source: &Path) -> Result<Dataset> {
    let malformed = |e: csv::Error| EtlError::InputMalformed {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    // slots[column] is the index into `fields` that column writes to
    let mut fields: Vec<String> = Vec::new();
    let mut slots = Vec::new();
    for name in reader.headers().map_err(malformed)?.iter() {
        let slot = match fields.iter().position(|f| f == name) {
            Some(existing) => existing,
            None => {
                fields.push(name.to_string());
                fields.len() - 1
            }
        };
        slots.push(slot);
    }
    if fields.len() < slots.len() {
        tracing::warn!(
            "{} has repeated header names; later columns overwrite earlier ones",
            source.display()
        );
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        let mut values = vec![String::new(); fields.len()];
        for (slot, value) in slots.iter().zip(row.iter()) {
            values[*slot] = value.to_string();
        }
        records.push(Record::new(fields.iter().cloned().zip(values).collect()));
    }

    tracing::debug!(
        "Parsed {} records with {} fields from {}",
        records.len(),
        fields.len(),
        source.display()
    );

    Ok(Dataset { fields, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Dataset> {
        parse_csv(input.as_bytes(), Path::new("letters.csv"))
    }

    #[test]
    fn test_parse_keeps_row_and_field_order() {
        let data = parse("id,name,text\n1,Ola,Hei\n2,Kari,Takk\n").unwrap();

        assert_eq!(data.fields, vec!["id", "name", "text"]);
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].get("name"), Some("Ola"));
        assert_eq!(data.records[1].get("id"), Some("2"));

        let names: Vec<&str> = data.records[1].field_names().collect();
        assert_eq!(names, vec!["id", "name", "text"]);
    }

    #[test]
    fn test_parse_quoted_fields_and_non_ascii() {
        let data = parse("id,text\n1,\"Kjære venn, takk\"\n2,\"linje\nto\"\n").unwrap();

        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].get("text"), Some("Kjære venn, takk"));
        assert_eq!(data.records[1].get("text"), Some("linje\nto"));
    }

    #[test]
    fn test_repeated_header_keeps_last_value() {
        let data = parse("id,name,name\n1,a,b\n").unwrap();

        assert_eq!(data.fields, vec!["id", "name"]);
        assert_eq!(data.records[0].get("name"), Some("b"));

        let names: Vec<&str> = data.records[0].field_names().collect();
        assert_eq!(names, vec!["id", "name"]);

        let json = serde_json::to_string(&data.records).unwrap();
        assert_eq!(json, r#"[{"id":"1","name":"b"}]"#);
    }

    #[test]
    fn test_header_only_gives_no_records() {
        let data = parse("id,name,text\n").unwrap();
        assert_eq!(data.fields, vec!["id", "name", "text"]);
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_empty_input_gives_no_records() {
        let data = parse("").unwrap();
        assert!(data.fields.is_empty());
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let data = parse("\u{feff}id,name\n1,Ola\n").unwrap();
        assert_eq!(data.fields[0], "id");
        assert_eq!(data.records[0].get("id"), Some("1"));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse("id,name\n1,Ola\n2,Kari,extra\n").unwrap_err();
        match err {
            EtlError::InputMalformed { path, .. } => assert_eq!(path, Path::new("letters.csv")),
            other => panic!("expected InputMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes = b"id,name\n1,\xff\xfe\n";
        let err = parse_csv(bytes, Path::new("letters.csv")).unwrap_err();
        assert!(matches!(err, EtlError::InputMalformed { .. }));
    }
}
