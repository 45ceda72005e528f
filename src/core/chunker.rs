use crate::domain::model::{Chunk, ChunkResult, Dataset, Metadata, Record};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Split `records` into consecutive chunks of `chunk_size`; the last one
/// holds the remainder. No records means no chunks.
pub fn chunk_records(records: Vec<Record>, chunk_size: usize) -> Result<Vec<Chunk>> {
    validate_positive_number("chunk_size", chunk_size, 1)?;

    let mut chunks = Vec::with_capacity(records.len().div_ceil(chunk_size));
    let mut rows = records.into_iter().peekable();

    while rows.peek().is_some() {
        chunks.push(Chunk {
            index: chunks.len(),
            records: rows.by_ref().take(chunk_size).collect(),
        });
    }

    Ok(chunks)
}

/// Chunk a whole dataset and describe the result.
pub fn chunk_dataset(data: Dataset, chunk_size: usize) -> Result<ChunkResult> {
    let total_letters = data.records.len();
    let fields = if total_letters == 0 {
        Vec::new()
    } else {
        data.fields
    };

    let chunks = chunk_records(data.records, chunk_size)?;
    let metadata = Metadata {
        total_letters,
        chunks: chunks.len(),
        chunk_size,
        fields,
    };

    Ok(ChunkResult { chunks, metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(vec![("id".to_string(), i.to_string())]))
            .collect()
    }

    #[test]
    fn test_uneven_split() {
        let chunks = chunk_records(records(1500), 1000).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 500);
        assert_eq!(chunks[1].index, 1);
        assert_eq!(chunks[1].records[0].get("id"), Some("1000"));
    }

    #[test]
    fn test_even_split_has_no_trailing_empty_chunk() {
        let chunks = chunk_records(records(6), 3).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_empty_input_gives_no_chunks() {
        let chunks = chunk_records(Vec::new(), 1000).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_zero_chunk_size_fails() {
        let err = chunk_records(records(3), 0).unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_partition_is_exhaustive_and_ordered() {
        for (total, size) in [(1, 1), (7, 2), (10, 10), (11, 10), (999, 1000), (2001, 1000)] {
            let chunks = chunk_records(records(total), size).unwrap();

            assert_eq!(chunks.len(), total.div_ceil(size));
            for chunk in &chunks[..chunks.len() - 1] {
                assert_eq!(chunk.len(), size);
            }

            let flattened: Vec<String> = chunks
                .iter()
                .flat_map(|c| c.records.iter())
                .map(|r| r.get("id").unwrap().to_string())
                .collect();
            let expected: Vec<String> = (0..total).map(|i| i.to_string()).collect();
            assert_eq!(flattened, expected);
        }
    }

    #[test]
    fn test_metadata_for_dataset() {
        let data = Dataset {
            fields: vec!["id".to_string()],
            records: records(1500),
        };
        let result = chunk_dataset(data, 1000).unwrap();
        assert_eq!(
            result.metadata,
            Metadata {
                total_letters: 1500,
                chunks: 2,
                chunk_size: 1000,
                fields: vec!["id".to_string()],
            }
        );
    }

    #[test]
    fn test_metadata_fields_empty_without_records() {
        let data = Dataset {
            fields: vec!["id".to_string(), "name".to_string()],
            records: Vec::new(),
        };
        let result = chunk_dataset(data, DEFAULT_CHUNK_SIZE).unwrap();
        assert!(result.chunks.is_empty());
        assert_eq!(result.metadata.chunks, 0);
        assert_eq!(result.metadata.total_letters, 0);
        assert!(result.metadata.fields.is_empty());
    }
}
