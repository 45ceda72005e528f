use crate::domain::model::{Chunk, Metadata};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::messages;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use std::path::{Path, PathBuf};

/// Single-line JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Compact JSON array of the chunk's records. serde_json never escapes
/// non-ASCII, so "Kjære" stays literal UTF-8.
pub fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&chunk.records)?)
}

/// `{"total_letters": 1500, "chunks": 2, ...}` on one line.
pub fn encode_metadata(metadata: &Metadata) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut data, SpacedFormatter);
    metadata.serialize(&mut serializer)?;
    Ok(data)
}

/// Write every chunk under `output_dir`, creating it first. Returns the
/// written paths in chunk order. Stops at the first failure; earlier files
/// stay on disk.
pub async fn write_chunks<S: Storage>(
    storage: &S,
    output_dir: &Path,
    chunks: &[Chunk],
    locale: &str,
) -> Result<Vec<PathBuf>> {
    storage.create_dir_all(output_dir).await?;

    let mut written = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let path = output_dir.join(chunk.file_name());
        let data = encode_chunk(chunk)?;
        storage.write_file(&path, &data).await?;

        tracing::debug!("Chunk {} encoded to {} bytes", chunk.index, data.len());
        println!(
            "{}",
            messages::wrote_chunk(locale, &path.display().to_string(), chunk.len())
        );

        written.push(path);
    }

    Ok(written)
}

pub async fn write_metadata<S: Storage>(
    storage: &S,
    metadata_path: &Path,
    metadata: &Metadata,
) -> Result<()> {
    if let Some(parent) = metadata_path.parent() {
        if !parent.as_os_str().is_empty() {
            storage.create_dir_all(parent).await?;
        }
    }

    let data = encode_metadata(metadata)?;
    tracing::debug!(
        "Writing metadata ({} bytes) to {}",
        data.len(),
        metadata_path.display()
    );
    storage.write_file(metadata_path, &data).await
}
