use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::File as TokioFile;
use tokio::io::{AsyncWriteExt, BufWriter as TokioBufWriter};
use tracing::debug;

use crate::error::Result;

/// Streams records into a JSON array file, one element per line.
pub struct JsonWriter {
    writer: TokioBufWriter<TokioFile>,
    path: PathBuf,
    count: usize,
}

impl JsonWriter {
    /// Creates `dir/filename`, creating `dir` first if needed.
    pub async fn create(dir: impl AsRef<Path>, filename: &str) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(filename);
        let file = TokioFile::create(&path).await?;
        let mut writer = TokioBufWriter::new(file);
        writer.write_all(b"[\n").await?;

        debug!(path = %path.display(), "Opened JSON export");

        Ok(Self {
            writer,
            path,
            count: 0,
        })
    }

    pub async fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        if self.count > 0 {
            self.writer.write_all(b",\n").await?;
        }

        let json = serde_json::to_vec(record)?;
        self.writer.write_all(&json).await?;
        self.count += 1;

        Ok(())
    }

    /// Closes the array and flushes. Returns the number of records written.
    pub async fn finish(mut self) -> Result<usize> {
        self.writer.write_all(b"\n]\n").await?;
        self.writer.flush().await?;
        debug!(path = %self.path.display(), records = self.count, "Closed JSON export");
        Ok(self.count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductRecord, ProductType, SYNTHETIC_SOURCE};

    #[tokio::test]
    async fn writes_a_readable_array() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let records = vec![
            ProductRecord::new("Krug 2008", "Krug", ProductType::Wine, 320.0, SYNTHETIC_SOURCE),
            ProductRecord::new("XO", "Hennessy", ProductType::Spirits, 150.0, SYNTHETIC_SOURCE),
        ];

        let mut writer = JsonWriter::create(&nested, "catalog.json").await.unwrap();
        for record in &records {
            writer.write_record(record).await.unwrap();
        }
        let path = writer.path().to_path_buf();
        assert_eq!(writer.finish().await.unwrap(), 2);

        let text = tokio::fs::read_to_string(path).await.unwrap();
        let back: Vec<ProductRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }

    #[tokio::test]
    async fn empty_export_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonWriter::create(dir.path(), "empty.json").await.unwrap();
        let path = writer.path().to_path_buf();
        assert_eq!(writer.finish().await.unwrap(), 0);

        let text = tokio::fs::read_to_string(path).await.unwrap();
        let back: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert!(back.is_empty());
    }
}
