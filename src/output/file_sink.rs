//! File-backed record sink
//!
//! One file handle is held for the whole run behind an async mutex. The
//! guard is kept across the write and flush of a batch, so batches from
//! concurrent pipelines never interleave. A batch that fails partway is cut
//! back off the file before the guard is released.

use crate::output::traits::{OutputRecord, RecordSink, SinkError, SinkResult, HEADER};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

/// Append-only output file shared by all pipelines
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Creates (or truncates) the output file and writes the header line
    ///
    /// Runs before any pipeline starts; failure here aborts the run.
    pub async fn create(path: impl AsRef<Path>) -> SinkResult<Self> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        let mut file = File::create(&path).await.map_err(io_err)?;
        file.write_all(format!("{}\n", HEADER).as_bytes())
            .await
            .map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        tracing::debug!("Output sink ready at {}", path.display());

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    async fn append_batch(&self, records: &[OutputRecord]) -> SinkResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut block = String::new();
        for record in records {
            block.push_str(&record.to_string());
            block.push('\n');
        }

        let mut file = self.file.lock().await;
        let io_err = |source| SinkError::Io {
            path: self.path.clone(),
            source,
        };

        let start = file.stream_position().await.map_err(io_err)?;
        if let Err(source) = write_block(&mut file, block.as_bytes()).await {
            if let Err(e) = truncate_to(&mut file, start).await {
                tracing::error!(
                    "Failed to remove partial batch from {}: {}",
                    self.path.display(),
                    e
                );
            }
            return Err(io_err(source));
        }

        Ok(records.len())
    }
}

async fn write_block(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// Drops everything after `len` and moves the cursor back there
async fn truncate_to(file: &mut File, len: u64) -> std::io::Result<()> {
    file.set_len(len).await?;
    file.seek(SeekFrom::Start(len)).await?;
    Ok(())
}
