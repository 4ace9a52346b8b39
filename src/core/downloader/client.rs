use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::registry::{FileRecord, RegistryApi};

/// Size of the intermediate copy buffer.
pub const COPY_BUFFER_SIZE: usize = 8192;

/// A file that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Streams registry artifacts to disk through a fixed-size buffer.
pub struct Downloader {
    buffer_size: usize,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            buffer_size: COPY_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, n: usize) -> Self {
        self.buffer_size = n.max(1);
        self
    }

    /// Download `file` into `dest_dir/<filename>`, replacing whatever is there.
    ///
    /// The byte stream is opened before the destination is touched, so a
    /// failed request leaves the directory as it was. A failure halfway
    /// through the copy leaves the partial file in place.
    pub async fn download_file(
        &self,
        registry: &dyn RegistryApi,
        file: &FileRecord,
        dest_dir: &Path,
    ) -> InstallerResult<DownloadedFile> {
        let mut stream = registry.fetch_file_bytes(&file.url).await?;

        let dest = dest_dir.join(&file.filename);
        let io_err = |source| InstallerError::Io {
            path: dest.clone(),
            source,
        };

        let mut out = tokio::fs::File::create(&dest).await.map_err(io_err)?;

        let copied: InstallerResult<u64> = async {
            let mut buffer = vec![0u8; self.buffer_size];
            let mut written: u64 = 0;

            loop {
                let n = stream
                    .read(&mut buffer)
                    .await
                    .map_err(|source| InstallerError::Stream {
                        url: file.url.clone(),
                        source,
                    })?;
                if n == 0 {
                    break;
                }
                out.write_all(&buffer[..n]).await.map_err(io_err)?;
                written += n as u64;
            }

            Ok(written)
        }
        .await;

        // Flush on every exit path so no write is still in flight once the
        // handle is dropped
        let flushed = out.flush().await.map_err(io_err);
        drop(out);

        let bytes_written = copied?;
        flushed?;

        debug!("Downloaded: {} -> {:?} ({} bytes)", file.url, dest, bytes_written);
        Ok(DownloadedFile {
            path: dest,
            bytes_written,
        })
    }
}
