pub mod client;

pub use client::{DownloadedFile, Downloader, COPY_BUFFER_SIZE};
