//! Streamed HTTP downloads.
//!
//! The SDK download is the one point in the pipeline where the orchestrator
//! waits on the network: bytes are streamed straight into the destination
//! file and the caller does not proceed until the file handle is closed. On
//! any failure the partial file is removed before the error propagates.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use crate::error::PipelineError;

/// Download `url` to `dest`, replacing any existing file. A partial file
/// left by a mid-stream failure is removed before the error is returned.
pub fn download_file(url: &Url, dest: &Path) -> Result<()> {
    tracing::info!("downloading {} to {}", url, dest.display());

    let result = stream_to_file(url, dest);
    if result.is_err() {
        let _ = std::fs::remove_file(dest);
    }
    result
}

fn stream_to_file(url: &Url, dest: &Path) -> Result<()> {
    let response = reqwest::blocking::get(url.clone()).map_err(|e| PipelineError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(PipelineError::Network {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        }
        .into());
    }

    let pb = progress_bar(response.content_length());
    let mut reader = pb.wrap_read(response);

    let mut file = File::create(dest)
        .with_context(|| format!("failed to create file: {}", dest.display()))?;

    io::copy(&mut reader, &mut file).map_err(|e| PipelineError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    file.sync_all()
        .with_context(|| format!("failed to flush file: {}", dest.display()))?;
    pb.finish_and_clear();

    Ok(())
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} downloading [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    }
}
