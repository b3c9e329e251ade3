//! JSON configuration and report helpers for player extraction.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use player_blobs_core::{PlayerCandidate, PlayerSummary};
use serde::{Deserialize, Serialize};

use crate::{BlobExtractor, BlobExtractorParams, BlobLabels, ParamsError};

#[derive(thiserror::Error, Debug)]
pub enum ExtractIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid extractor params: {0}")]
    Params(#[from] ParamsError),
}

/// Configuration for one extraction run over a mask/image pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub mask_path: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub frame_index: u64,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: BlobExtractorParams,
}

impl ExtractConfig {
    /// Load a JSON config from disk and validate its params.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ExtractIoError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.params.validate()?;
        Ok(cfg)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExtractIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("player_blobs_report.json"))
    }

    pub fn build_extractor(&self) -> BlobExtractor {
        BlobExtractor::new(self.params.clone())
    }
}

/// Size of one labelled blob and whether it became a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobSizeEntry {
    pub label: i32,
    pub size: usize,
    pub kept: bool,
}

/// Result of one extraction run, without pixel data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractReport {
    #[serde(default)]
    pub mask_path: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    pub frame_index: u64,
    pub params: BlobExtractorParams,
    pub width: usize,
    pub height: usize,
    pub foreground_pixels: usize,
    pub blob_sizes: Vec<BlobSizeEntry>,
    pub players: Vec<PlayerSummary>,
}

impl ExtractReport {
    /// A blob counts as kept when one of `players` was built from it.
    pub fn new(cfg: &ExtractConfig, labels: &BlobLabels, players: &[PlayerCandidate]) -> Self {
        let kept: BTreeSet<i32> = players.iter().map(|p| p.blob_label).collect();
        let blob_sizes = labels
            .sizes()
            .iter()
            .map(|(&label, &size)| BlobSizeEntry {
                label,
                size,
                kept: kept.contains(&label),
            })
            .collect();
        Self {
            mask_path: cfg.mask_path.clone(),
            image_path: cfg.image_path.clone(),
            frame_index: cfg.frame_index,
            params: cfg.params.clone(),
            width: labels.width(),
            height: labels.height(),
            foreground_pixels: labels.foreground_pixels(),
            blob_sizes,
            players: players.iter().map(PlayerCandidate::summary).collect(),
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ExtractIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExtractIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
