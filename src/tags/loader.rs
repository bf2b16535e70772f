use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::tags::types::{Frame, TagInterval, TagSet};

/// Tag document as produced by an upstream tagger
///
/// Tags may be given as explicit intervals, as per-frame detections, or both:
///
/// ```toml
/// no_frames = 9
///
/// [[tags]]
/// label = "cat"
/// start = 3
/// end = 9
///
/// [frames]
/// dog = [5, 6, 7]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFile {
    /// Frame count of the video, if the tagger knows it
    #[serde(default)]
    pub no_frames: Option<Frame>,

    /// Explicit intervals
    #[serde(default)]
    pub tags: Vec<TagInterval>,

    /// Per-frame detections, label -> frame indices
    #[serde(default)]
    pub frames: BTreeMap<String, Vec<Frame>>,
}

impl TagFile {
    /// Merge both tag forms into one validated set
    pub fn tag_set(&self, no_frames: Frame) -> Result<TagSet> {
        let mut set = TagSet::from_frame_indices(
            self.frames.iter().map(|(label, frames)| (label.clone(), frames.iter().copied())),
            no_frames,
        )?;

        for tag in &self.tags {
            set.insert(tag.clone());
        }

        set.validate(no_frames)?;
        Ok(set)
    }
}

/// Loads tag documents from disk
pub struct TagLoader;

impl TagLoader {
    /// Read and parse a TOML tag document
    pub fn load<P: AsRef<Path>>(path: P) -> Result<TagFile> {
        let path = path.as_ref();
        tracing::debug!("Loading tags from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file = Self::parse(&content).map_err(|reason| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason,
        })?;

        tracing::debug!(
            "Loaded {} intervals and {} per-frame labels",
            file.tags.len(),
            file.frames.len()
        );
        Ok(file)
    }

    /// Parse a TOML tag document from a string
    pub fn parse(content: &str) -> std::result::Result<TagFile, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
