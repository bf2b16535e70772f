use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// Frame index on the timeline
pub type Frame = u64;

/// A labeled, half-open span of frames `[start, end)`
///
/// Ordering is by `start`, then `end`, then `label`, which is the order every
/// downstream stage iterates tags in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagInterval {
    /// First frame the tag is active on
    pub start: Frame,

    /// First frame after the tag ends
    pub end: Frame,

    /// Label reported by the tagger (e.g. "cat", "person")
    pub label: String,
}

impl TagInterval {
    pub fn new<S: Into<String>>(label: S, start: Frame, end: Frame) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Number of frames covered
    pub fn len(&self) -> Frame {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether the tag is active anywhere in `[start, end)`
    pub fn overlaps(&self, start: Frame, end: Frame) -> bool {
        !(self.start >= end || self.end <= start)
    }

    /// Check the interval is non-empty and inside `[0, no_frames]`
    pub fn validate(&self, no_frames: Frame) -> Result<()> {
        if self.is_empty() {
            return Err(InputError::EmptyInterval {
                label: self.label.clone(),
                start: self.start,
                end: self.end,
            }
            .into());
        }

        if self.end > no_frames {
            return Err(InputError::OutOfRange {
                label: self.label.clone(),
                start: self.start,
                end: self.end,
                no_frames,
            }
            .into());
        }

        Ok(())
    }
}

/// Sorted, de-duplicated collection of tag intervals
///
/// Callers may build a `TagSet` from tags in any order; iteration is always in
/// [`TagInterval`] order, so every result computed from it is independent of
/// how the tags were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TagInterval>", into = "Vec<TagInterval>")]
pub struct TagSet {
    tags: Vec<TagInterval>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, keeping the set sorted. Identical tags are stored once.
    pub fn insert(&mut self, tag: TagInterval) -> bool {
        match self.tags.binary_search(&tag) {
            Ok(_) => false,
            Err(pos) => {
                self.tags.insert(pos, tag);
                true
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagInterval> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[TagInterval] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Distinct labels, sorted
    pub fn labels(&self) -> Vec<&str> {
        let labels: BTreeSet<&str> = self.tags.iter().map(|t| t.label.as_str()).collect();
        labels.into_iter().collect()
    }

    /// Validate every interval against the frame range
    pub fn validate(&self, no_frames: Frame) -> Result<()> {
        if no_frames == 0 {
            return Err(InputError::NoFrames.into());
        }

        self.tags.iter().try_for_each(|tag| tag.validate(no_frames))
    }

    /// Tags clipped to `[start, end)` and shifted so `start` becomes frame 0
    ///
    /// Tags that do not intersect the range are dropped.
    pub fn restrict(&self, start: Frame, end: Frame) -> TagSet {
        self.tags
            .iter()
            .filter(|tag| tag.overlaps(start, end))
            .map(|tag| {
                TagInterval::new(
                    tag.label.clone(),
                    tag.start.max(start) - start,
                    tag.end.min(end) - start,
                )
            })
            .collect()
    }

    /// Build intervals from per-frame annotations
    ///
    /// Each label maps to the frames it was detected on. Consecutive frames are
    /// merged into one `[first, last + 1)` interval per run.
    pub fn from_frame_indices<I, S, F>(annotations: I, no_frames: Frame) -> Result<TagSet>
    where
        I: IntoIterator<Item = (S, F)>,
        S: Into<String>,
        F: IntoIterator<Item = Frame>,
    {
        let mut set = TagSet::new();

        for (label, indices) in annotations {
            let label = label.into();
            let indices: BTreeSet<Frame> = indices.into_iter().collect();

            if let Some(&index) = indices.iter().find(|&&i| i >= no_frames) {
                return Err(InputError::InvalidFrameIndex {
                    label,
                    index,
                    no_frames,
                }
                .into());
            }

            let mut run: Option<(Frame, Frame)> = None;
            for index in indices {
                run = match run {
                    Some((first, next)) if next == index => Some((first, index + 1)),
                    Some((first, next)) => {
                        set.insert(TagInterval::new(label.clone(), first, next));
                        Some((index, index + 1))
                    }
                    None => Some((index, index + 1)),
                };
            }
            if let Some((first, next)) = run {
                set.insert(TagInterval::new(label, first, next));
            }
        }

        Ok(set)
    }
}

impl FromIterator<TagInterval> for TagSet {
    fn from_iter<I: IntoIterator<Item = TagInterval>>(iter: I) -> Self {
        let mut tags: Vec<TagInterval> = iter.into_iter().collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }
}

impl<S: Into<String>> FromIterator<(S, Frame, Frame)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (S, Frame, Frame)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(label, start, end)| TagInterval::new(label, start, end))
            .collect()
    }
}

impl From<Vec<TagInterval>> for TagSet {
    fn from(tags: Vec<TagInterval>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<TagInterval> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a TagInterval;
    type IntoIter = std::slice::Iter<'a, TagInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
