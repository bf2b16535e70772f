use thiserror::Error;

use crate::tags::Frame;

/// Main error type for the clip-partition library
#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("No path from frame {from} to frame {to} in the segment graph")]
    Unreachable { from: Frame, to: Frame },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed tags, frame ranges or weights, rejected before any computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Frame count must be greater than zero")]
    NoFrames,

    #[error("Empty interval for '{label}': start {start} is not before end {end}")]
    EmptyInterval { label: String, start: Frame, end: Frame },

    #[error("Interval for '{label}' [{start}, {end}) exceeds frame count {no_frames}")]
    OutOfRange {
        label: String,
        start: Frame,
        end: Frame,
        no_frames: Frame,
    },

    #[error("Frame index {index} for '{label}' exceeds frame count {no_frames}")]
    InvalidFrameIndex {
        label: String,
        index: Frame,
        no_frames: Frame,
    },

    #[error("Invalid weight for '{label}': {weight}")]
    InvalidWeight { label: String, weight: f64 },

    #[error("Invalid cut penalty: {penalty}")]
    InvalidPenalty { penalty: f64 },

    #[error("Skip costs overflow: total tag weight {total_weight} over {no_frames} frames")]
    CostOverflow { total_weight: f64, no_frames: Frame },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse file: {path} ({reason})")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PartitionError
pub type Result<T> = std::result::Result<T, PartitionError>;

impl PartitionError {
    /// Whether the caller supplied bad data (as opposed to an internal defect)
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Config(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("File '{}' not found. Please check the path.", path)
            }
            Self::InvalidInput(InputError::OutOfRange { label, no_frames, .. }) => {
                format!(
                    "Tag '{}' extends past the end of the video ({} frames). Check the frame count.",
                    label, no_frames
                )
            }
            Self::Unreachable { .. } => {
                format!("{}. This is a bug in clip-partition, please report it.", self)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_classified() {
        let err: PartitionError = InputError::NoFrames.into();
        assert!(err.is_input_error());

        let err = PartitionError::Unreachable { from: 0, to: 10 };
        assert!(!err.is_input_error());
        assert!(err.user_message().contains("bug"));
    }

    #[test]
    fn test_out_of_range_message_names_label() {
        let err: PartitionError = InputError::OutOfRange {
            label: "cat".to_string(),
            start: 3,
            end: 12,
            no_frames: 10,
        }
        .into();
        assert!(err.to_string().contains("[3, 12)"));
        assert!(err.user_message().contains("'cat'"));
    }
}
