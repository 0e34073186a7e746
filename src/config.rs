//! Session configuration.
//!
//! Loaded from YAML (`.yaml`/`.yml`) or JSON (`.json`); every field has a
//! default, so an empty file is a valid config:
//!
//! ```yaml
//! threshold: 200.0
//! hysteresis: 0.0
//! scale_mode: fill
//! joints: { hip: 24, knee: 26, ankle: 28 }
//! surface: { width: 1080, height: 1920 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::{RepCounter, DEFAULT_THRESHOLD};
use crate::error::PoseCountError;
use crate::geometry::ScaleMode;
use crate::pose::{Dimensions, LandmarkIndex};

/// Vertical offset of the angle label above the knee, in surface pixels.
pub const DEFAULT_TEXT_OFFSET: f64 = 20.0;

/// The three landmarks whose middle angle is counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub hip: LandmarkIndex,
    pub knee: LandmarkIndex,
    pub ankle: LandmarkIndex,
}

impl JointTriple {
    pub const LEFT_LEG: Self = Self {
        hip: LandmarkIndex::LEFT_HIP,
        knee: LandmarkIndex::LEFT_KNEE,
        ankle: LandmarkIndex::LEFT_ANKLE,
    };

    pub const RIGHT_LEG: Self = Self {
        hip: LandmarkIndex::RIGHT_HIP,
        knee: LandmarkIndex::RIGHT_KNEE,
        ankle: LandmarkIndex::RIGHT_ANKLE,
    };

    /// Indices in hip, knee, ankle order.
    pub fn indices(&self) -> [LandmarkIndex; 3] {
        [self.hip, self.knee, self.ankle]
    }
}

impl Default for JointTriple {
    fn default() -> Self {
        Self::LEFT_LEG
    }
}

/// Everything that stays constant for one tracking session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Knee-angle threshold in degrees separating squatting from standing.
    pub threshold: f64,

    /// Half-width of the dead band around `threshold`, in degrees.
    pub hysteresis: f64,

    /// Explicit scale policy; when unset it follows the recording's
    /// running mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<ScaleMode>,

    pub joints: JointTriple,

    /// Drawing surface; when unset each frame is drawn at its image size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<Dimensions>,

    /// Distance the angle label is lifted above the knee point.
    pub text_offset: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            hysteresis: 0.0,
            scale_mode: None,
            joints: JointTriple::default(),
            surface: None,
            text_offset: DEFAULT_TEXT_OFFSET,
        }
    }
}

impl SessionConfig {
    /// Loads a config file, choosing the parser by extension.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the extension is not
    /// recognised, the content does not parse, or the values are unusable.
    pub fn load(path: &Path) -> Result<Self, PoseCountError> {
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config: SessionConfig = match ext.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| PoseCountError::ConfigParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| PoseCountError::ConfigParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            _ => {
                return Err(PoseCountError::UnsupportedFormat(format!(
                    "config '{}' (supported extensions: .yaml, .yml, .json)",
                    path.display()
                )))
            }
        };

        config.check().map_err(|message| PoseCountError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config)
    }

    /// Rejects values the counter cannot work with.
    pub fn check(&self) -> Result<(), String> {
        if !self.threshold.is_finite() {
            return Err(format!("threshold must be finite, got {}", self.threshold));
        }
        if !self.hysteresis.is_finite() || self.hysteresis < 0.0 {
            return Err(format!(
                "hysteresis must be a non-negative number, got {}",
                self.hysteresis
            ));
        }
        if !self.text_offset.is_finite() {
            return Err(format!("text_offset must be finite, got {}", self.text_offset));
        }
        Ok(())
    }

    /// A fresh counter configured with this session's threshold and margin.
    pub fn build_counter(&self) -> RepCounter {
        RepCounter::new(self.threshold).with_hysteresis(self.hysteresis)
    }
}
