// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Serde configuration layer for time lines.
//!
//! A configuration names the start time, the segments and optionally the
//! comparison tolerance a stepping cursor should use:
//!
//! ```toml
//! start = 0.0
//! epsilon = 1e-9
//!
//! [[segments]]
//! steps = 10
//! delta = 0.1
//!
//! [[segments]]
//! steps = 4
//! delta = 0.3
//! ```
//!
//! The same shape is accepted as JSON. Files are dispatched on their
//! extension (`.json` or `.toml`).

use crate::{segment::SegmentError, timeline::TimeLine};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use timetable_core::num::scalar::TimeScalar;

/// The error type for loading and validating configurations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The JSON document is malformed or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The TOML document is malformed or has the wrong shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),
    /// A configured segment failed validation.
    #[error("Invalid segment {index}: {source}")]
    Segment {
        /// Zero-based position of the segment in the configuration.
        index: usize,
        /// The validation failure.
        #[source]
        source: SegmentError,
    },
}

/// One configured run of equal steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig<T> {
    pub steps: usize,
    pub delta: T,
}

/// A serializable description of a time line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    deny_unknown_fields,
    bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize")
)]
pub struct TimeLineConfig<T> {
    /// The start instant.
    pub start: T,
    /// Segments in order; may be omitted for an empty line.
    #[serde(default)]
    pub segments: Vec<SegmentConfig<T>>,
    /// Comparison tolerance requested for stepping cursors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<T>,
}

impl<T> TimeLineConfig<T>
where
    T: TimeScalar + DeserializeOwned,
{
    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a configuration file, choosing the format from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "toml" => Self::from_toml_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(extension)),
        };

        tracing::debug!(
            path = %path.display(),
            segments = config.segments.len(),
            "read time line configuration"
        );
        Ok(config)
    }
}

impl<T> TimeLineConfig<T>
where
    T: TimeScalar,
{
    /// Validates the configuration into a `TimeLine`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::config::TimeLineConfig;
    ///
    /// let config = TimeLineConfig::<f64>::from_json_str(
    ///     r#"{ "start": 1.0, "segments": [{ "steps": 10, "delta": 0.1 }] }"#,
    /// ).unwrap();
    /// let line = config.to_timeline().unwrap();
    /// assert_eq!(line.num_steps(), 10);
    /// ```
    pub fn to_timeline(&self) -> Result<TimeLine<T>, ConfigError> {
        let mut line = TimeLine::with_capacity(self.start, self.segments.len());
        for (index, segment) in self.segments.iter().enumerate() {
            line.try_push(segment.steps, segment.delta)
                .map_err(|source| ConfigError::Segment { index, source })?;
        }
        Ok(line)
    }
}

impl<T> From<&TimeLine<T>> for TimeLineConfig<T>
where
    T: TimeScalar,
{
    fn from(line: &TimeLine<T>) -> Self {
        Self {
            start: line.start(),
            segments: line
                .segments()
                .iter()
                .map(|s| SegmentConfig {
                    steps: s.steps(),
                    delta: s.delta(),
                })
                .collect(),
            epsilon: None,
        }
    }
}

impl<T> TryFrom<&TimeLineConfig<T>> for TimeLine<T>
where
    T: TimeScalar,
{
    type Error = ConfigError;

    fn try_from(config: &TimeLineConfig<T>) -> Result<Self, Self::Error> {
        config.to_timeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_CONFIG: &str = r#"
        start = 1.0
        epsilon = 1e-9

        [[segments]]
        steps = 10
        delta = 0.1

        [[segments]]
        steps = 4
        delta = 0.3
    "#;

    #[test]
    fn test_toml_roundtrip_into_timeline() {
        let config = TimeLineConfig::<f64>::from_toml_str(TOML_CONFIG).unwrap();
        assert_eq!(config.start, 1.0);
        assert_eq!(config.epsilon, Some(1e-9));
        assert_eq!(config.segments.len(), 2);

        let line = config.to_timeline().unwrap();
        assert_eq!(line.num_steps(), 14);
        assert!((line.end() - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_json_integer_times() {
        let config = TimeLineConfig::<i64>::from_json_str(
            r#"{ "start": 5, "segments": [{ "steps": 3, "delta": 2 }] }"#,
        )
        .unwrap();
        assert_eq!(config.epsilon, None);
        assert_eq!(config.to_timeline().unwrap().end(), 11);
    }

    #[test]
    fn test_segments_default_to_empty() {
        let config = TimeLineConfig::<f64>::from_json_str(r#"{ "start": 2.0 }"#).unwrap();
        let line = TimeLine::try_from(&config).unwrap();
        assert!(line.is_empty());
        assert_eq!(line.start(), 2.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let res = TimeLineConfig::<f64>::from_json_str(r#"{ "start": 0.0, "stop": 1.0 }"#);
        assert!(matches!(res, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_invalid_segment_names_index() {
        let config = TimeLineConfig::<f64>::from_json_str(
            r#"{ "start": 0.0, "segments": [{ "steps": 1, "delta": 1.0 }, { "steps": 2, "delta": 0.0 }] }"#,
        )
        .unwrap();
        match config.to_timeline() {
            Err(ConfigError::Segment { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, SegmentError::NonPositiveDelta);
            }
            other => panic!("Expected segment error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_timeline_and_back() {
        let line = TimeLine::with_segments(0.5, [(2, 0.25), (1, 1.0)]).unwrap();
        let config = TimeLineConfig::from(&line);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("epsilon"));
        let parsed = TimeLineConfig::<f64>::from_json_str(&json).unwrap();
        assert_eq!(parsed.to_timeline().unwrap(), line);
    }

    fn load_json<T>(s: &str) -> Result<TimeLine<T>, ConfigError>
    where
        T: TimeScalar + DeserializeOwned,
    {
        TimeLineConfig::<T>::from_json_str(s)?.to_timeline()
    }

    fn render_json<T>(line: &TimeLine<T>) -> String
    where
        T: TimeScalar + Serialize,
    {
        serde_json::to_string(&TimeLineConfig::from(line)).unwrap()
    }

    #[test]
    fn test_generic_time_type_loads_and_renders() {
        let doc = r#"{ "start": 0, "segments": [{ "steps": 2, "delta": 3 }] }"#;
        let ints = load_json::<i64>(doc).unwrap();
        assert_eq!(ints.end(), 6);
        let floats = load_json::<f64>(doc).unwrap();
        assert_eq!(floats.end(), 6.0);

        let rendered = render_json(&ints);
        assert_eq!(load_json::<i64>(&rendered).unwrap(), ints);
    }

    #[test]
    fn test_overflowing_segment_names_index() {
        let res = load_json::<i32>(
            r#"{ "start": 0, "segments": [{ "steps": 1, "delta": 1 }, { "steps": 100000, "delta": 100000 }] }"#,
        );
        match res {
            Err(ConfigError::Segment { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, SegmentError::DurationOverflow);
            }
            other => panic!("Expected segment error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        toml_file.write_all(TOML_CONFIG.as_bytes()).unwrap();
        let config = TimeLineConfig::<f64>::from_path(toml_file.path()).unwrap();
        assert_eq!(config.segments.len(), 2);

        let mut json_file = tempfile::Builder::new().suffix(".JSON").tempfile().unwrap();
        json_file
            .write_all(br#"{ "start": 0.0, "segments": [] }"#)
            .unwrap();
        let config = TimeLineConfig::<f64>::from_path(json_file.path()).unwrap();
        assert!(config.segments.is_empty());
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"start: 0.0").unwrap();
        match TimeLineConfig::<f64>::from_path(file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }
}
