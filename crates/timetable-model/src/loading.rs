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

//! Time line loader for whitespace-delimited schedule files.
//!
//! A schedule file holds the start time followed by `steps delta` pairs, one
//! pair per segment, until the end of the input. Tokens may be spread over
//! lines freely and `#` starts a comment that runs to the end of the line:
//!
//! ```raw
//! # start time
//! 0.0
//! # steps  delta
//! 10       0.1    # ramp up
//! 4        0.3
//! 5        0.2
//! ```
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.
//! Segment validation errors point at the offending segment index.

use crate::{segment::SegmentError, timeline::TimeLine};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};
use timetable_core::num::scalar::TimeScalar;

/// The error type for the time line loading process.
#[derive(Debug, thiserror::Error)]
pub enum TimeLineLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before the start time or in the middle of a segment.
    #[error("Unexpected end of file while parsing time line")]
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseTokenError),
    /// A segment failed validation.
    #[error("Invalid segment {index}: {source}")]
    Segment {
        /// Zero-based position of the segment in the input.
        index: usize,
        /// The validation failure.
        #[source]
        source: SegmentError,
    },
    /// The input holds no segments and the loader does not allow that.
    #[error("Time line contains no segments")]
    Empty,
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

/// A configurable loader for schedule files.
///
/// # Configuration
/// * `allow_empty`: Accept files that contain only a start time. Default `true`.
/// * `skip_empty_segments`: Silently drop pairs with zero steps instead of
///   failing. Default `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLineLoader<T> {
    allow_empty: bool,
    skip_empty_segments: bool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for TimeLineLoader<T> {
    fn default() -> Self {
        Self {
            allow_empty: true,
            skip_empty_segments: false,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TimeLineLoader<T>
where
    T: TimeScalar + FromStr,
{
    /// Creates a new `TimeLineLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether a file without segments is accepted.
    #[inline]
    pub fn allow_empty(mut self, yes: bool) -> Self {
        self.allow_empty = yes;
        self
    }

    /// Configures whether `0 delta` pairs are skipped instead of rejected.
    #[inline]
    pub fn skip_empty_segments(mut self, yes: bool) -> Self {
        self.skip_empty_segments = yes;
        self
    }

    /// Loads a time line from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<TimeLine<T>, TimeLineLoaderError> {
        let mut sc = Scanner::new(rdr);

        let start: T = sc.next()?.ok_or(TimeLineLoaderError::UnexpectedEof)?;
        let mut line = TimeLine::new(start);

        let mut index = 0usize;
        while let Some(steps) = sc.next::<usize>()? {
            let delta: T = sc.next()?.ok_or(TimeLineLoaderError::UnexpectedEof)?;

            if steps == 0 && self.skip_empty_segments {
                tracing::trace!(index, "skipping empty segment");
                index += 1;
                continue;
            }

            line.try_push(steps, delta)
                .map_err(|source| TimeLineLoaderError::Segment { index, source })?;
            index += 1;
        }

        if line.is_empty() && !self.allow_empty {
            return Err(TimeLineLoaderError::Empty);
        }

        tracing::debug!(
            start = %line.start(),
            segments = line.num_segments(),
            steps = line.num_steps(),
            "loaded time line"
        );
        Ok(line)
    }

    /// Loads a time line from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<TimeLine<T>, TimeLineLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a time line from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<TimeLine<T>, TimeLineLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a time line from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<TimeLine<T>, TimeLineLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// A helper to read whitespace-delimited tokens from a generic reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the internal line buffer. Returns `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, TimeLineLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        Ok(n > 0)
    }

    /// Returns the next raw token, skipping whitespace and `#` comments.
    fn next_token(&mut self) -> Result<Option<&str>, TimeLineLoaderError> {
        loop {
            if self.pos >= self.buf.len() && !self.fill_line()? {
                return Ok(None);
            }

            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.pos = self.buf.len();
                continue;
            }

            let len = trimmed
                .find(|c: char| c.is_whitespace() || c == '#')
                .unwrap_or(trimmed.len());
            let begin = self.pos;
            self.pos += len;
            return Ok(Some(&self.buf[begin..begin + len]));
        }
    }

    /// Reads the next token and parses it into `U`. Returns `Ok(None)` at EOF.
    fn next<U>(&mut self) -> Result<Option<U>, TimeLineLoaderError>
    where
        U: FromStr,
    {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        token.parse::<U>().map(Some).map_err(|_| {
            TimeLineLoaderError::Parse(ParseTokenError {
                token: token.to_owned(),
                type_name: std::any::type_name::<U>(),
            })
        })
    }
}
