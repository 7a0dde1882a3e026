//! Frame sources feeding the session loop.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use yoga_models::{JointSet, NormalizedLandmark};

use crate::error::{SessionError, SessionResult};

/// Supplies the joints detected in each frame.
pub trait FrameSource: Send {
    /// Next frame's joints.
    ///
    /// `Ok(None)` ends the stream. An empty set means no body was detected.
    /// Errors are per-frame; the caller may keep reading.
    fn next_frame(&mut self) -> SessionResult<Option<JointSet>>;
}

/// One recorded frame of detector output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Landmarks in detector order; empty when no body was found
    #[serde(default)]
    pub landmarks: Vec<NormalizedLandmark>,
}

/// Replays detector output stored as JSON lines, one [`RecordedFrame`] per
/// line. Blank lines are skipped.
pub struct RecordedFrameSource<R = BufReader<File>> {
    lines: Lines<R>,
    line: usize,
    frame_width: u32,
    frame_height: u32,
}

impl RecordedFrameSource {
    pub fn open(path: impl AsRef<Path>, frame_width: u32, frame_height: u32) -> SessionResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SessionError::frame_source(format!("cannot open {}: {}", path.display(), e))
        })?;
        debug!("Replaying frames from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file), frame_width, frame_height))
    }
}

impl<R: BufRead> RecordedFrameSource<R> {
    pub fn from_reader(reader: R, frame_width: u32, frame_height: u32) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            frame_width,
            frame_height,
        }
    }
}

impl<R: BufRead + Send> FrameSource for RecordedFrameSource<R> {
    fn next_frame(&mut self) -> SessionResult<Option<JointSet>> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let frame: RecordedFrame =
                serde_json::from_str(&line).map_err(|source| SessionError::InvalidFrame {
                    line: self.line,
                    source,
                })?;
            return Ok(Some(JointSet::from_normalized(
                &frame.landmarks,
                self.frame_width,
                self.frame_height,
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use yoga_models::JointId;

    #[test]
    fn test_reads_frames_in_order() {
        let data = concat!(
            r#"{"landmarks":[{"x":0.5,"y":0.5,"visibility":0.9}]}"#,
            "\n\n",
            r#"{"landmarks":[]}"#,
            "\n",
        );
        let mut source = RecordedFrameSource::from_reader(Cursor::new(data), 640, 480);

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.get(JointId::Nose).map(|j| (j.x, j.y)), Some((320, 240)));

        let second = source.next_frame().unwrap().unwrap();
        assert!(second.is_empty());

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_invalid_line_is_reported_and_skipped() {
        let data = "not json\n{\"landmarks\":[]}\n";
        let mut source = RecordedFrameSource::from_reader(Cursor::new(data), 640, 480);

        let err = source.next_frame().unwrap_err();
        assert!(matches!(err, SessionError::InvalidFrame { line: 1, .. }));
        assert!(source.next_frame().unwrap().is_some());
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"landmarks":[{{"x":0.1,"y":0.2}}]}}"#).unwrap();

        let mut source = RecordedFrameSource::open(file.path(), 100, 100).unwrap();
        let joints = source.next_frame().unwrap().unwrap();
        assert_eq!(joints.get(JointId::Nose).map(|j| j.visibility), Some(1.0));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordedFrameSource::open("/definitely/not/here.jsonl", 640, 480);
        assert!(matches!(result, Err(SessionError::FrameSource(_))));
    }
}
