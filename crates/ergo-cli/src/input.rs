//! Pose keypoint input files

use keypoints::RawFrame;
use serde::Deserialize;

/// One frame as written by the pose exporter
#[derive(Deserialize)]
#[serde(untagged)]
enum InputFrame {
    /// `{"keypoints": [[x, y], ...]}`
    Frame(RawFrame),
    /// `[[x, y], ...]`
    Keypoints(Vec<Vec<f64>>),
    /// `null` for a frame without a person
    Missing(Option<()>),
}

impl From<InputFrame> for RawFrame {
    fn from(frame: InputFrame) -> Self {
        match frame {
            InputFrame::Frame(frame) => frame,
            InputFrame::Keypoints(keypoints) => RawFrame { keypoints },
            InputFrame::Missing(_) => RawFrame::default(),
        }
    }
}

/// Parse a JSON array of frames
pub fn parse_frames(json: &str) -> Result<Vec<RawFrame>, serde_json::Error> {
    let frames: Vec<InputFrame> = serde_json::from_str(json)?;
    Ok(frames.into_iter().map(RawFrame::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_frames() {
        let frames = parse_frames(r#"[{"keypoints": [[1.0, 2.0], [3.0, 4.0]]}, {"keypoints": []}]"#)
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].keypoints, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(frames[1].keypoints.is_empty());
    }

    #[test]
    fn test_bare_keypoint_arrays() {
        let frames = parse_frames("[[[1, 2, 0.9], [3, 4, 0.8]], [], null]").unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].keypoints[1], vec![3.0, 4.0, 0.8]);
        assert!(frames[1].keypoints.is_empty());
        assert!(frames[2].keypoints.is_empty());
    }

    #[test]
    fn test_object_without_keypoints_is_empty() {
        let frames = parse_frames(r#"[{}]"#).unwrap();
        assert!(frames[0].keypoints.is_empty());
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse_frames(r#"{"keypoints": []}"#).is_err());
        assert!(parse_frames(r#"[["a", "b"]]"#).is_err());
    }
}
