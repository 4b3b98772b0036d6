use posture_signals::{EyeContour, Keypoint, PoseFrame};
use serde_json::{json, Value};

/// Eye contour 30 px wide whose EAR is exactly `ear`.
pub fn eye_with_ear(ear: f64) -> EyeContour {
    let half = ear * 30.0 / 2.0;
    EyeContour::from([
        [0.0, 0.0],
        [10.0, -half],
        [20.0, -half],
        [30.0, 0.0],
        [20.0, half],
        [10.0, half],
    ])
}

pub fn overhead_pose() -> PoseFrame {
    let joint = |x, y| Keypoint::with_visibility(x, y, 0.95);
    PoseFrame {
        nose: joint(320.0, 200.0),
        left_shoulder: joint(380.0, 300.0),
        left_elbow: joint(384.0, 200.0),
        left_wrist: joint(388.0, 100.0),
        right_shoulder: joint(260.0, 300.0),
        right_elbow: joint(256.0, 200.0),
        right_wrist: joint(252.0, 100.0),
    }
}

pub fn relaxed_pose() -> PoseFrame {
    let joint = |x, y| Keypoint::with_visibility(x, y, 0.95);
    PoseFrame {
        left_elbow: joint(390.0, 400.0),
        left_wrist: joint(395.0, 500.0),
        right_elbow: joint(250.0, 400.0),
        right_wrist: joint(245.0, 500.0),
        ..overhead_pose()
    }
}

fn contour_json(contour: &EyeContour) -> Value {
    let pairs: [[f64; 2]; 6] = (*contour).into();
    json!(pairs)
}

fn pose_json(pose: &PoseFrame) -> Value {
    serde_json::to_value(pose).expect("pose json")
}

/// One NDJSON line as written by the upstream landmark extractor.
pub fn frame_line(timestamp: f64, ear: Option<f64>, pose: Option<&PoseFrame>) -> String {
    let mut frame = json!({ "timestamp": timestamp });
    if let Some(ear) = ear {
        let eye = contour_json(&eye_with_ear(ear));
        frame["faces"] = json!([{ "left": eye, "right": eye }]);
    }
    if let Some(pose) = pose {
        frame["pose"] = pose_json(pose);
    }
    frame.to_string()
}

/// `[0.40]×5, [0.20]×48, [0.40]×1`
pub fn drowsy_episode_ears() -> Vec<f64> {
    let mut ears = vec![0.40; 5];
    ears.extend([0.20; 48]);
    ears.push(0.40);
    ears
}
