//! 关键点数据结构
//!
//! 坐标系为图像坐标：原点在左上角，y 轴向下增长。

use serde::{Deserialize, Serialize};

/// 二维关键点，可带可见度置信度 (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Keypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: None,
        }
    }

    pub fn with_visibility(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            visibility: Some(visibility),
        }
    }

    pub fn distance(&self, other: &Keypoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// 缺失的关节：可见度为 0，必然无法通过可见度检查
    pub fn missing() -> Self {
        Self::with_visibility(0.0, 0.0, 0.0)
    }

    /// 未提供可见度时视为完全可见
    pub fn visibility_or_full(&self) -> f64 {
        self.visibility.unwrap_or(1.0)
    }
}

/// 眼部轮廓，固定 6 个点
///
/// 顺序约定：
/// - p0, p3: 左右眼角
/// - p1, p2: 上眼睑
/// - p4, p5: 下眼睑（p5 与 p1 配对，p4 与 p2 配对）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 6]", into = "[[f64; 2]; 6]")]
pub struct EyeContour(pub [Keypoint; 6]);

impl EyeContour {
    pub fn point(&self, idx: usize) -> &Keypoint {
        &self.0[idx]
    }
}

impl From<[[f64; 2]; 6]> for EyeContour {
    fn from(raw: [[f64; 2]; 6]) -> Self {
        Self(raw.map(|[x, y]| Keypoint::new(x, y)))
    }
}

impl From<EyeContour> for [[f64; 2]; 6] {
    fn from(contour: EyeContour) -> Self {
        contour.0.map(|p| [p.x, p.y])
    }
}

/// 单人身体姿态：伸展判定所需的七个关节
///
/// 缺失的关节以 [`Keypoint::missing`] 补齐。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoseFrame {
    pub nose: Keypoint,
    pub left_shoulder: Keypoint,
    pub left_elbow: Keypoint,
    pub left_wrist: Keypoint,
    pub right_shoulder: Keypoint,
    pub right_elbow: Keypoint,
    pub right_wrist: Keypoint,
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self {
            nose: Keypoint::missing(),
            left_shoulder: Keypoint::missing(),
            left_elbow: Keypoint::missing(),
            left_wrist: Keypoint::missing(),
            right_shoulder: Keypoint::missing(),
            right_elbow: Keypoint::missing(),
            right_wrist: Keypoint::missing(),
        }
    }
}

impl PoseFrame {
    /// 左右臂的 (肩, 肘, 腕)
    pub fn arms(&self) -> [(&Keypoint, &Keypoint, &Keypoint); 2] {
        [
            (&self.left_shoulder, &self.left_elbow, &self.left_wrist),
            (&self.right_shoulder, &self.right_elbow, &self.right_wrist),
        ]
    }
}
