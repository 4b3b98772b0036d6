//! 双臂伸展姿态判定
//!
//! 判定条件（全部满足才算伸展）：
//! 1. 双侧肩、肘、腕可见度均不低于阈值，否则直接判否
//! 2. 双臂肘关节夹角大于 150°（手臂伸直）
//! 3. 双腕高于各自肩部（图像坐标 y 更小）
//! 4. 双腕高于鼻子（高举过头）

use crate::keypoint::{Keypoint, PoseFrame};

/// 关节可见度阈值
pub const MIN_JOINT_VISIBILITY: f64 = 0.5;

/// 肘关节伸直阈值（度）
pub const MIN_STRAIGHT_ARM_DEGREES: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchCriteria {
    pub min_visibility: f64,
    pub min_elbow_angle: f64,
}

impl Default for StretchCriteria {
    fn default() -> Self {
        Self {
            min_visibility: MIN_JOINT_VISIBILITY,
            min_elbow_angle: MIN_STRAIGHT_ARM_DEGREES,
        }
    }
}

/// 以 `vertex` 为顶点，`a`→`vertex` 与 `c`→`vertex` 两向量的夹角，范围 [0, 180]
pub fn joint_angle(a: &Keypoint, vertex: &Keypoint, c: &Keypoint) -> f64 {
    let radians =
        (c.y - vertex.y).atan2(c.x - vertex.x) - (a.y - vertex.y).atan2(a.x - vertex.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// 使用默认阈值判定
pub fn is_arms_stretched(pose: &PoseFrame) -> bool {
    StretchCriteria::default().classify(pose)
}

impl StretchCriteria {
    pub fn classify(&self, pose: &PoseFrame) -> bool {
        let arms = pose.arms();

        // 可见度不足时不做判断（fail-closed）
        let all_visible = arms.iter().all(|(shoulder, elbow, wrist)| {
            [shoulder, elbow, wrist]
                .iter()
                .all(|joint| joint.visibility_or_full() >= self.min_visibility)
        });
        if !all_visible {
            return false;
        }

        let is_straight = arms.iter().all(|(shoulder, elbow, wrist)| {
            joint_angle(shoulder, elbow, wrist) > self.min_elbow_angle
        });

        let is_elevated = arms.iter().all(|(shoulder, _, wrist)| wrist.y < shoulder.y);

        let is_high_stretch = arms.iter().all(|(_, _, wrist)| wrist.y < pose.nose.y);

        is_straight && is_elevated && is_high_stretch
    }
}
