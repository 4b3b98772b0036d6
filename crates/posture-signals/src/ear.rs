//! EAR (Eye Aspect Ratio) 计算模块
//!
//! 标准6点公式: EAR = (|p1-p5| + |p2-p4|) / (2 * |p0-p3|)
//! 睁眼时 EAR 约 0.25 - 0.35，闭眼时下降到 0.15 左右。

use crate::error::SignalError;
use crate::keypoint::EyeContour;

/// 水平跨度低于此值视为退化轮廓
pub const MIN_EYE_WIDTH: f64 = 1e-6;

/// 计算单眼 EAR
///
/// 眼角距离接近 0 时返回 `DegenerateGeometry`，调用方应跳过该眼，
/// 而不是把 NaN/Infinity 传入状态机。
pub fn eye_aspect_ratio(eye: &EyeContour) -> Result<f64, SignalError> {
    let horizontal = eye.point(0).distance(eye.point(3));
    if !horizontal.is_finite() || horizontal < MIN_EYE_WIDTH {
        return Err(SignalError::DegenerateGeometry { width: horizontal });
    }

    let vertical1 = eye.point(1).distance(eye.point(5));
    let vertical2 = eye.point(2).distance(eye.point(4));

    Ok((vertical1 + vertical2) / (2.0 * horizontal))
}

/// 双眼联合 EAR：对非退化的眼取平均
///
/// 只有一只眼可用时直接使用该眼；两只都退化时返回左眼的错误。
pub fn mean_eye_aspect_ratio(left: &EyeContour, right: &EyeContour) -> Result<f64, SignalError> {
    match (eye_aspect_ratio(left), eye_aspect_ratio(right)) {
        (Ok(l), Ok(r)) => Ok((l + r) / 2.0),
        (Ok(l), Err(_)) => Ok(l),
        (Err(_), Ok(r)) => Ok(r),
        (Err(e), Err(_)) => Err(e),
    }
}
