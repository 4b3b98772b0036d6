//! 姿态与闭眼信号检测核心库
//!
//! 将每帧的几何关键点转换为去抖动、限频的状态转换事件。
//! 本库只包含纯计算与状态机，不依赖异步运行时或网络。
//!
//! ## 模块
//! - `keypoint`: 关键点与眼部轮廓、身体姿态数据结构
//! - `ear`: EAR (Eye Aspect Ratio) 眼部纵横比计算
//! - `pose`: 双臂上举伸展姿态判定
//! - `drowsiness`: 困倦检测状态机（连续帧去抖 + 心跳重发）
//! - `stretch`: 伸展检测状态机（持续时间去抖）
//! - `event`: 对外发出的状态转换事件

pub mod drowsiness;
pub mod ear;
pub mod error;
pub mod event;
pub mod keypoint;
pub mod pose;
pub mod stretch;

// 重新导出核心类型，方便外部使用
pub use drowsiness::{DrowsinessConfig, DrowsinessState, DrowsinessStateMachine};
pub use ear::{eye_aspect_ratio, mean_eye_aspect_ratio};
pub use error::SignalError;
pub use event::Event;
pub use keypoint::{EyeContour, Keypoint, PoseFrame};
pub use pose::{is_arms_stretched, joint_angle};
pub use stretch::{StretchConfig, StretchState, StretchStateMachine};
