/// 每条通知附带的来源标识，供接收端区分
pub const NOTIFY_SOURCE_TAG: &str = "camera_drowsiness";

/// 默认接收端地址
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8085";

/// 同类通知的默认去重窗口（秒），与困倦心跳间隔一致
pub const DEFAULT_NOTIFY_COOLDOWN_SECS: f64 = 0.5;

/// `-` 表示从标准输入读取帧
pub const STDIN_FRAME_SOURCE: &str = "-";

pub const DEFAULT_DETECTORS: &str = "drowsiness,stretch";

pub const DETECTOR_DROWSINESS: &str = "drowsiness";
pub const DETECTOR_STRETCH: &str = "stretch";
