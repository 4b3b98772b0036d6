/// 状态机对外发出的离散事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// 闭眼持续达到阈值（首次触发或心跳重发）
    Sleepy,
    /// 困倦告警解除
    Awake,
    /// 双臂伸展持续达到阈值
    Stretching,
}

impl Event {
    pub const ALL: [Event; 3] = [Event::Sleepy, Event::Awake, Event::Stretching];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleepy => "sleepy",
            Self::Awake => "awake",
            Self::Stretching => "stretching",
        }
    }

    /// 接收端的路径，始终以 `/` 开头
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Sleepy => "/camera_sleepy",
            Self::Awake => "/camera_awake",
            Self::Stretching => "/camera_stretching",
        }
    }

    /// 互为进出的一对事件
    pub fn counterpart(self) -> Option<Event> {
        match self {
            Self::Sleepy => Some(Self::Awake),
            Self::Awake => Some(Self::Sleepy),
            Self::Stretching => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
