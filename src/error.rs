//! 错误类型 (Error types)

/// 人流计数系统的错误
///
/// 配置错误在启动时致命; 日志写入错误立即终止逐帧处理。
/// 空帧或缺少类别标签的检测不是错误。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 区域多边形无效 (顶点少于3个或面积为零)
    #[error("invalid zone polygon: {0}")]
    InvalidZone(String),

    /// 入场距离阈值无效 (负数或非有限值)
    #[error("invalid entry distance threshold: {0}")]
    InvalidThreshold(f64),

    /// 配置文件无法解析
    #[error("config error in {path}: {reason}")]
    Config { path: String, reason: String },

    /// 检测流中的某一行无法解析
    #[error("detection stream line {line}: {reason}")]
    Input { line: usize, reason: String },

    /// 指标日志内容无效
    #[error("metrics log {path}: {reason}")]
    Log { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
