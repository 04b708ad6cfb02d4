// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
pub mod config; // 计数器配置参数
pub mod detection; // 区域判定与入场计数
pub mod error; // 错误类型
pub mod input; // 检测流输入
pub mod metrics; // 指标日志与仪表盘汇总
pub mod pipeline; // 逐帧计数流水线

pub use crate::config::CounterConfig;
pub use crate::detection::{
    BBox, Centroid, Detection, EntryThreshold, FootfallTracker, FrameDetections, FrameOccupancy,
    OccupancyClassifier, Zone,
};
pub use crate::error::{Error, Result};
pub use crate::metrics::{DashboardSummary, FrameRecord, MetricsLog};
pub use crate::pipeline::{process_frame, CounterState, FrameCounter, RunStats};
