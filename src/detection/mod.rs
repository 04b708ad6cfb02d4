/// 区域计数系统 (Zone counting)
///
/// - Zone:                 区域判定 (点是否在多边形内)
/// - OccupancyClassifier:  单帧区域占用分类
/// - FootfallTracker:      跨帧入场计数
pub mod classifier;
pub mod tracker;
pub mod types;
pub mod zone;

pub use classifier::{FrameOccupancy, OccupancyClassifier};
pub use tracker::{EntryThreshold, FootfallTracker, DEFAULT_ENTRY_DISTANCE};
pub use types::{BBox, Centroid, Detection, FrameDetections, PERSON_LABEL};
pub use zone::Zone;
