/// 人流计数数据结构定义
/// Data structures for zone occupancy counting
use serde::{Deserialize, Serialize};

// ========== 公共常量 ==========

/// 行人类别标签 (COCO)
pub const PERSON_LABEL: &str = "person";

// ========== 数据结构 ==========

/// 检测框 (Detection bounding box, 图像像素坐标)
///
/// JSON 中以 `[x1, y1, x2, y2]` 数组表示
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// 获取中心点 (整数除法向零截断)
    pub fn centroid(&self) -> Centroid {
        let cx = (self.x1 as i64 + self.x2 as i64) / 2;
        let cy = (self.y1 as i64 + self.y2 as i64) / 2;
        Centroid::new(cx as i32, cy as i32)
    }
}

impl From<[i32; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BBox> for [i32; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// 中心点 (检测框的位置代理)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 平方欧氏距离 (避免开方, i128 覆盖整个 i32 坐标范围)
    pub fn distance_sq(&self, other: &Centroid) -> i128 {
        let dx = self.x as i128 - other.x as i128;
        let dy = self.y as i128 - other.y as i128;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Centroid {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 单个检测结果 (检测模型输出)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// 类别标签, 缺失时视为非行人
    #[serde(default)]
    pub class_label: Option<String>,
    pub bbox: BBox,
    #[serde(default)]
    pub confidence: f32,
}

impl Detection {
    pub fn new(class_label: impl Into<String>, bbox: BBox, confidence: f32) -> Self {
        Self {
            class_label: Some(class_label.into()),
            bbox,
            confidence,
        }
    }

    /// 行人检测的快捷构造
    pub fn person(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(PERSON_LABEL, BBox::new(x1, y1, x2, y2), 1.0)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.class_label.as_deref() == Some(label)
    }
}

/// 单帧检测 (检测源 → 计数流水线)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    /// 视频流时间戳 (秒)
    pub timestamp_sec: f64,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl FrameDetections {
    pub fn new(timestamp_sec: f64, detections: Vec<Detection>) -> Self {
        Self {
            timestamp_sec,
            detections,
        }
    }

    pub fn empty(timestamp_sec: f64) -> Self {
        Self::new(timestamp_sec, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_is_bbox_midpoint() {
        let bbox = BBox::new(100, 50, 201, 151);
        assert_eq!(bbox.centroid(), Centroid::new(150, 100));
    }

    #[test]
    fn test_centroid_truncates_toward_zero() {
        // (-3 + 0) / 2 = -1.5 → -1
        let bbox = BBox::new(-3, -3, 0, 0);
        assert_eq!(bbox.centroid(), Centroid::new(-1, -1));
    }

    #[test]
    fn test_distance_sq() {
        let a = Centroid::new(100, 100);
        let b = Centroid::new(105, 103);
        assert_eq!(a.distance_sq(&b), 34);
        assert_eq!(b.distance_sq(&a), 34);
    }

    #[test]
    fn test_distance_sq_extreme_coordinates() {
        let a = Centroid::new(i32::MIN, i32::MIN);
        let b = Centroid::new(i32::MAX, i32::MAX);
        let d = (i32::MAX as i128) - (i32::MIN as i128);
        assert_eq!(a.distance_sq(&b), 2 * d * d);
    }

    #[test]
    fn test_parse_frame_json() {
        let json = r#"{"timestamp_sec": 0.04, "detections": [
            {"class_label": "person", "bbox": [10, 20, 30, 40], "confidence": 0.9},
            {"bbox": [0, 0, 5, 5], "confidence": 0.3}
        ]}"#;
        let frame: FrameDetections = serde_json::from_str(json).unwrap();
        assert_eq!(frame.detections.len(), 2);
        assert!(frame.detections[0].has_label(PERSON_LABEL));
        assert_eq!(frame.detections[0].bbox, BBox::new(10, 20, 30, 40));
        assert_eq!(frame.detections[1].class_label, None);
    }

    #[test]
    fn test_parse_frame_without_detections() {
        let frame: FrameDetections = serde_json::from_str(r#"{"timestamp_sec": 1.5}"#).unwrap();
        assert_eq!(frame, FrameDetections::empty(1.5));
    }
}
