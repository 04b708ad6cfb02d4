//! 单帧区域占用分类 (Frame occupancy classifier)

use super::types::{Centroid, Detection, PERSON_LABEL};
use super::zone::Zone;

/// 单帧分类结果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOccupancy {
    /// 所有行人检测数 (不论是否在区域内)
    pub people_total: u32,
    /// 中心点落在区域内的行人数
    pub people_in_zone: u32,
    /// 区域内中心点, 保持检测顺序 (交给入场计数器)
    pub in_zone: Vec<Centroid>,
}

/// 区域占用分类器
#[derive(Clone, Debug)]
pub struct OccupancyClassifier {
    zone: Zone,
    person_label: String,
    min_confidence: f32,
}

impl OccupancyClassifier {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            person_label: PERSON_LABEL.to_string(),
            min_confidence: 0.0,
        }
    }

    /// 设置行人类别标签
    pub fn with_person_label(mut self, label: impl Into<String>) -> Self {
        self.person_label = label.into();
        self
    }

    /// 低于该置信度的检测在分类前丢弃
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    fn is_person(&self, det: &Detection) -> bool {
        det.has_label(&self.person_label) && det.confidence >= self.min_confidence
    }

    /// 分类一帧检测
    pub fn classify(&self, detections: &[Detection]) -> FrameOccupancy {
        let mut occupancy = FrameOccupancy::default();

        for det in detections.iter().filter(|d| self.is_person(d)) {
            occupancy.people_total += 1;

            let center = det.bbox.centroid();
            if self.zone.contains(center) {
                occupancy.people_in_zone += 1;
                occupancy.in_zone.push(center);
            }
        }
        occupancy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::types::BBox;

    fn classifier() -> OccupancyClassifier {
        let zone = Zone::new(vec![[0, 0], [200, 0], [200, 200], [0, 200]]).unwrap();
        OccupancyClassifier::new(zone)
    }

    #[test]
    fn test_empty_frame() {
        let occ = classifier().classify(&[]);
        assert_eq!(occ, FrameOccupancy::default());
    }

    #[test]
    fn test_partition_in_and_out() {
        let dets = vec![
            Detection::person(90, 90, 110, 110),   // (100,100) 内
            Detection::person(290, 290, 310, 310), // (300,300) 外
            Detection::person(40, 10, 60, 30),     // (50,20) 内
        ];
        let occ = classifier().classify(&dets);
        assert_eq!(occ.people_total, 3);
        assert_eq!(occ.people_in_zone, 2);
        assert_eq!(
            occ.in_zone,
            vec![Centroid::new(100, 100), Centroid::new(50, 20)]
        );
    }

    #[test]
    fn test_non_person_ignored() {
        let dets = vec![
            Detection::new("car", BBox::new(90, 90, 110, 110), 0.9),
            Detection {
                class_label: None,
                bbox: BBox::new(90, 90, 110, 110),
                confidence: 0.9,
            },
        ];
        let occ = classifier().classify(&dets);
        assert_eq!(occ.people_total, 0);
        assert_eq!(occ.people_in_zone, 0);
        assert!(occ.in_zone.is_empty());
    }

    #[test]
    fn test_centroid_on_edge_counts_in_zone() {
        // 中心点 (200, 100) 正好在右边界上
        let occ = classifier().classify(&[Detection::person(190, 90, 210, 110)]);
        assert_eq!(occ.people_in_zone, 1);
    }

    #[test]
    fn test_min_confidence_filter() {
        let dets = vec![
            Detection::new(PERSON_LABEL, BBox::new(90, 90, 110, 110), 0.2),
            Detection::new(PERSON_LABEL, BBox::new(40, 40, 60, 60), 0.8),
        ];
        let occ = classifier().with_min_confidence(0.5).classify(&dets);
        assert_eq!(occ.people_total, 1);
        assert_eq!(occ.in_zone, vec![Centroid::new(50, 50)]);
    }

    #[test]
    fn test_custom_label() {
        let dets = vec![Detection::new("pedestrian", BBox::new(90, 90, 110, 110), 0.9)];
        let occ = classifier().with_person_label("pedestrian").classify(&dets);
        assert_eq!(occ.people_total, 1);
    }
}
