//! 入场计数器 (Footfall tracker)
//!
//! 仅保存上一帧区域内的中心点与累计入场数, 不做身份追踪。

use super::types::Centroid;
use crate::error::{Error, Result};

/// 默认入场距离阈值 (像素)
pub const DEFAULT_ENTRY_DISTANCE: f64 = 50.0;

/// 入场距离阈值 T
///
/// 当前帧中心点与上一帧任一中心点的距离小于 T 时视为同一人
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryThreshold {
    pixels: f64,
    pixels_sq: f64,
}

impl EntryThreshold {
    pub fn new(pixels: f64) -> Result<Self> {
        if !pixels.is_finite() || pixels < 0.0 {
            return Err(Error::InvalidThreshold(pixels));
        }
        Ok(Self {
            pixels,
            pixels_sq: pixels * pixels,
        })
    }

    pub fn pixels(&self) -> f64 {
        self.pixels
    }

    /// 平方距离严格小于 T² 时匹配
    pub fn matches(&self, a: &Centroid, b: &Centroid) -> bool {
        (a.distance_sq(b) as f64) < self.pixels_sq
    }
}

impl Default for EntryThreshold {
    fn default() -> Self {
        Self {
            pixels: DEFAULT_ENTRY_DISTANCE,
            pixels_sq: DEFAULT_ENTRY_DISTANCE * DEFAULT_ENTRY_DISTANCE,
        }
    }
}

/// 入场计数状态
///
/// 每帧调用一次 [`FootfallTracker::update`], 按帧顺序调用。
/// 匹配策略是贪心的首个命中: 上一帧的一个点可以覆盖当前帧的多个点,
/// 不做最近邻或一对一匹配。
/// 在边界附近来回抖动的检测会被重复计为入场。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FootfallTracker {
    threshold: EntryThreshold,
    /// 上一帧区域内中心点
    previous: Vec<Centroid>,
    /// 累计入场数 (单调不减)
    entries_total: u64,
}

impl FootfallTracker {
    pub fn new(threshold: EntryThreshold) -> Self {
        Self {
            threshold,
            previous: Vec::new(),
            entries_total: 0,
        }
    }

    pub fn threshold(&self) -> EntryThreshold {
        self.threshold
    }

    pub fn entries_total(&self) -> u64 {
        self.entries_total
    }

    pub fn previous(&self) -> &[Centroid] {
        &self.previous
    }

    /// 统计当前帧中的新入场数 (不修改状态)
    pub fn count_new(&self, current: &[Centroid]) -> u32 {
        current
            .iter()
            .filter(|c| !self.previous.iter().any(|p| self.threshold.matches(c, p)))
            .count() as u32
    }

    /// 更新计数器, 返回本帧新入场数
    ///
    /// 当前帧的点无条件替换上一帧的点 (包括空列表)
    pub fn update(&mut self, current: Vec<Centroid>) -> u32 {
        let new_entries = self.count_new(&current);
        self.entries_total += new_entries as u64;
        self.previous = current;
        new_entries
    }
}
