//! 仪表盘汇总 (Dashboard aggregator)

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_log, FrameRecord};
use crate::error::Result;

/// 日志汇总统计与时间序列
///
/// 空日志得到全零统计与空序列, 不报错
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// 记录行数
    pub frames: usize,
    /// 累计入场数 (最后一行)
    pub total_entries: u64,
    /// 区域内最大人数
    pub max_in_zone: u32,
    /// 区域内平均人数
    pub avg_in_zone: f64,
    /// 画面内最大人数
    pub max_total: u32,
    /// 时长 (最后一行时间戳, 秒)
    pub duration_sec: f64,

    // === 图表序列 ===
    /// 时间戳 (保留2位小数, 四舍六入五成双)
    pub timestamps: Vec<f64>,
    pub people_in_zone: Vec<u32>,
    pub people_total: Vec<u32>,
}

impl DashboardSummary {
    /// 按时间戳排序 (稳定排序) 后汇总
    pub fn from_records(records: &[FrameRecord]) -> Self {
        let mut sorted: Vec<&FrameRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.timestamp_sec.total_cmp(&b.timestamp_sec));

        let Some(last) = sorted.last() else {
            return Self::default();
        };

        let zone_sum: u64 = sorted.iter().map(|r| r.people_in_zone as u64).sum();

        Self {
            frames: sorted.len(),
            total_entries: last.entries_total,
            max_in_zone: sorted.iter().map(|r| r.people_in_zone).max().unwrap_or(0),
            avg_in_zone: zone_sum as f64 / sorted.len() as f64,
            max_total: sorted.iter().map(|r| r.people_total).max().unwrap_or(0),
            duration_sec: last.timestamp_sec,
            timestamps: sorted
                .iter()
                .map(|r| (r.timestamp_sec * 100.0).round_ties_even() / 100.0)
                .collect(),
            people_in_zone: sorted.iter().map(|r| r.people_in_zone).collect(),
            people_total: sorted.iter().map(|r| r.people_total).collect(),
        }
    }

    /// 读取日志文件并汇总
    pub fn from_log(path: impl AsRef<Path>) -> Result<Self> {
        let records = read_log(path)?;
        Ok(Self::from_records(&records))
    }
}
