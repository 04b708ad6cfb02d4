/// 指标记录系统 (Frame metrics)
///
/// - MetricsLog:  逐帧追加写入 CSV 日志
/// - read_log:    读回日志
/// - dashboard:   日志汇总统计 (仪表盘数据)
pub mod dashboard;
pub mod recorder;

pub use dashboard::DashboardSummary;
pub use recorder::{read_log, MetricsLog, SyncWrite};

/// 日志表头 (字段名与顺序为仪表盘契约, 不可修改)
pub const LOG_HEADER: [&str; 5] = [
    "frame_index",
    "timestamp_sec",
    "people_total",
    "people_in_zone",
    "entries_total",
];

/// 单帧指标记录, 写入后不可修改
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    /// 帧序号 (从1开始)
    pub frame_index: u64,
    pub timestamp_sec: f64,
    pub people_total: u32,
    pub people_in_zone: u32,
    /// 累计入场数
    pub entries_total: u64,
}

impl FrameRecord {
    /// CSV 行 (时间戳保留3位小数)
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.3},{},{},{}",
            self.frame_index,
            self.timestamp_sec,
            self.people_total,
            self.people_in_zone,
            self.entries_total
        )
    }

    /// 解析 CSV 行
    pub fn from_csv_row(row: &str) -> Result<Self, String> {
        let fields: Vec<&str> = row.trim().split(',').collect();
        if fields.len() != LOG_HEADER.len() {
            return Err(format!(
                "expected {} fields, got {}",
                LOG_HEADER.len(),
                fields.len()
            ));
        }

        fn field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
            value
                .trim()
                .parse()
                .map_err(|_| format!("bad {name}: {value:?}"))
        }

        Ok(Self {
            frame_index: field(LOG_HEADER[0], fields[0])?,
            timestamp_sec: field(LOG_HEADER[1], fields[1])?,
            people_total: field(LOG_HEADER[2], fields[2])?,
            people_in_zone: field(LOG_HEADER[3], fields[3])?,
            entries_total: field(LOG_HEADER[4], fields[4])?,
        })
    }
}

/// 表头行
pub fn header_row() -> String {
    LOG_HEADER.join(",")
}
