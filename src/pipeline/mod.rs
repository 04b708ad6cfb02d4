/// 逐帧计数流水线 (Frame counting pipeline)
///
/// 单线程, 按帧顺序处理: 检测 → 区域分类 → 入场计数 → 指标日志。
/// 一帧处理完成后才开始下一帧, 入场计数依赖相邻帧的顺序。
use tracing::{debug, info, warn};

use crate::detection::{Detection, FootfallTracker, FrameDetections, OccupancyClassifier};
use crate::error::Result;
use crate::metrics::{FrameRecord, MetricsLog, SyncWrite};

/// 每隔多少帧输出一次进度
const PROGRESS_INTERVAL: u64 = 500;

/// 跨帧计数状态 (由调用方创建并传入, 无全局状态)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CounterState {
    tracker: FootfallTracker,
    /// 已处理帧数 (下一帧序号 = frames + 1)
    frames: u64,
    last_new_entries: u32,
}

impl CounterState {
    pub fn new(tracker: FootfallTracker) -> Self {
        Self {
            tracker,
            frames: 0,
            last_new_entries: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn entries_total(&self) -> u64 {
        self.tracker.entries_total()
    }

    /// 最近一帧的新入场数
    pub fn last_new_entries(&self) -> u32 {
        self.last_new_entries
    }

    pub fn tracker(&self) -> &FootfallTracker {
        &self.tracker
    }
}

/// 处理一帧 (纯函数, 无 I/O)
///
/// 返回该帧的指标记录与新的计数状态
pub fn process_frame(
    classifier: &OccupancyClassifier,
    mut state: CounterState,
    detections: &[Detection],
    timestamp_sec: f64,
) -> (FrameRecord, CounterState) {
    let occupancy = classifier.classify(detections);
    let new_entries = state.tracker.update(occupancy.in_zone);

    state.frames += 1;
    state.last_new_entries = new_entries;

    let record = FrameRecord {
        frame_index: state.frames,
        timestamp_sec,
        people_total: occupancy.people_total,
        people_in_zone: occupancy.people_in_zone,
        entries_total: state.tracker.entries_total(),
    };
    (record, state)
}

/// 计数器: 分类器 + 计数状态
pub struct FrameCounter {
    classifier: OccupancyClassifier,
    state: CounterState,
}

impl FrameCounter {
    pub fn new(classifier: OccupancyClassifier, tracker: FootfallTracker) -> Self {
        Self {
            classifier,
            state: CounterState::new(tracker),
        }
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// 处理下一帧 (每帧只调用一次)
    pub fn process(&mut self, frame: &FrameDetections) -> FrameRecord {
        let state = std::mem::take(&mut self.state);
        let (record, state) =
            process_frame(&self.classifier, state, &frame.detections, frame.timestamp_sec);
        self.state = state;
        record
    }
}

/// 运行统计
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    pub frames: u64,
    pub entries_total: u64,
    pub max_in_zone: u32,
    pub max_total: u32,
}

/// 处理整个检测流并写入日志
///
/// 检测流或日志出错时立即停止, 已写入的记录保持有效
pub fn run<W, I>(counter: &mut FrameCounter, frames: I, log: &mut MetricsLog<W>) -> Result<RunStats>
where
    W: SyncWrite,
    I: IntoIterator<Item = Result<FrameDetections>>,
{
    let mut stats = RunStats::default();
    let mut last_ts = f64::NEG_INFINITY;

    for frame in frames {
        let frame = frame?;
        if frame.timestamp_sec < last_ts {
            warn!(
                "⚠️  时间戳倒退: {:.3}s < {:.3}s (帧 {})",
                frame.timestamp_sec,
                last_ts,
                counter.state().frames() + 1
            );
        }
        last_ts = frame.timestamp_sec;

        let record = counter.process(&frame);
        log.append(&record)?;

        debug!(
            frame = record.frame_index,
            ts = record.timestamp_sec,
            total = record.people_total,
            in_zone = record.people_in_zone,
            new = counter.state().last_new_entries(),
            entries = record.entries_total,
            "frame processed"
        );

        stats.frames = record.frame_index;
        stats.entries_total = record.entries_total;
        stats.max_in_zone = stats.max_in_zone.max(record.people_in_zone);
        stats.max_total = stats.max_total.max(record.people_total);

        if record.frame_index % PROGRESS_INTERVAL == 0 {
            info!(
                "⏱️  已处理 {} 帧 | 区域内 {} 人 | 累计入场 {}",
                record.frame_index, record.people_in_zone, record.entries_total
            );
        }
    }
    Ok(stats)
}
