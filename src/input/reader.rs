//! 检测流读取 (Detection stream reader)
//!
//! 检测模型的输出以 JSON Lines 提供, 每行一帧:
//! `{"timestamp_sec": 0.04, "detections": [{"class_label": "person", "bbox": [x1, y1, x2, y2], "confidence": 0.87}]}`

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info};

use crate::detection::FrameDetections;
use crate::error::{Error, Result};

/// 默认通道容量 (帧)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 120;

/// 逐行解析检测流, 空行跳过
///
/// 遇到无法解析的行时产出一个错误并结束
pub struct DetectionReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
    done: bool,
}

impl DetectionReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> DetectionReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }

    fn fail(&mut self, reason: String) -> Option<Result<FrameDetections>> {
        self.done = true;
        Some(Err(Error::Input {
            line: self.line_no,
            reason,
        }))
    }
}

impl<R: BufRead> Iterator for DetectionReader<R> {
    type Item = Result<FrameDetections>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.line_no += 1;
                    return self.fail(e.to_string());
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }
            return match serde_json::from_str::<FrameDetections>(&line) {
                Ok(frame) => Some(Ok(frame)),
                Err(e) => self.fail(e.to_string()),
            };
        }
    }
}

/// 启动读取线程 (读取线程 → 处理线程)
///
/// 通道为 FIFO, 帧的交付顺序与文件顺序一致
pub fn spawn_reader(
    path: impl AsRef<Path>,
    capacity: usize,
) -> Result<(Receiver<Result<FrameDetections>>, JoinHandle<()>)> {
    let path = path.as_ref();
    let reader = DetectionReader::open(path)?;
    let name = path.display().to_string();
    let (tx, rx) = bounded::<Result<FrameDetections>>(capacity.max(1));

    let handle = std::thread::Builder::new()
        .name("detection-reader".to_string())
        .spawn(move || {
            info!("📥 读取线程启动: {}", name);
            let mut frames = 0u64;
            for item in reader {
                let failed = item.is_err();
                if tx.send(item).is_err() {
                    debug!("处理线程已退出, 停止读取");
                    break;
                }
                if failed {
                    break;
                }
                frames += 1;
            }
            info!("📥 读取线程结束: {} 帧", frames);
        })?;

    Ok((rx, handle))
}
