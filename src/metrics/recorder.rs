//! 指标日志 (Frame metrics recorder)
//!
//! 只追加, 单写者。每条记录写入后立即 flush 并同步到磁盘,
//! 进程中途退出时日志仍是完整日志的有效前缀。

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::{header_row, FrameRecord};
use crate::error::{Error, Result};

/// 可同步到持久存储的写入目标
pub trait SyncWrite: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl SyncWrite for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

/// 内存缓冲 (测试与回放比较用)
impl SyncWrite for Vec<u8> {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 逐帧指标日志
pub struct MetricsLog<W: SyncWrite> {
    writer: BufWriter<W>,
    name: String,
    records: u64,
}

impl MetricsLog<File> {
    /// 创建日志文件 (每次运行覆盖) 并写入表头
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::with_name(file, path.display().to_string())
    }
}

impl<W: SyncWrite> MetricsLog<W> {
    /// 包装任意写入目标并写入表头
    pub fn new(inner: W) -> Result<Self> {
        Self::with_name(inner, "<memory>".to_string())
    }

    fn with_name(inner: W, name: String) -> Result<Self> {
        let mut log = Self {
            writer: BufWriter::new(inner),
            name,
            records: 0,
        };
        log.write_line(&header_row())?;
        debug!("📝 指标日志已创建: {}", log.name);
        Ok(log)
    }

    /// 已写入记录数
    pub fn records(&self) -> u64 {
        self.records
    }

    /// 追加一条记录
    ///
    /// 帧序号必须紧接上一条 (从1开始), 否则拒绝写入
    pub fn append(&mut self, record: &FrameRecord) -> Result<()> {
        let expected = self.records + 1;
        if record.frame_index != expected {
            return Err(Error::Log {
                path: self.name.clone(),
                reason: format!(
                    "out of order record: expected frame {}, got {}",
                    expected, record.frame_index
                ),
            });
        }

        self.write_line(&record.to_csv_row())?;
        self.records = expected;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        self.writer.get_mut().sync()?;
        Ok(())
    }

    /// 关闭日志, 返回底层写入目标
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        debug!("📝 指标日志已关闭: {} ({} 条记录)", self.name, self.records);
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

/// 读取完整日志
///
/// 日志不存在时报错; 只有表头 (或文件为空) 时返回空列表
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<FrameRecord>> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::Log {
            path: name.clone(),
            reason: "not found, run the people counter first".to_string(),
        },
        _ => Error::Io(e),
    })?;
    parse_log(BufReader::new(file), &name)
}

/// 从任意输入解析日志
pub fn parse_log(reader: impl BufRead, name: &str) -> Result<Vec<FrameRecord>> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => {
            warn!("⚠️  指标日志为空: {}", name);
            return Ok(Vec::new());
        }
    };
    if header.trim() != header_row() {
        return Err(Error::Log {
            path: name.to_string(),
            reason: format!("unexpected header {:?}", header.trim()),
        });
    }

    let mut records = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = FrameRecord::from_csv_row(&line).map_err(|reason| Error::Log {
            path: name.to_string(),
            reason: format!("line {}: {}", i + 2, reason),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame_index: u64, entries_total: u64) -> FrameRecord {
        FrameRecord {
            frame_index,
            timestamp_sec: frame_index as f64 * 0.04,
            people_total: 2,
            people_in_zone: 1,
            entries_total,
        }
    }

    #[test]
    fn test_header_written_first() {
        let log = MetricsLog::new(Vec::new()).unwrap();
        let bytes = log.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "frame_index,timestamp_sec,people_total,people_in_zone,entries_total\n"
        );
    }

    #[test]
    fn test_append_in_order() {
        let mut log = MetricsLog::new(Vec::new()).unwrap();
        log.append(&record(1, 1)).unwrap();
        log.append(&record(2, 1)).unwrap();
        assert_eq!(log.records(), 2);

        let text = String::from_utf8(log.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "1,0.040,2,1,1");
        assert_eq!(lines[2], "2,0.080,2,1,1");
    }

    #[test]
    fn test_rejects_skipped_frame() {
        let mut log = MetricsLog::new(Vec::new()).unwrap();
        log.append(&record(1, 0)).unwrap();
        assert!(matches!(log.append(&record(3, 0)), Err(Error::Log { .. })));
        assert!(matches!(log.append(&record(1, 0)), Err(Error::Log { .. })));
        assert_eq!(log.records(), 1);
    }

    #[test]
    fn test_parse_roundtrip() {
        let mut log = MetricsLog::new(Vec::new()).unwrap();
        for i in 1..=3 {
            log.append(&record(i, i)).unwrap();
        }
        let bytes = log.finish().unwrap();
        let records = parse_log(bytes.as_slice(), "mem").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].entries_total, 3);
    }

    #[test]
    fn test_parse_header_only() {
        let text = format!("{}\n", header_row());
        assert!(parse_log(text.as_bytes(), "mem").unwrap().is_empty());
        assert!(parse_log(&b""[..], "mem").unwrap().is_empty());
    }

    #[test]
    fn test_parse_wrong_header() {
        let text = "frame,ts,total,zone,entries\n1,0.0,0,0,0\n";
        assert!(matches!(
            parse_log(text.as_bytes(), "mem"),
            Err(Error::Log { .. })
        ));
    }

    #[test]
    fn test_read_missing_log() {
        let err = read_log("/nonexistent/people_log.csv").unwrap_err();
        assert!(matches!(err, Error::Log { .. }));
    }
}
