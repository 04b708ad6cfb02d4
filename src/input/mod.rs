/// 检测输入系统 (Detection input)
///
/// 独立读取线程, 负责解析检测模型输出并按帧顺序交给计数流水线
/// - DetectionReader: JSON Lines 逐帧解析
/// - spawn_reader:    读取线程 + 有界通道
pub mod reader;

pub use reader::{spawn_reader, DetectionReader, DEFAULT_CHANNEL_CAPACITY};
