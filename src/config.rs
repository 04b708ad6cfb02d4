//! 计数器配置 - 通过JSON文件调整参数

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::detection::{
    EntryThreshold, FootfallTracker, OccupancyClassifier, Zone, DEFAULT_ENTRY_DISTANCE,
    PERSON_LABEL,
};
use crate::error::{Error, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "counter_config.json";

/// 默认日志路径
pub const DEFAULT_LOG_PATH: &str = "people_log.csv";

/// 计数器参数配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    // === 区域参数 ===
    pub aoi_polygon: Vec<[i32; 2]>, // 兴趣区域顶点 (顺时针或逆时针)

    // === 入场计数参数 ===
    pub entry_distance_threshold: f64, // 同一人判定距离 (像素)

    // === 检测过滤 ===
    pub person_label: String, // 行人类别标签
    pub min_confidence: f32,  // 最低置信度

    // === 输出 ===
    pub log_path: String, // CSV 日志路径
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            // 走廊楔形区域
            aoi_polygon: vec![[481, 134], [576, 134], [600, 468], [187, 466]],

            entry_distance_threshold: DEFAULT_ENTRY_DISTANCE,

            person_label: PERSON_LABEL.to_string(),
            min_confidence: 0.0,

            log_path: DEFAULT_LOG_PATH.to_string(),
        }
    }
}

impl CounterConfig {
    /// 从JSON文件加载配置
    ///
    /// 文件不存在时写入默认配置; 文件存在但无法解析时报错
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("📝 配置文件不存在,创建默认配置...");
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("✅ 配置已从 {} 加载", path.display());
        Ok(config)
    }

    /// 保存配置到JSON文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("💾 配置已保存到 {}", path.display());
        Ok(())
    }

    /// 命令行参数覆盖文件配置 (None 表示保留文件中的值)
    ///
    /// 覆盖只作用于本次运行, 不写回配置文件
    pub fn apply_overrides(&mut self, log_path: Option<&Path>, threshold: Option<f64>) {
        if let Some(log_path) = log_path {
            self.log_path = log_path.display().to_string();
        }
        if let Some(threshold) = threshold {
            self.entry_distance_threshold = threshold;
        }
    }

    /// 构建区域 (校验多边形)
    pub fn zone(&self) -> Result<Zone> {
        Zone::new(self.aoi_polygon.clone())
    }

    /// 构建入场阈值 (校验取值)
    pub fn threshold(&self) -> Result<EntryThreshold> {
        EntryThreshold::new(self.entry_distance_threshold)
    }

    /// 校验配置并构建分类器与计数器
    pub fn build(&self) -> Result<(OccupancyClassifier, FootfallTracker)> {
        let classifier = OccupancyClassifier::new(self.zone()?)
            .with_person_label(self.person_label.clone())
            .with_min_confidence(self.min_confidence);
        let tracker = FootfallTracker::new(self.threshold()?);
        Ok((classifier, tracker))
    }

    /// 打印当前配置
    pub fn log_summary(&self) {
        info!("🎛️  当前计数器配置:");
        info!("  区域顶点: {:?}", self.aoi_polygon);
        info!("  入场距离阈值: {:.1}px", self.entry_distance_threshold);
        info!("  行人标签: {}", self.person_label);
        info!("  最低置信度: {:.2}", self.min_confidence);
        info!("  日志文件: {}", self.log_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CounterConfig::default();
        assert_eq!(config.aoi_polygon.len(), 4);
        assert_eq!(config.entry_distance_threshold, 50.0);
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CounterConfig =
            serde_json::from_str(r#"{"entry_distance_threshold": 30.0}"#).unwrap();
        assert_eq!(config.entry_distance_threshold, 30.0);
        assert_eq!(config.log_path, DEFAULT_LOG_PATH);
        assert_eq!(config.person_label, PERSON_LABEL);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config: CounterConfig = serde_json::from_str(
            r#"{"entry_distance_threshold": 30.0, "log_path": "from_file.csv"}"#,
        )
        .unwrap();

        config.apply_overrides(None, None);
        assert_eq!(config.entry_distance_threshold, 30.0);
        assert_eq!(config.log_path, "from_file.csv");

        config.apply_overrides(Some(Path::new("/tmp/override.csv")), Some(12.5));
        assert_eq!(config.entry_distance_threshold, 12.5);
        assert_eq!(config.log_path, "/tmp/override.csv");
        assert_eq!(config.person_label, PERSON_LABEL);
    }

    #[test]
    fn test_invalid_override_rejected_at_build() {
        let mut config = CounterConfig::default();
        config.apply_overrides(None, Some(f64::NAN));
        assert!(matches!(config.build(), Err(Error::InvalidThreshold(_))));
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        let config = CounterConfig {
            aoi_polygon: vec![[0, 0], [10, 0]],
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(Error::InvalidZone(_))));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = CounterConfig {
            entry_distance_threshold: -5.0,
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(Error::InvalidThreshold(_))));
    }
}
