//! # 配置文件格式
//!
//! `spectrum_config.toml` 的原始内容，所有键均可省略：
//!
//! ```toml
//! mode = "abs"              # abs, emi, cd, cdl
//! unit = "nm"               # nm, eV, cm-1
//! x_start = 200
//! x_end = 1000
//! interval = 1.0            # 省略时按单位取默认值
//! fwhm_ev = 0.5
//! output_format = "svg"     # svg, png, jpg, jpeg, eps, pdf
//! output_filename = "spectrum"
//! legend_names = ["A", "B"]
//! ```
//!
//! ## 依赖关系
//! - 被 `config/mod.rs` 读取
//! - 被 `config/resolve.rs` 解析为 ParameterRecord
//! - 使用 `serde` + `toml`

use crate::error::{PlotspecError, Result};

use serde::Deserialize;
use std::path::Path;

/// 未经校验的配置内容
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub x_start: Option<f64>,
    #[serde(default)]
    pub x_end: Option<f64>,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub fwhm_ev: Option<f64>,
    #[serde(default)]
    pub output_format: Option<String>,
    #[serde(default)]
    pub output_filename: Option<String>,
    #[serde(default)]
    pub legend_names: Option<Vec<String>>,
}

impl RawConfig {
    /// 读取并解析配置文件
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PlotspecError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// 从字符串解析，`origin` 仅用于错误信息
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlotspecError::ConfigParse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// 用 `overlay` 中出现的键覆盖当前配置
    pub fn merge(self, overlay: RawConfig) -> RawConfig {
        RawConfig {
            mode: overlay.mode.or(self.mode),
            unit: overlay.unit.or(self.unit),
            x_start: overlay.x_start.or(self.x_start),
            x_end: overlay.x_end.or(self.x_end),
            interval: overlay.interval.or(self.interval),
            fwhm_ev: overlay.fwhm_ev.or(self.fwhm_ev),
            output_format: overlay.output_format.or(self.output_format),
            output_filename: overlay.output_filename.or(self.output_filename),
            legend_names: overlay.legend_names.or(self.legend_names),
        }
    }
}

/// 主配置和可选的个人覆盖配置
///
/// 个人覆盖在环境变量覆盖之后应用，因此其中出现的键优先于环境开关。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayers {
    pub main: RawConfig,
    pub user: Option<RawConfig>,
}

impl From<RawConfig> for ConfigLayers {
    fn from(main: RawConfig) -> Self {
        Self { main, user: None }
    }
}
