//! # 数据模型模块
//!
//! 定义绘图参数、输入源、光谱曲线和坐标轴规划。
//!
//! ## 依赖关系
//! - 被 `config/`, `spectrum/`, `chart/`, `commands/` 使用
//! - 子模块: params, curve

pub mod curve;
pub mod params;

pub use curve::{AxisPlan, Curve};
pub use params::{InputSource, OutputFormat, ParameterRecord, SpectralUnit, SpectrumMode};
