//! # 光谱计算模块
//!
//! ## 子模块
//! - `units`: 单位换算
//! - `bands`: 高斯谱带表
//! - `synthesizer`: 合成光谱曲线
//! - `axis`: 共享坐标范围与刻度
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `models/`

pub mod axis;
pub mod bands;
pub mod synthesizer;
pub mod units;

pub use axis::{compute_range_and_ticks, nice_ticks};
pub use synthesizer::{synthesize, SpectrumSynthesizer};
