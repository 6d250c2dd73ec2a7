//! # 光谱合成器
//!
//! 根据绘图参数和输入源序号生成一条合成光谱。
//!
//! ## 算法概述
//! 1. 从 `x_start` 以 `interval` 步进到 `x_end`（含端点，容差 1e-8）
//! 2. 按输入源序号计算峰位平移 `index · 20` 与强度因子 `1 - index · 0.15`（下限 0）
//! 3. 在每个 x 上累加 (mode, unit) 对应的高斯谱带
//! 4. 按 mode 和 unit 设置坐标轴标题
//!
//! 不读取输入文件内容：序号只用于产生确定性的逐源差异。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `spectrum/bands.rs` 的谱带表
//! - 使用 `models/` 的 ParameterRecord, Curve

use crate::error::{PlotspecError, Result};
use crate::models::{Curve, ParameterRecord};
use crate::spectrum::bands;

/// 端点包含容差
const ENDPOINT_TOLERANCE: f64 = 1e-8;

/// 单条曲线允许的最大点数
const MAX_GRID_POINTS: usize = 10_000_000;

/// 相邻输入源之间的峰位平移（nm 基准）
const SHIFT_PER_SOURCE: f64 = 20.0;

/// 相邻输入源之间的强度衰减
const INTENSITY_STEP: f64 = 0.15;

/// 光谱合成器
pub struct SpectrumSynthesizer<'a> {
    params: &'a ParameterRecord,
}

impl<'a> SpectrumSynthesizer<'a> {
    pub fn new(params: &'a ParameterRecord) -> Self {
        Self { params }
    }

    /// 为第 `source_index` 个输入源合成光谱
    pub fn synthesize(&self, source_index: usize) -> Result<Curve> {
        let params = self.params;

        let bands = bands::band_model(params.mode, params.unit).ok_or_else(|| {
            PlotspecError::UnsupportedCombination {
                mode: params.mode.to_string(),
                unit: params.unit.to_string(),
            }
        })?;

        let x_values = generate_x_grid(params.x_start, params.x_end, params.interval)?;

        let shift = bands::scale_shift(source_index as f64 * SHIFT_PER_SOURCE, params.unit);
        let factor = intensity_factor(source_index);

        let y_values = x_values
            .iter()
            .map(|&x| bands.iter().map(|b| b.evaluate(x, shift, factor)).sum())
            .collect();

        Ok(Curve {
            x_values,
            y_values,
            x_label: params.unit.axis_label().to_string(),
            y_label: params.mode.y_label().to_string(),
            title: params.mode.title().to_string(),
        })
    }
}

/// 便捷函数：`SpectrumSynthesizer::new(params).synthesize(index)`
pub fn synthesize(params: &ParameterRecord, source_index: usize) -> Result<Curve> {
    SpectrumSynthesizer::new(params).synthesize(source_index)
}

/// 第 `source_index` 个输入源的强度因子，截断到非负
pub fn intensity_factor(source_index: usize) -> f64 {
    (1.0 - source_index as f64 * INTENSITY_STEP).max(0.0)
}

/// 生成等间距横坐标网格
///
/// 每个点按 `start + i · interval` 计算，不累积舍入误差；
/// 最后一点满足 `end - interval < last <= end + 1e-8`。
pub fn generate_x_grid(start: f64, end: f64, interval: f64) -> Result<Vec<f64>> {
    if !(interval > 0.0) || !interval.is_finite() {
        return Err(PlotspecError::InvalidConfig(format!(
            "interval must be positive, got {}",
            interval
        )));
    }
    if !start.is_finite() || !end.is_finite() || start >= end {
        return Err(PlotspecError::InvalidConfig(format!(
            "x range must satisfy x_start < x_end, got {} - {}",
            start, end
        )));
    }

    let steps = ((end - start) / interval).floor();
    if !steps.is_finite() || steps >= MAX_GRID_POINTS as f64 {
        return Err(PlotspecError::InvalidConfig(format!(
            "interval {} gives more than {} points over {} - {}",
            interval, MAX_GRID_POINTS, start, end
        )));
    }

    let last = steps as usize + 1;
    let mut values = Vec::with_capacity(last + 1);
    for i in 0..=last {
        let x = start + i as f64 * interval;
        if x > end + ENDPOINT_TOLERANCE {
            break;
        }
        values.push(x);
    }
    Ok(values)
}
