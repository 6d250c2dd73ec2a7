//! # 坐标轴范围与刻度
//!
//! 多条曲线共享同一 y 范围（带符号感知的 10% 留白），x/y 刻度按 1-2-5-10 规则取整。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 结果 `AxisPlan` 被 `chart/spec.rs` 使用

use crate::error::{PlotspecError, Result};
use crate::models::{AxisPlan, Curve, ParameterRecord};

/// 两个坐标轴的目标刻度数
pub const TARGET_TICKS: usize = 6;

/// y 范围留白比例
const PADDING_RATIO: f64 = 0.10;

/// 计算共享 y 范围和两轴刻度
pub fn compute_range_and_ticks(curves: &[Curve], params: &ParameterRecord) -> Result<AxisPlan> {
    let (overall_min, overall_max) = curves
        .iter()
        .filter_map(|c| Some((c.y_min()?, c.y_max()?)))
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
        .ok_or(PlotspecError::EmptyChart)?;

    let floor_at_zero = !params.mode.is_circular_dichroism() && overall_min >= 0.0;

    let (mut y_min, mut y_max) = padded_range(overall_min, overall_max, floor_at_zero);

    if !(y_max - y_min > 0.0) {
        // 常数曲线：围绕该值展开一个可绘制的范围
        let half = (overall_min.abs() * PADDING_RATIO).max(1.0);
        y_min = if floor_at_zero { 0.0 } else { overall_min - half };
        y_max = overall_max + half;
    }

    Ok(AxisPlan {
        x_min: params.x_start,
        x_max: params.x_end,
        y_min,
        y_max,
        x_ticks: nice_ticks(params.x_start, params.x_end, TARGET_TICKS),
        y_ticks: nice_ticks(y_min, y_max, TARGET_TICKS),
    })
}

/// 10% 留白；非 CD 且全部非负时下限固定为 0，上限留白仍相对原始跨度计算
fn padded_range(min: f64, max: f64, floor_at_zero: bool) -> (f64, f64) {
    let padding = (max - min) * PADDING_RATIO;
    if floor_at_zero {
        (0.0, max + padding)
    } else {
        (min - padding, max + padding)
    }
}

/// 按 1-2-5-10 规则生成"好看"的刻度
///
/// 首个刻度是不小于 `min` 的最小步长整数倍，之后按步长递增直到超过 `max + 0.1·step`。
/// `max == min`（或范围非有限）时只返回一个位于 `min` 的刻度。
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    let range = max - min;
    if target_count < 2 || !range.is_finite() || range <= 0.0 {
        return vec![min];
    }

    let step = nice_step(range / (target_count - 1) as f64);
    let first = (min / step).ceil() * step;
    let limit = max + step * 0.1;

    let mut ticks = Vec::new();
    let mut i = 0usize;
    loop {
        let mut tick = first + i as f64 * step;
        if tick > limit {
            break;
        }
        if tick.abs() < step * 1e-9 {
            tick = 0.0;
        }
        ticks.push(tick);
        i += 1;
    }
    ticks
}

/// 将粗略步长取整到 {1, 2, 5, 10}·10^k
pub fn nice_step(rough_step: f64) -> f64 {
    let magnitude = 10f64.powf(rough_step.log10().floor());
    let normalized = rough_step / magnitude;

    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputFormat, SpectralUnit, SpectrumMode};

    fn params(mode: SpectrumMode) -> ParameterRecord {
        ParameterRecord {
            mode,
            unit: SpectralUnit::Nanometer,
            x_start: 200.0,
            x_end: 1000.0,
            interval: 1.0,
            fwhm_cm: 4032.77,
            input_sources: vec![],
            legend_labels: vec![],
            output_format: OutputFormat::Svg,
            output_name: "spectrum_plot".to_string(),
            interactive: false,
        }
    }

    fn curve(ys: &[f64]) -> Curve {
        Curve {
            x_values: (0..ys.len()).map(|i| i as f64).collect(),
            y_values: ys.to_vec(),
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
        }
    }

    /// 步长是否为 {1,2,5}·10^k
    fn is_nice(step: f64) -> bool {
        let mag = 10f64.powf(step.log10().floor());
        let n = step / mag;
        [1.0, 2.0, 5.0, 10.0].iter().any(|f| (n - f).abs() < 1e-9)
    }

    #[test]
    fn test_nice_ticks_x_axis() {
        let ticks = nice_ticks(200.0, 1000.0, 6);
        // rough = 160 → step = 200
        assert_eq!(ticks, vec![200.0, 400.0, 600.0, 800.0, 1000.0]);
    }

    #[test]
    fn test_nice_ticks_properties() {
        let ranges = [
            (0.0, 16500.0),
            (-55.0, 55.0),
            (1.5, 6.0),
            (180.0, 400.0),
            (0.0, 0.99),
            (-0.003, 0.017),
            (400.0, 4000.0),
        ];
        for (min, max) in ranges {
            let ticks = nice_ticks(min, max, 6);
            assert!(ticks.len() >= 2, "range {}..{}", min, max);

            let step = ticks[1] - ticks[0];
            assert!(is_nice(step), "step {} not nice", step);
            for w in ticks.windows(2) {
                assert!(w[1] >= w[0]);
                assert!(((w[1] - w[0]) - step).abs() < step * 1e-6);
            }

            // 首个刻度是 >= min 的最小倍数
            assert!(ticks[0] >= min - step * 1e-9);
            assert!(ticks[0] - step < min);
            assert!(*ticks.last().unwrap() <= max + step * 0.1 + 1e-9);
        }
    }

    #[test]
    fn test_nice_ticks_degenerate() {
        assert_eq!(nice_ticks(3.0, 3.0, 6), vec![3.0]);
        assert_eq!(nice_ticks(0.0, 0.0, 6), vec![0.0]);
        assert_eq!(nice_ticks(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_nice_ticks_zero_is_exact() {
        let ticks = nice_ticks(-0.3, 0.3, 6);
        assert!(ticks.iter().any(|&t| t == 0.0));
    }

    #[test]
    fn test_nice_step_rule() {
        assert!((nice_step(160.0) - 200.0).abs() < 1e-9);
        assert!((nice_step(100.0) - 100.0).abs() < 1e-9);
        assert!((nice_step(0.3) - 0.5).abs() < 1e-12);
        assert!((nice_step(7.0) - 10.0).abs() < 1e-12);
        assert!((nice_step(0.0015) - 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_absorption_floor_at_zero() {
        let curves = vec![curve(&[10.0, 100.0, 50.0]), curve(&[20.0, 80.0, 5.0])];
        let plan = compute_range_and_ticks(&curves, &params(SpectrumMode::Absorption)).unwrap();

        assert_eq!(plan.y_min, 0.0);
        // 留白相对原始跨度 95
        assert!((plan.y_max - (100.0 + 9.5)).abs() < 1e-9);
        assert_eq!(plan.x_ticks, vec![200.0, 400.0, 600.0, 800.0, 1000.0]);
    }

    #[test]
    fn test_cd_symmetric_padding() {
        let curves = vec![curve(&[-40.0, 0.0, 50.0])];
        let plan =
            compute_range_and_ticks(&curves, &params(SpectrumMode::CircularDichroism)).unwrap();

        assert!((plan.y_min - (-49.0)).abs() < 1e-9);
        assert!((plan.y_max - 59.0).abs() < 1e-9);
        assert!(plan.y_min <= -40.0 && plan.y_max >= 50.0);
    }

    #[test]
    fn test_cd_nonnegative_not_floored() {
        let curves = vec![curve(&[10.0, 20.0])];
        let plan =
            compute_range_and_ticks(&curves, &params(SpectrumMode::CircularDichroismLinear))
                .unwrap();
        assert!((plan.y_min - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_absorption_keeps_padding() {
        let curves = vec![curve(&[-10.0, 90.0])];
        let plan = compute_range_and_ticks(&curves, &params(SpectrumMode::Absorption)).unwrap();
        assert!((plan.y_min - (-20.0)).abs() < 1e-9);
        assert!((plan.y_max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_curves_get_drawable_range() {
        let curves = vec![curve(&[0.0, 0.0, 0.0])];
        let plan = compute_range_and_ticks(&curves, &params(SpectrumMode::Emission)).unwrap();
        assert_eq!(plan.y_min, 0.0);
        assert!(plan.y_max > 0.0);
        assert!(plan.y_ticks.len() >= 2);

        let curves = vec![curve(&[-5.0, -5.0])];
        let plan =
            compute_range_and_ticks(&curves, &params(SpectrumMode::CircularDichroism)).unwrap();
        assert!(plan.y_min < -5.0 && plan.y_max > -5.0);
    }

    #[test]
    fn test_empty_curve_list_is_error() {
        let result = compute_range_and_ticks(&[], &params(SpectrumMode::Absorption));
        assert!(matches!(result, Err(PlotspecError::EmptyChart)));
    }
}
