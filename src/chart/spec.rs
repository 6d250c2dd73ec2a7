//! # 图表描述
//!
//! `compose_chart` 把曲线、坐标轴规划和参数组合成不可变的 `ChartSpec`。
//! 所有后端（SVG、位图、EPS、PDF、交互窗口）都只读取这一份描述。
//!
//! ## 样式约定
//! - 底部/左侧为主坐标轴，刻度位置来自 `AxisPlan`，无网格
//! - 顶部/右侧坐标轴只用于封闭边框，无刻度和标签
//! - 图例位于右上角，无边框
//! - 颜色按曲线序号循环取自 SPECTRUM 调色板
//!
//! ## 依赖关系
//! - 被 `chart/mod.rs`, `chart/render.rs`, `chart/viewer.rs` 使用
//! - 使用 `models/` 的 Curve, AxisPlan, ParameterRecord

use crate::error::{PlotspecError, Result};
use crate::models::{AxisPlan, Curve, ParameterRecord};

/// SPECTRUM 调色板：黑、红、蓝、绿、紫、橙、棕
pub const SPECTRUM_PALETTE: [(u8, u8, u8); 7] = [
    (0, 0, 0),
    (228, 26, 28),
    (55, 126, 184),
    (77, 175, 74),
    (152, 78, 163),
    (255, 127, 0),
    (166, 86, 40),
];

/// 第 `index` 条曲线的颜色
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    SPECTRUM_PALETTE[index % SPECTRUM_PALETTE.len()]
}

/// 一条数据系列
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: (u8, u8, u8),
    pub points: Vec<(f64, f64)>,
}

/// 一个主坐标轴
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub title: String,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl AxisSpec {
    /// 刻度标签的小数位数，由刻度间距决定
    pub fn tick_decimals(&self) -> usize {
        let step = match self.ticks.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => (self.max - self.min).abs(),
        };
        if !(step > 0.0) || !step.is_finite() {
            return 0;
        }
        let magnitude = step.log10().floor();
        if magnitude >= 0.0 {
            0
        } else {
            ((-magnitude) as usize).min(6)
        }
    }

    /// 格式化一个刻度值
    pub fn format_tick(&self, value: f64) -> String {
        // 避免出现 "-0"
        let value = if value.abs() < 1e-12 { 0.0 } else { value };
        format!("{:.*}", self.tick_decimals(), value)
    }
}

/// 固定的版式参数（以 1 倍画布为基准）
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: (u8, u8, u8),
    pub line_width: f64,
    pub axis_title_font: f64,
    pub tick_label_font: f64,
    pub legend_font: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            background: (255, 255, 255),
            line_width: 2.0,
            axis_title_font: 16.0,
            tick_label_font: 14.0,
            legend_font: 12.0,
        }
    }
}

/// 完整的图表描述
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// 窗口标题（不绘制在图上）
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<SeriesSpec>,
    pub style: ChartStyle,
}

/// 只保留落在坐标范围内的刻度（刻度生成允许略微越过上限）
fn visible_ticks(ticks: &[f64], min: f64, max: f64) -> Vec<f64> {
    let tol = (max - min).abs() * 1e-9;
    ticks
        .iter()
        .copied()
        .filter(|t| *t >= min - tol && *t <= max + tol)
        .collect()
}

/// 组合图表描述
pub fn compose_chart(curves: &[Curve], plan: &AxisPlan, params: &ParameterRecord) -> Result<ChartSpec> {
    let first = curves.first().ok_or(PlotspecError::EmptyChart)?;

    if params.legend_labels.len() != curves.len() {
        return Err(PlotspecError::InvalidConfig(format!(
            "{} legend labels for {} curves",
            params.legend_labels.len(),
            curves.len()
        )));
    }

    let series = curves
        .iter()
        .zip(&params.legend_labels)
        .enumerate()
        .map(|(i, (curve, label))| SeriesSpec {
            label: label.clone(),
            color: palette_color(i),
            points: curve.points().collect(),
        })
        .collect();

    Ok(ChartSpec {
        title: first.title.clone(),
        x_axis: AxisSpec {
            title: first.x_label.clone(),
            min: plan.x_min,
            max: plan.x_max,
            ticks: visible_ticks(&plan.x_ticks, plan.x_min, plan.x_max),
        },
        y_axis: AxisSpec {
            title: first.y_label.clone(),
            min: plan.y_min,
            max: plan.y_max,
            ticks: visible_ticks(&plan.y_ticks, plan.y_min, plan.y_max),
        },
        series,
        style: ChartStyle::default(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{InputSource, OutputFormat, SpectralUnit, SpectrumMode};
    use std::path::PathBuf;

    pub(crate) fn params_with_labels(labels: &[&str]) -> ParameterRecord {
        ParameterRecord {
            mode: SpectrumMode::Absorption,
            unit: SpectralUnit::Nanometer,
            x_start: 200.0,
            x_end: 400.0,
            interval: 1.0,
            fwhm_cm: 4000.0,
            input_sources: labels
                .iter()
                .enumerate()
                .map(|(index, l)| InputSource {
                    index,
                    name: format!("{}.out", l),
                    path: PathBuf::from(format!("{}.out", l)),
                })
                .collect(),
            legend_labels: labels.iter().map(|l| l.to_string()).collect(),
            output_format: OutputFormat::Svg,
            output_name: "spectrum_plot".to_string(),
            interactive: false,
        }
    }

    pub(crate) fn curve(offset: f64) -> Curve {
        Curve {
            x_values: vec![200.0, 300.0, 400.0],
            y_values: vec![offset, offset + 10.0, offset + 5.0],
            x_label: "Wavelength (nm)".to_string(),
            y_label: "Molar Absorptivity (L/(mol·cm))".to_string(),
            title: "Absorption Spectra".to_string(),
        }
    }

    pub(crate) fn plan() -> AxisPlan {
        AxisPlan {
            x_min: 200.0,
            x_max: 400.0,
            y_min: 0.0,
            y_max: 20.0,
            x_ticks: vec![200.0, 250.0, 300.0, 350.0, 400.0],
            y_ticks: vec![0.0, 5.0, 10.0, 15.0, 20.0],
        }
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), (0, 0, 0));
        assert_eq!(palette_color(1), (228, 26, 28));
        assert_eq!(palette_color(7), palette_color(0));
        assert_eq!(palette_color(9), palette_color(2));
    }

    #[test]
    fn test_compose_assigns_labels_and_colors() {
        let curves = vec![curve(0.0), curve(1.0), curve(2.0)];
        let spec = compose_chart(&curves, &plan(), &params_with_labels(&["a", "b", "c"])).unwrap();

        assert_eq!(spec.title, "Absorption Spectra");
        assert_eq!(spec.x_axis.title, "Wavelength (nm)");
        assert_eq!(spec.y_axis.ticks, plan().y_ticks);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[1].label, "b");
        assert_eq!(spec.series[2].color, (55, 126, 184));
        assert_eq!(spec.series[0].points[1], (300.0, 10.0));
        assert_eq!(spec.style.width, 1000);
        assert_eq!(spec.style.height, 700);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let curves = vec![curve(0.0), curve(1.0)];
        let params = params_with_labels(&["a", "b"]);
        assert_eq!(
            compose_chart(&curves, &plan(), &params).unwrap(),
            compose_chart(&curves, &plan(), &params).unwrap()
        );
    }

    #[test]
    fn test_compose_rejects_empty_and_mismatch() {
        assert!(matches!(
            compose_chart(&[], &plan(), &params_with_labels(&[])),
            Err(PlotspecError::EmptyChart)
        ));
        assert!(compose_chart(&[curve(0.0)], &plan(), &params_with_labels(&["a", "b"])).is_err());
    }

    #[test]
    fn test_ticks_outside_range_dropped() {
        let mut p = plan();
        p.y_max = 18.0;
        p.y_ticks = vec![0.0, 5.0, 10.0, 15.0, 20.0];
        let spec = compose_chart(&[curve(0.0)], &p, &params_with_labels(&["a"])).unwrap();
        assert_eq!(spec.y_axis.ticks, vec![0.0, 5.0, 10.0, 15.0]);
        assert_eq!(spec.x_axis.ticks, p.x_ticks);
    }

    #[test]
    fn test_tick_formatting() {
        let axis = AxisSpec {
            title: String::new(),
            min: 1.0,
            max: 2.0,
            ticks: vec![1.0, 1.2, 1.4],
        };
        assert_eq!(axis.tick_decimals(), 1);
        assert_eq!(axis.format_tick(1.2), "1.2");

        let axis = AxisSpec {
            title: String::new(),
            min: -20000.0,
            max: 20000.0,
            ticks: vec![-20000.0, -10000.0, 0.0],
        };
        assert_eq!(axis.tick_decimals(), 0);
        assert_eq!(axis.format_tick(-1e-13), "0");
        assert_eq!(axis.format_tick(10000.0), "10000");

        let axis = AxisSpec {
            title: String::new(),
            min: 0.0,
            max: 0.1,
            ticks: vec![0.0, 0.02],
        };
        assert_eq!(axis.tick_decimals(), 2);
    }
}
