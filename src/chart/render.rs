//! # 图表绘制
//!
//! `draw_chart` 对任意 `DrawingBackend` 绘制一份 `ChartSpec`：
//! 背景、主坐标轴（自定义刻度、无网格）、封闭边框的次坐标轴、曲线和图例。
//! `scale` 同时放大字号、线宽和边距，位图输出使用 2 倍。
//!
//! ## 依赖关系
//! - 被 `chart/export.rs` 调用
//! - 使用 `chart/spec.rs` 的 ChartSpec
//! - 使用 `plotters` 渲染图表

use crate::chart::spec::ChartSpec;
use crate::error::{PlotspecError, Result};

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;

/// 刻度位置固定的数值坐标轴
///
/// 主刻度取自 `AxisPlan`；不提供次刻度，次坐标轴传入空刻度以只画轴线。
#[derive(Clone)]
struct TickAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickAxis {
    fn new(min: f64, max: f64, ticks: Vec<f64>) -> Self {
        Self {
            inner: (min..max).into(),
            ticks,
        }
    }
}

impl Ranged for TickAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

fn render_error<E: std::fmt::Debug>(e: E) -> PlotspecError {
    PlotspecError::RenderError(format!("{:?}", e))
}

/// 绘制完整图表（不调用 `present`）
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spec: &ChartSpec,
    scale: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let px = |v: f64| (v * scale).round().max(1.0) as u32;
    let style = &spec.style;
    let (bg_r, bg_g, bg_b) = style.background;
    let background = RGBColor(bg_r, bg_g, bg_b);

    root.fill(&background).map_err(render_error)?;

    let (x_axis, y_axis) = (&spec.x_axis, &spec.y_axis);

    let mut chart = ChartBuilder::on(root)
        .margin(px(20.0))
        .x_label_area_size(px(60.0))
        .y_label_area_size(px(90.0))
        .top_x_label_area_size(px(10.0))
        .right_y_label_area_size(px(10.0))
        .build_cartesian_2d(
            TickAxis::new(x_axis.min, x_axis.max, x_axis.ticks.clone()),
            TickAxis::new(y_axis.min, y_axis.max, y_axis.ticks.clone()),
        )
        .map_err(render_error)?
        .set_secondary_coord(
            TickAxis::new(x_axis.min, x_axis.max, Vec::new()),
            TickAxis::new(y_axis.min, y_axis.max, Vec::new()),
        );

    let axis_line = BLACK.stroke_width(px(1.0));
    let x_formatter = |v: &f64| x_axis.format_tick(*v);
    let y_formatter = |v: &f64| y_axis.format_tick(*v);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_axis.title.as_str())
        .y_desc(y_axis.title.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(("sans-serif", style.tick_label_font * scale).into_font().color(&BLACK))
        .axis_desc_style(("sans-serif", style.axis_title_font * scale).into_font().color(&BLACK))
        .axis_style(axis_line)
        .set_all_tick_mark_size(px(5.0))
        .draw()
        .map_err(render_error)?;

    // 顶部和右侧只画轴线，封闭边框
    chart
        .configure_secondary_axes()
        .axis_style(axis_line)
        .draw()
        .map_err(render_error)?;

    let line_width = px(style.line_width);
    let legend_length = px(25.0) as i32;

    for series in &spec.series {
        let (r, g, b) = series.color;
        let color = RGBColor(r, g, b);

        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(line_width),
            ))
            .map_err(render_error)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + legend_length, y)],
                    color.stroke_width(line_width),
                )
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(px(10.0))
        .border_style(&TRANSPARENT)
        .background_style(&background.mix(0.8))
        .label_font(("sans-serif", style.legend_font * scale).into_font().color(&BLACK))
        .draw()
        .map_err(render_error)?;

    Ok(())
}
