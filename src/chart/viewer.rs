//! # 交互式查看窗口
//!
//! 导出完成后，在原生窗口中显示同一份 `ChartSpec`，窗口关闭前阻塞。
//! 需要 `viewer` feature（默认开启）；未开启时只打印警告。
//!
//! ## 依赖关系
//! - 被 `chart/mod.rs` 调用
//! - 使用 `chart/spec.rs` 的 ChartSpec
//! - 使用 `eframe` / `egui_plot`

use crate::chart::spec::ChartSpec;
use crate::error::Result;

#[cfg(feature = "viewer")]
use crate::error::PlotspecError;
#[cfg(feature = "viewer")]
use eframe::egui::{self, Color32};
#[cfg(feature = "viewer")]
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

#[cfg(feature = "viewer")]
struct ChartViewer {
    spec: ChartSpec,
}

#[cfg(feature = "viewer")]
impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let spec = &self.spec;

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::WHITE))
            .show(ctx, |ui| {
                Plot::new("spectrum_plot")
                    .legend(Legend::default().position(Corner::RightTop))
                    .x_axis_label(spec.x_axis.title.as_str())
                    .y_axis_label(spec.y_axis.title.as_str())
                    .show_grid(false)
                    .include_x(spec.x_axis.min)
                    .include_x(spec.x_axis.max)
                    .include_y(spec.y_axis.min)
                    .include_y(spec.y_axis.max)
                    .show(ui, |plot_ui| {
                        for series in &spec.series {
                            let (r, g, b) = series.color;
                            let points: PlotPoints =
                                series.points.iter().map(|&(x, y)| [x, y]).collect();

                            let line = Line::new(points)
                                .name(&series.label)
                                .color(Color32::from_rgb(r, g, b))
                                .width(spec.style.line_width as f32);

                            plot_ui.line(line);
                        }
                    });
            });
    }
}

/// 打开窗口并阻塞到关闭
#[cfg(feature = "viewer")]
pub fn show(spec: &ChartSpec) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([spec.style.width as f32, spec.style.height as f32])
            .with_title(spec.title.as_str()),
        ..Default::default()
    };

    let app = ChartViewer { spec: spec.clone() };
    eframe::run_native(
        &spec.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| PlotspecError::ViewerError(e.to_string()))
}

/// 未编译查看窗口时跳过
#[cfg(not(feature = "viewer"))]
pub fn show(spec: &ChartSpec) -> Result<()> {
    crate::utils::output::print_warning(&format!(
        "Interactive view of '{}' skipped: built without the viewer feature",
        spec.title
    ));
    Ok(())
}
