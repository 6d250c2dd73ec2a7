//! # 绘图流程实现
//!
//! 一次运行的完整流程：
//! 1. 解析输入源
//! 2. 读取并解析配置
//! 3. 逐个输入源合成光谱（进度条）
//! 4. 计算共享坐标轴
//! 5. 组合图表并导出（可选交互窗口）
//! 6. 图像导出成功后，可选导出 CSV 数据
//!
//! 任一步骤出错即中止，不写出图像文件。
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的 Cli
//! - 使用 `sources/`, `config/`, `spectrum/`, `chart/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::chart;
use crate::cli::Cli;
use crate::config::{self, CliOverrides, ConfigLocator, EnvOverrides};
use crate::error::Result;
use crate::models::{AxisPlan, Curve, ParameterRecord};
use crate::sources;
use crate::spectrum::{self, synthesizer, units};
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 曲线汇总行
#[derive(Debug, Clone, Tabled)]
struct CurveRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "y min")]
    y_min: String,
    #[tabled(rename = "y max")]
    y_max: String,
}

/// 执行绘图
pub fn execute(cli: Cli) -> Result<()> {
    output::print_header("Spectrum Plot");

    // 输入源
    let input_sources = sources::resolve_sources(&cli.inputs)?;
    for source in &input_sources {
        output::print_info(&format!("Input {}: {}", source.index + 1, source.path.display()));
    }

    // 配置
    let overrides = CliOverrides {
        output_name: cli.output.clone(),
        output_format: cli.format.clone(),
        interactive: !cli.no_interactive,
    };
    let (resolved, used) = config::load_parameters(
        &ConfigLocator::from_env(),
        cli.config.as_deref(),
        EnvOverrides::from_env(),
        overrides,
        input_sources,
    )?;
    for path in &used {
        output::print_info(&format!("Loaded configuration: {}", path.display()));
    }
    output::print_warnings(&resolved.warnings);

    let params = resolved.params;
    print_run_summary(&params);

    // 合成
    let curves = synthesize_all(&params)?;
    print_curve_table(&curves, &params);

    // 坐标轴
    let plan = spectrum::compute_range_and_ticks(&curves, &params)?;
    output::print_info(&format!(
        "Axis range: x {} - {}, y {:.4} - {:.4}",
        plan.x_min, plan.x_max, plan.y_min, plan.y_max
    ));

    write_outputs(&curves, &plan, &params, cli.export_data.as_deref())?;

    output::print_separator();
    output::print_success("Done");
    Ok(())
}

/// 导出图像，成功后再写出可选的 CSV 数据
fn write_outputs(
    curves: &[Curve],
    plan: &AxisPlan,
    params: &ParameterRecord,
    export_data: Option<&Path>,
) -> Result<()> {
    chart::compose_and_export(curves, plan, params)?;

    if let Some(path) = export_data {
        chart::data::curves_to_csv(curves, &params.legend_labels, path)?;
        output::print_success(&format!("Curve data exported to: {}", path.display()));
    }
    Ok(())
}

/// 打印本次运行的参数摘要
fn print_run_summary(params: &ParameterRecord) {
    output::print_info(&format!("Spectrum mode: {}", params.mode.title()));
    output::print_info(&format!("Unit: {}", params.unit));
    output::print_info(&format!(
        "Range: {} - {} {} (interval {})",
        params.x_start, params.x_end, params.unit, params.interval
    ));
    output::print_info(&format!(
        "FWHM: {:.4} eV",
        units::wavenumber_to_ev(params.fwhm_cm)
    ));
    output::print_info(&format!(
        "Input files: {}, output: {}",
        params.input_sources.len(),
        params.output_path().display()
    ));
}

/// 顺序合成所有输入源的曲线
fn synthesize_all(params: &ParameterRecord) -> Result<Vec<Curve>> {
    let synth = spectrum::SpectrumSynthesizer::new(params);
    let pb = progress::create_progress_bar(
        params.input_sources.len() as u64,
        "Synthesizing spectra",
    );

    let mut curves = Vec::with_capacity(params.input_sources.len());
    for source in &params.input_sources {
        if synthesizer::intensity_factor(source.index) <= 0.0 {
            pb.suspend(|| {
                output::print_warning(&format!(
                    "Input {} ('{}') is beyond the amplitude ramp, its curve is zero",
                    source.index + 1,
                    source.name
                ))
            });
        }

        let curve = match synth.synthesize(source.index) {
            Ok(curve) => curve,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        curves.push(curve);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(first) = curves.first() {
        output::print_success(&format!(
            "Synthesized {} curves, {} points each",
            curves.len(),
            first.len()
        ));
    }
    Ok(curves)
}

/// 打印每条曲线的汇总表
fn print_curve_table(curves: &[Curve], params: &ParameterRecord) {
    let rows: Vec<CurveRow> = curves
        .iter()
        .zip(&params.legend_labels)
        .zip(&params.input_sources)
        .enumerate()
        .map(|(i, ((curve, label), source))| CurveRow {
            index: i + 1,
            label: label.clone(),
            source: source.path.display().to_string(),
            points: curve.len(),
            y_min: format_value(curve.y_min()),
            y_max: format_value(curve.y_max()),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header("Curves");
        println!("{}", Table::new(&rows));
    }
}

fn format_value(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve;
    use crate::models::InputSource;
    use std::path::PathBuf;

    fn params(count: usize) -> ParameterRecord {
        let sources: Vec<InputSource> = (0..count)
            .map(|index| InputSource {
                index,
                name: format!("mol{}.out", index),
                path: PathBuf::from(format!("mol{}.out", index)),
            })
            .collect();
        resolve::resolve(
            config::RawConfig::default(),
            EnvOverrides::default(),
            CliOverrides::default(),
            sources,
        )
        .unwrap()
        .params
    }

    #[test]
    fn test_synthesize_all_in_order() {
        let p = params(3);
        let curves = synthesize_all(&p).unwrap();
        assert_eq!(curves.len(), 3);
        assert!(curves.iter().all(|c| c.len() == 801));
        assert!(curves[0].y_max().unwrap() > curves[2].y_max().unwrap());
    }

    #[test]
    fn test_curves_beyond_ramp_are_zero() {
        let p = params(8);
        let curves = synthesize_all(&p).unwrap();
        assert_eq!(curves[7].y_max(), Some(0.0));
        assert_eq!(curves[7].y_min(), Some(0.0));
    }

    #[test]
    fn test_csv_written_after_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = params(2);
        p.output_format = crate::models::OutputFormat::Pdf;
        p.output_name = dir.path().join("figure").display().to_string();
        let curves = synthesize_all(&p).unwrap();
        let plan = spectrum::compute_range_and_ticks(&curves, &p).unwrap();
        let csv = dir.path().join("curves.csv");

        write_outputs(&curves, &plan, &p, Some(&csv)).unwrap();
        assert!(dir.path().join("figure.pdf").is_file());
        assert!(csv.is_file());
    }

    #[test]
    fn test_failed_chart_export_writes_no_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = params(1);
        p.output_format = crate::models::OutputFormat::Pdf;
        p.output_name = dir.path().join("missing").join("figure").display().to_string();
        let curves = synthesize_all(&p).unwrap();
        let plan = spectrum::compute_range_and_ticks(&curves, &p).unwrap();
        let csv = dir.path().join("curves.csv");

        assert!(write_outputs(&curves, &plan, &p, Some(&csv)).is_err());
        assert!(!csv.exists());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(1.234)), "1.23");
        assert_eq!(format_value(None), "-");
    }
}
