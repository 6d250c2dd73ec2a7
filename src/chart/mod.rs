//! # 图表组合与导出模块
//!
//! 把曲线组合成 `ChartSpec`，按输出格式写出文件，并可选打开交互窗口。
//!
//! ## 子模块
//! - `spec`: 不可变图表描述与调色板
//! - `render`: 对任意 plotters 后端的统一绘制
//! - `export`: 格式分派与位图编码
//! - `vector`, `eps`, `pdf`, `glyphs`: EPS/PDF 矢量后端
//! - `data`: CSV 数据导出
//! - `viewer`: 交互式查看窗口
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/` 的 Curve, AxisPlan, ParameterRecord

pub mod data;
pub mod eps;
pub mod export;
pub mod glyphs;
pub mod pdf;
pub mod render;
pub mod spec;
pub mod vector;
pub mod viewer;

pub use spec::{compose_chart, ChartSpec};

use crate::error::Result;
use crate::models::{AxisPlan, Curve, ParameterRecord};
use crate::utils::output;

use std::path::PathBuf;

/// 组合图表、写出文件，交互模式下随后阻塞在查看窗口
pub fn compose_and_export(
    curves: &[Curve],
    plan: &AxisPlan,
    params: &ParameterRecord,
) -> Result<PathBuf> {
    let spec = compose_chart(curves, plan, params)?;
    let path = params.output_path();

    export::export_chart(&spec, params.output_format, &path)?;
    output::print_success(&format!("Plot exported to: {}", path.display()));

    if params.interactive {
        output::print_info("Opening interactive view (close the window to finish)");
        viewer::show(&spec)?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::tests as fixtures;
    use crate::models::OutputFormat;

    #[test]
    fn test_compose_and_export_writes_named_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = fixtures::params_with_labels(&["a"]);
        params.output_format = OutputFormat::Pdf;
        params.output_name = dir.path().join("figure").display().to_string();

        let path = compose_and_export(&[fixtures::curve(0.0)], &fixtures::plan(), &params).unwrap();

        assert_eq!(path, dir.path().join("figure.pdf"));
        assert!(path.is_file());
    }

    #[test]
    fn test_empty_chart_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = fixtures::params_with_labels(&[]);
        params.output_name = dir.path().join("empty").display().to_string();

        assert!(compose_and_export(&[], &fixtures::plan(), &params).is_err());
        assert!(!dir.path().join("empty.svg").exists());
    }
}
