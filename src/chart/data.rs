//! # 光谱数据导出
//!
//! 把合成曲线写成 CSV：首列为横坐标，之后每条曲线一列（列名为图例名）。
//! 所有曲线共享同一横坐标网格。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用（`--export-data`）
//! - 使用 `models/curve.rs` 的 Curve
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{PlotspecError, Result};
use crate::models::Curve;

use std::path::Path;

/// 导出曲线数据为 CSV 格式
pub fn curves_to_csv(curves: &[Curve], labels: &[String], output_path: &Path) -> Result<()> {
    let first = curves.first().ok_or(PlotspecError::EmptyChart)?;

    if labels.len() != curves.len() {
        return Err(PlotspecError::InvalidConfig(format!(
            "{} column names for {} curves",
            labels.len(),
            curves.len()
        )));
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = Vec::with_capacity(curves.len() + 1);
    header.push(format!("x ({})", first.x_label));
    header.extend(labels.iter().cloned());
    wtr.write_record(&header)?;

    for (row, x) in first.x_values.iter().enumerate() {
        let mut record = Vec::with_capacity(curves.len() + 1);
        record.push(format!("{:.6}", x));
        for curve in curves {
            let y = curve.y_values.get(row).copied().unwrap_or(f64::NAN);
            record.push(format!("{:.6}", y));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| PlotspecError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
