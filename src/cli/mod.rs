//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。plotspec 只有一个动作：
//! 读取配置、合成光谱、导出图像。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use clap::Parser;
use std::path::PathBuf;

/// plotspec - 合成吸收/发射/圆二色光谱绘图工具
#[derive(Parser, Debug)]
#[command(name = "plotspec")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Plot synthetic absorption, emission and circular dichroism spectra",
    long_about = "Plot synthetic absorption, emission and circular dichroism spectra.\n\n\
                  Settings are read from spectrum_config.toml (current directory, then home \
                  directory). Each input file contributes one curve."
)]
pub struct Cli {
    /// Calculation output files (the .out/.log suffix may be omitted)
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<String>,

    /// Path to the configuration file
    #[arg(short, long, env = "SPECTRUM_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output file name without extension (overrides output_filename)
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Output format: svg, png, jpg, eps or pdf (overrides output_format)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Do not open the interactive viewer after export
    #[arg(long)]
    pub no_interactive: bool,

    /// Also write the curve data to a CSV file
    #[arg(long, value_name = "PATH")]
    pub export_data: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "plotspec",
            "water",
            "methanol.log",
            "-o",
            "figure1",
            "-f",
            "pdf",
            "--no-interactive",
            "--export-data",
            "curves.csv",
        ])
        .unwrap();

        assert_eq!(cli.inputs, vec!["water", "methanol.log"]);
        assert_eq!(cli.output.as_deref(), Some("figure1"));
        assert_eq!(cli.format.as_deref(), Some("pdf"));
        assert!(cli.no_interactive);
        assert_eq!(cli.export_data, Some(PathBuf::from("curves.csv")));
    }

    #[test]
    fn test_inputs_required() {
        assert!(Cli::try_parse_from(["plotspec"]).is_err());
    }
}
