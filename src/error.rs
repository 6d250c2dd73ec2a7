//! # 统一错误处理模块
//!
//! 定义 plotspec 的所有错误类型，使用 `thiserror` 派生。
//! 所有错误对一次运行都是致命的：不产生部分输出，由 `main` 打印后以退出码 1 结束。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// plotspec 统一错误类型
#[derive(Error, Debug)]
pub enum PlotspecError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Config file not found. Please create spectrum_config.toml in current directory or home directory.")]
    ConfigNotFound,

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}\nReason: {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ─────────────────────────────────────────────────────────────
    // 输入源错误
    // ─────────────────────────────────────────────────────────────
    #[error("No input files provided")]
    NoInputFiles,

    #[error("Cannot open BDF output file: {path}")]
    InputNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 光谱合成错误
    // ─────────────────────────────────────────────────────────────
    #[error("No band model defined for mode '{mode}' with unit '{unit}'")]
    UnsupportedCombination { mode: String, unit: String },

    #[error("Cannot take reciprocal of {0} (value must be finite and non-zero)")]
    InvalidUnitValue(f64),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported output format: {0} (expected svg, png, jpg, jpeg, eps or pdf)")]
    UnsupportedFormat(String),

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Image encoding failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Interactive viewer failed: {0}")]
    ViewerError(String),

    #[error("Cannot build a chart without any spectra")]
    EmptyChart,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PlotspecError>;
