//! # 绘图参数数据模型
//!
//! `ParameterRecord` 是配置解析的最终产物，被光谱合成、坐标轴计算和图表导出只读使用。
//!
//! ## 依赖关系
//! - 由 `config/resolve.rs` 构造
//! - 被 `spectrum/`, `chart/`, `commands/` 使用

use crate::error::{PlotspecError, Result};

use std::path::{Path, PathBuf};

/// 光谱类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumMode {
    /// 吸收光谱
    Absorption,
    /// 发射光谱
    Emission,
    /// 圆二色谱
    CircularDichroism,
    /// 圆二色谱（长度规范）
    CircularDichroismLinear,
}

impl SpectrumMode {
    /// 从配置文件中的简写解析 (abs, emi, cd, cdl)
    pub fn parse(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "abs" => Ok(SpectrumMode::Absorption),
            "emi" => Ok(SpectrumMode::Emission),
            "cd" => Ok(SpectrumMode::CircularDichroism),
            "cdl" => Ok(SpectrumMode::CircularDichroismLinear),
            other => Err(PlotspecError::InvalidConfig(format!(
                "unknown mode '{}' (expected abs, emi, cd or cdl)",
                other
            ))),
        }
    }

    /// 是否为带符号的圆二色谱
    pub fn is_circular_dichroism(&self) -> bool {
        matches!(
            self,
            SpectrumMode::CircularDichroism | SpectrumMode::CircularDichroismLinear
        )
    }

    /// y 轴标题
    pub fn y_label(&self) -> &'static str {
        match self {
            SpectrumMode::Absorption => "Molar Absorptivity (L/(mol·cm))",
            SpectrumMode::Emission => "Emission Intensity (arb. units)",
            SpectrumMode::CircularDichroism | SpectrumMode::CircularDichroismLinear => {
                "Δε (L/(mol·cm))"
            }
        }
    }

    /// 图表标题
    pub fn title(&self) -> &'static str {
        match self {
            SpectrumMode::Absorption => "Absorption Spectra",
            SpectrumMode::Emission => "Emission Spectra",
            SpectrumMode::CircularDichroism | SpectrumMode::CircularDichroismLinear => {
                "Circular Dichroism Spectra"
            }
        }
    }
}

impl std::fmt::Display for SpectrumMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectrumMode::Absorption => write!(f, "abs"),
            SpectrumMode::Emission => write!(f, "emi"),
            SpectrumMode::CircularDichroism => write!(f, "cd"),
            SpectrumMode::CircularDichroismLinear => write!(f, "cdl"),
        }
    }
}

/// 横轴单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralUnit {
    /// 波长 (nm)
    Nanometer,
    /// 能量 (eV)
    ElectronVolt,
    /// 波数 (cm⁻¹)
    Wavenumber,
}

impl SpectralUnit {
    /// 从配置文件中的写法解析 (nm, eV, cm-1)
    pub fn parse(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "nm" => Ok(SpectralUnit::Nanometer),
            "ev" => Ok(SpectralUnit::ElectronVolt),
            "cm-1" | "cm^-1" => Ok(SpectralUnit::Wavenumber),
            other => Err(PlotspecError::InvalidConfig(format!(
                "unknown unit '{}' (expected nm, eV or cm-1)",
                other
            ))),
        }
    }

    /// 未指定时的默认采样间隔
    pub fn default_interval(&self) -> f64 {
        match self {
            SpectralUnit::Nanometer => 1.0,
            SpectralUnit::ElectronVolt => 0.01,
            SpectralUnit::Wavenumber => 100.0,
        }
    }

    /// 配置范围无效时回退的默认范围
    pub fn default_range(&self) -> (f64, f64) {
        match self {
            SpectralUnit::Nanometer => (200.0, 1000.0),
            SpectralUnit::ElectronVolt => (1.0, 6.0),
            SpectralUnit::Wavenumber => (400.0, 4000.0),
        }
    }

    /// 高分辨率模式下的采样间隔
    pub fn high_res_interval(&self) -> f64 {
        match self {
            SpectralUnit::Nanometer => 0.5,
            SpectralUnit::ElectronVolt => 0.005,
            SpectralUnit::Wavenumber => 2.0,
        }
    }

    /// x 轴标题
    pub fn axis_label(&self) -> &'static str {
        match self {
            SpectralUnit::Nanometer => "Wavelength (nm)",
            SpectralUnit::ElectronVolt => "Energy (eV)",
            SpectralUnit::Wavenumber => "Wavenumber (cm⁻¹)",
        }
    }
}

impl std::fmt::Display for SpectralUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralUnit::Nanometer => write!(f, "nm"),
            SpectralUnit::ElectronVolt => write!(f, "eV"),
            SpectralUnit::Wavenumber => write!(f, "cm-1"),
        }
    }
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Eps,
    Pdf,
}

impl OutputFormat {
    /// 解析格式名称，未知格式作为导出错误报告给调用方
    pub fn parse(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "eps" => Ok(OutputFormat::Eps),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(PlotspecError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Eps => "eps",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// 是否为矢量格式
    pub fn is_vector(&self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Eps | OutputFormat::Pdf)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 一个输入源（仅使用其序号与名称，不读取内容）
#[derive(Debug, Clone, PartialEq)]
pub struct InputSource {
    /// 在命令行中的位置（从 0 开始）
    pub index: usize,
    /// 用户给出的名称
    pub name: String,
    /// 实际找到的文件路径
    pub path: PathBuf,
}

impl InputSource {
    /// 图例回退名称：用户给出名称的文件名主干
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// 完整解析后的绘图参数
#[derive(Debug, Clone)]
pub struct ParameterRecord {
    pub mode: SpectrumMode,
    pub unit: SpectralUnit,
    pub x_start: f64,
    pub x_end: f64,
    /// 采样间隔（正数）
    pub interval: f64,
    /// 展宽半高全宽，内部以 cm⁻¹ 存储
    pub fwhm_cm: f64,
    pub input_sources: Vec<InputSource>,
    /// 与 `input_sources` 等长
    pub legend_labels: Vec<String>,
    pub output_format: OutputFormat,
    /// 输出文件名（不含扩展名）
    pub output_name: String,
    pub interactive: bool,
}

impl ParameterRecord {
    /// 导出文件路径 `<output_name>.<ext>`
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            self.output_name,
            self.output_format.extension()
        ))
    }
}
