//! # 配置解析与校验
//!
//! 把原始配置、环境变量覆盖和命令行覆盖合并为不可变的 `ParameterRecord`。
//!
//! ## 处理顺序
//! 1. `SPECTRUM_HIGH_RES` / `SPECTRUM_PUBLICATION` 环境覆盖作用于主配置
//! 2. 个人覆盖配置中出现的键替换对应值
//! 3. 缺省键取默认值，再应用命令行覆盖（输出名、输出格式、交互）
//! 4. 校验回退：无效范围、非正 FWHM、非正间隔回退到单位默认值并给出警告
//! 5. 图例名数量与输入源不符时改用文件名主干
//!
//! ## 依赖关系
//! - 被 `config/mod.rs` 调用
//! - 使用 `config/file.rs` 的 RawConfig
//! - 使用 `spectrum/units.rs` 换算 FWHM

use crate::config::file::{ConfigLayers, RawConfig};
use crate::error::Result;
use crate::models::{InputSource, OutputFormat, ParameterRecord, SpectralUnit, SpectrumMode};
use crate::spectrum::units;

const DEFAULT_X_START: f64 = 200.0;
const DEFAULT_X_END: f64 = 1000.0;
const DEFAULT_FWHM_EV: f64 = 0.5;
const DEFAULT_OUTPUT_NAME: &str = "spectrum_plot";

const PUBLICATION_FWHM_EV: f64 = 0.1;
const PUBLICATION_NM_INTERVAL: f64 = 0.2;

/// 环境变量覆盖
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverrides {
    /// `SPECTRUM_HIGH_RES`：加密采样
    pub high_res: bool,
    /// `SPECTRUM_PUBLICATION`：SVG + 窄展宽
    pub publication: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            high_res: std::env::var_os("SPECTRUM_HIGH_RES").is_some(),
            publication: std::env::var_os("SPECTRUM_PUBLICATION").is_some(),
        }
    }
}

/// 命令行覆盖
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_name: Option<String>,
    pub output_format: Option<String>,
    pub interactive: bool,
}

/// 解析结果：参数及过程中产生的警告
#[derive(Debug, Clone)]
pub struct Resolved {
    pub params: ParameterRecord,
    pub warnings: Vec<String>,
}

/// 合并所有来源得到最终参数
pub fn resolve(
    layers: impl Into<ConfigLayers>,
    env: EnvOverrides,
    cli: CliOverrides,
    sources: Vec<InputSource>,
) -> Result<Resolved> {
    let layers = layers.into();
    let raw = apply_env(layers.main, env)?;
    let raw = match layers.user {
        Some(user) => raw.merge(user),
        None => raw,
    };

    let mut warnings = Vec::new();

    let mode = match raw.mode.as_deref() {
        Some(m) => SpectrumMode::parse(m)?,
        None => SpectrumMode::Absorption,
    };
    let unit = match raw.unit.as_deref() {
        Some(u) => SpectralUnit::parse(u)?,
        None => SpectralUnit::Nanometer,
    };

    let mut x_start = raw.x_start.unwrap_or(DEFAULT_X_START);
    let mut x_end = raw.x_end.unwrap_or(DEFAULT_X_END);
    let mut fwhm_ev = raw.fwhm_ev.unwrap_or(DEFAULT_FWHM_EV);

    let format_key = cli
        .output_format
        .or(raw.output_format)
        .unwrap_or_else(|| "svg".to_string());
    let output_format = OutputFormat::parse(&format_key)?;

    let output_name = cli
        .output_name
        .or(raw.output_filename)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string());

    // ─────────────────────────────────────────────────────────────
    // 校验回退
    // ─────────────────────────────────────────────────────────────
    if !(x_start < x_end) || !x_start.is_finite() || !x_end.is_finite() {
        let (s, e) = unit.default_range();
        warnings.push(format!(
            "Invalid range {} - {} {}, using default {} - {}",
            x_start, x_end, unit, s, e
        ));
        x_start = s;
        x_end = e;
    }

    if !(fwhm_ev > 0.0) {
        warnings.push(format!(
            "Invalid FWHM {} eV, using default {} eV",
            fwhm_ev, DEFAULT_FWHM_EV
        ));
        fwhm_ev = DEFAULT_FWHM_EV;
    }

    let interval = match raw.interval {
        Some(i) if i > 0.0 && i.is_finite() => i,
        Some(i) => {
            let d = unit.default_interval();
            warnings.push(format!("Invalid interval {}, using default {} {}", i, d, unit));
            d
        }
        None => unit.default_interval(),
    };

    let legend_labels = resolve_legend(raw.legend_names, &sources, &mut warnings);

    Ok(Resolved {
        params: ParameterRecord {
            mode,
            unit,
            x_start,
            x_end,
            interval,
            fwhm_cm: units::fwhm_ev_to_internal(fwhm_ev),
            input_sources: sources,
            legend_labels,
            output_format,
            output_name,
            interactive: cli.interactive,
        },
        warnings,
    })
}

/// 把环境开关写入主配置（单位取主配置中的值）
fn apply_env(mut raw: RawConfig, env: EnvOverrides) -> Result<RawConfig> {
    if !env.high_res && !env.publication {
        return Ok(raw);
    }

    let unit = match raw.unit.as_deref() {
        Some(u) => SpectralUnit::parse(u)?,
        None => SpectralUnit::Nanometer,
    };
    if env.high_res {
        raw.interval = Some(unit.high_res_interval());
    }
    if env.publication {
        raw.output_format = Some("svg".to_string());
        raw.fwhm_ev = Some(PUBLICATION_FWHM_EV);
        if unit == SpectralUnit::Nanometer {
            raw.interval = Some(PUBLICATION_NM_INTERVAL);
        }
    }
    Ok(raw)
}

/// 图例名：数量匹配时使用配置，否则回退为输入文件名主干
fn resolve_legend(
    configured: Option<Vec<String>>,
    sources: &[InputSource],
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let names: Vec<String> = configured
        .unwrap_or_default()
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    if !names.is_empty() && names.len() == sources.len() {
        return names;
    }

    if !names.is_empty() {
        warnings.push(format!(
            "{} legend names configured for {} input files, using file names instead",
            names.len(),
            sources.len()
        ));
    }

    sources.iter().map(|s| s.stem()).collect()
}
