//! # 单位换算
//!
//! 波长 (nm)、能量 (eV) 与波数 (cm⁻¹) 之间的纯函数换算。
//!
//! ## 依赖关系
//! - 被 `config/resolve.rs` 使用（FWHM 从 eV 换算到 cm⁻¹）
//! - 被 `commands/plot.rs` 使用（打印 FWHM）

use crate::error::{PlotspecError, Result};

/// 1 eV 对应的波数 (cm⁻¹)
pub const EV_TO_CM_MINUS_1: f64 = 8065.54477;

/// λ(nm) · E(eV) = 1239.84186
pub const NM_EV_PRODUCT: f64 = 1239.84186;

pub fn ev_to_wavenumber(ev: f64) -> f64 {
    ev * EV_TO_CM_MINUS_1
}

pub fn wavenumber_to_ev(wavenumber: f64) -> f64 {
    wavenumber / EV_TO_CM_MINUS_1
}

/// 波长 (nm) → 能量 (eV)
pub fn nm_to_ev(nm: f64) -> Result<f64> {
    reciprocal(nm)
}

/// 能量 (eV) → 波长 (nm)
pub fn ev_to_nm(ev: f64) -> Result<f64> {
    reciprocal(ev)
}

/// 配置中的 FWHM (eV) 换算为内部单位 (cm⁻¹)
pub fn fwhm_ev_to_internal(fwhm_ev: f64) -> f64 {
    ev_to_wavenumber(fwhm_ev)
}

fn reciprocal(value: f64) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(PlotspecError::InvalidUnitValue(value));
    }
    Ok(NM_EV_PRODUCT / value)
}
