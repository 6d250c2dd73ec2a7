//! # 高斯谱带模型
//!
//! 每个 (光谱类型, 单位) 组合对应一组固定的高斯谱带。
//! 查表对枚举全积定义：没有物理模型的组合返回 `None`，由调用方报错。
//!
//! ## 依赖关系
//! - 被 `spectrum/synthesizer.rs` 使用

use crate::models::{SpectralUnit, SpectrumMode};

/// 单个高斯谱带 `amplitude · exp(-((x - center) / width)²)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// 带符号振幅（CD 谱带正负交替）
    pub amplitude: f64,
    pub center: f64,
    pub width: f64,
}

impl Band {
    const fn new(amplitude: f64, center: f64, width: f64) -> Self {
        Self {
            amplitude,
            center,
            width,
        }
    }

    /// 在 x 处的取值，`shift` 为整体平移，`factor` 为强度缩放
    pub fn evaluate(&self, x: f64, shift: f64, factor: f64) -> f64 {
        let z = (x - self.center - shift) / self.width;
        factor * self.amplitude * (-z * z).exp()
    }
}

const ABS_NM: &[Band] = &[
    Band::new(15000.0, 280.0, 15.0),
    Band::new(12000.0, 320.0, 20.0),
    Band::new(8000.0, 420.0, 25.0),
    Band::new(5000.0, 520.0, 30.0),
];

const ABS_EV: &[Band] = &[
    Band::new(15000.0, 3.1, 0.15),
    Band::new(12000.0, 3.9, 0.2),
    Band::new(8000.0, 4.4, 0.1),
];

const ABS_CM: &[Band] = &[
    Band::new(15000.0, 25000.0, 2000.0),
    Band::new(12000.0, 31000.0, 1500.0),
    Band::new(8000.0, 35000.0, 1000.0),
];

const EMI_NM: &[Band] = &[
    Band::new(0.9, 350.0, 20.0),
    Band::new(0.7, 450.0, 25.0),
    Band::new(0.5, 550.0, 30.0),
];

const EMI_EV: &[Band] = &[
    Band::new(0.9, 2.8, 0.15),
    Band::new(0.7, 3.2, 0.2),
    Band::new(0.5, 3.6, 0.1),
];

const CD_NM: &[Band] = &[
    Band::new(50.0, 260.0, 15.0),
    Band::new(-40.0, 300.0, 20.0),
    Band::new(30.0, 340.0, 18.0),
    Band::new(-20.0, 380.0, 25.0),
];

const CD_EV: &[Band] = &[
    Band::new(50.0, 4.0, 0.15),
    Band::new(-40.0, 3.5, 0.2),
    Band::new(30.0, 3.0, 0.18),
];

/// 查找谱带模型
pub fn band_model(mode: SpectrumMode, unit: SpectralUnit) -> Option<&'static [Band]> {
    use SpectralUnit::*;
    use SpectrumMode::*;

    match (mode, unit) {
        (Absorption, Nanometer) => Some(ABS_NM),
        (Absorption, ElectronVolt) => Some(ABS_EV),
        (Absorption, Wavenumber) => Some(ABS_CM),
        (Emission, Nanometer) => Some(EMI_NM),
        (Emission, ElectronVolt) => Some(EMI_EV),
        (Emission, Wavenumber) => None,
        (CircularDichroism | CircularDichroismLinear, Nanometer) => Some(CD_NM),
        (CircularDichroism | CircularDichroismLinear, ElectronVolt) => Some(CD_EV),
        (CircularDichroism | CircularDichroismLinear, Wavenumber) => None,
    }
}

/// 每个输入源的峰位平移量按单位缩放（以 nm 为基准）
pub fn scale_shift(shift_nm: f64, unit: SpectralUnit) -> f64 {
    match unit {
        SpectralUnit::Nanometer => shift_nm,
        SpectralUnit::ElectronVolt => shift_nm / 1000.0,
        SpectralUnit::Wavenumber => shift_nm * 100.0,
    }
}
