//! # 光谱曲线与坐标轴规划
//!
//! ## 依赖关系
//! - `Curve` 由 `spectrum/synthesizer.rs` 生成
//! - `AxisPlan` 由 `spectrum/axis.rs` 生成
//! - 两者被 `chart/` 使用

/// 一条合成光谱曲线
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// 严格递增的横坐标
    pub x_values: Vec<f64>,
    /// 与 `x_values` 等长
    pub y_values: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl Curve {
    /// 数据点数
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// y 最小值（空曲线返回 None）
    pub fn y_min(&self) -> Option<f64> {
        self.y_values.iter().copied().reduce(f64::min)
    }

    /// y 最大值（空曲线返回 None）
    pub fn y_max(&self) -> Option<f64> {
        self.y_values.iter().copied().reduce(f64::max)
    }

    /// 以 (x, y) 对迭代
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values
            .iter()
            .copied()
            .zip(self.y_values.iter().copied())
    }
}

/// 一张图的共享坐标范围和刻度
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlan {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}
