//! # 矢量绘图后端
//!
//! 实现 `plotters_backend::DrawingBackend`，把绘图调用记录为与设备无关的图元，
//! 在 `present()` 时序列化为 EPS 或 PDF 并写入文件。
//!
//! 坐标在记录时即翻转为 PostScript/PDF 的左下角原点。
//! 完全透明的图元直接丢弃；不生成任何栅格化回退。
//! 只有显式 `present()` 才写文件，绘制中途出错不会留下残缺文档。
//!
//! ## 依赖关系
//! - 被 `chart/export.rs` 使用
//! - 使用 `chart/glyphs.rs` 编码文字、估计字宽
//! - 使用 `chart/eps.rs`, `chart/pdf.rs` 序列化

use crate::chart::glyphs::{self, GlyphRun};
use crate::chart::{eps, pdf};

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use std::path::{Path, PathBuf};

/// 矢量文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFormat {
    Eps,
    Pdf,
}

/// 图元颜色 (0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgbf(pub f64, pub f64, pub f64);

impl From<BackendColor> for Rgbf {
    fn from(c: BackendColor) -> Self {
        let (r, g, b) = c.rgb;
        Rgbf(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

/// 已翻转坐标的矢量图元
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// 折线描边
    Stroke {
        points: Vec<(f64, f64)>,
        color: Rgbf,
        width: f64,
        closed: bool,
    },
    /// 多边形填充
    Fill { points: Vec<(f64, f64)>, color: Rgbf },
    /// 圆
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgbf,
        width: f64,
        fill: bool,
    },
    /// 文字：`origin` 为基线起点，`angle` 为逆时针角度（度）
    Text {
        runs: Vec<GlyphRun>,
        origin: (f64, f64),
        angle: f64,
        size: f64,
        color: Rgbf,
    },
}

/// 记录图元的矢量后端
pub struct VectorBackend {
    path: PathBuf,
    size: (u32, u32),
    format: VectorFormat,
    primitives: Vec<Primitive>,
    saved: bool,
}

impl VectorBackend {
    pub fn new(path: &Path, size: (u32, u32), format: VectorFormat) -> Self {
        Self {
            path: path.to_path_buf(),
            size,
            format,
            primitives: Vec::new(),
            saved: false,
        }
    }

    /// 已记录的图元
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// 按格式序列化当前图元
    pub fn render(&self) -> std::io::Result<Vec<u8>> {
        match self.format {
            VectorFormat::Eps => Ok(eps::render_eps(self.size, &self.primitives).into_bytes()),
            VectorFormat::Pdf => pdf::render_pdf(self.size, &self.primitives)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string())),
        }
    }

    fn flip(&self, (x, y): BackendCoord) -> (f64, f64) {
        (x as f64, self.size.1 as f64 - y as f64)
    }

    fn push_stroke<S: BackendStyle>(&mut self, points: Vec<(f64, f64)>, style: &S, closed: bool) {
        let color = style.color();
        if color.alpha <= 0.0 || points.len() < 2 {
            return;
        }
        self.primitives.push(Primitive::Stroke {
            points,
            color: color.into(),
            width: style.stroke_width().max(1) as f64,
            closed,
        });
        self.saved = false;
    }

    fn push_fill(&mut self, points: Vec<(f64, f64)>, color: BackendColor) {
        if color.alpha <= 0.0 || points.len() < 3 {
            return;
        }
        self.primitives.push(Primitive::Fill {
            points,
            color: color.into(),
        });
        self.saved = false;
    }
}

impl DrawingBackend for VectorBackend {
    type ErrorType = std::io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<std::io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<std::io::Error>> {
        if self.saved {
            return Ok(());
        }
        let bytes = self.render().map_err(DrawingErrorKind::DrawingError)?;
        std::fs::write(&self.path, bytes).map_err(DrawingErrorKind::DrawingError)?;
        self.saved = true;
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let (x, y) = self.flip(point);
        self.push_fill(
            vec![(x, y), (x + 1.0, y), (x + 1.0, y - 1.0), (x, y - 1.0)],
            color,
        );
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let points = vec![self.flip(from), self.flip(to)];
        self.push_stroke(points, style, false);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let (x0, y0) = self.flip(upper_left);
        let (x1, y1) = self.flip(bottom_right);
        let corners = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
        if fill {
            self.push_fill(corners, style.color());
        } else {
            self.push_stroke(corners, style, true);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let points: Vec<(f64, f64)> = path.into_iter().map(|p| self.flip(p)).collect();
        self.push_stroke(points, style, false);
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.primitives.push(Primitive::Circle {
            center: self.flip(center),
            radius: radius as f64,
            color: color.into(),
            width: style.stroke_width().max(1) as f64,
            fill,
        });
        self.saved = false;
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let points: Vec<(f64, f64)> = vert.into_iter().map(|p| self.flip(p)).collect();
        self.push_fill(points, style.color());
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 || text.is_empty() {
            return Ok(());
        }

        let size = style.size();
        let width = glyphs::text_width(text, size);
        let anchor = style.anchor();

        // 文字局部坐标系中的偏移（y 向上）
        let dx = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dy = match anchor.v_pos {
            VPos::Top => -glyphs::ASCENT_EM * size,
            VPos::Center => -(glyphs::ASCENT_EM - glyphs::DESCENT_EM) * size / 2.0,
            VPos::Bottom => glyphs::DESCENT_EM * size,
        };

        let angle: f64 = match style.transform() {
            FontTransform::None => 0.0,
            FontTransform::Rotate90 => -90.0,
            FontTransform::Rotate180 => 180.0,
            FontTransform::Rotate270 => 90.0,
        };

        let (sin, cos) = angle.to_radians().sin_cos();
        let (x, y) = self.flip(pos);
        let origin = (x + dx * cos - dy * sin, y + dx * sin + dy * cos);

        self.primitives.push(Primitive::Text {
            runs: glyphs::encode_runs(text),
            origin,
            angle,
            size,
            color: color.into(),
        });
        self.saved = false;
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<std::io::Error>> {
        let size = style.size();
        let width = glyphs::text_width(text, size).ceil() as u32;
        Ok((width, size.ceil() as u32))
    }
}

/// 数值格式化：两位小数并去掉多余的零
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}
