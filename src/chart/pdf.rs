//! # PDF 序列化
//!
//! 通过 `printpdf` 把 `VectorBackend` 记录的图元写成单页 PDF：
//! 页面尺寸等于画布尺寸（1 单位 = 1 pt），文字使用内置 Helvetica 和 Symbol 字体，
//! 折线和多边形写成路径，圆用贝塞尔曲线近似。
//!
//! ## 依赖关系
//! - 被 `chart/vector.rs` 调用
//! - 使用 `chart/glyphs.rs` 的字形分段
//! - 使用 `printpdf` 生成文档

use crate::chart::glyphs::{Face, GlyphRun};
use crate::chart::vector::{Primitive, Rgbf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineCapStyle, LineJoinStyle, Mm, PdfDocument,
    PdfLayerReference, Point, Pt, Rgb, TextMatrix,
};

/// 生成完整 PDF 文档
pub fn render_pdf(
    size: (u32, u32),
    primitives: &[Primitive],
) -> std::result::Result<Vec<u8>, printpdf::Error> {
    let doc = PdfDocument::empty("plotspec");
    let (page, layer) = doc.add_page(
        Mm::from(Pt(size.0 as f64)),
        Mm::from(Pt(size.1 as f64)),
        "Chart",
    );
    let fonts = Fonts {
        helvetica: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        symbol: doc.add_builtin_font(BuiltinFont::Symbol)?,
    };

    let layer = doc.get_page(page).get_layer(layer);
    layer.set_line_join_style(LineJoinStyle::Round);
    layer.set_line_cap_style(LineCapStyle::Round);

    for primitive in primitives {
        match primitive {
            Primitive::Stroke {
                points,
                color,
                width,
                closed,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*width);
                layer.add_shape(Line {
                    points: points.iter().map(|p| (point(*p), false)).collect(),
                    is_closed: *closed,
                    has_fill: false,
                    has_stroke: true,
                    is_clipping_path: false,
                });
            }
            Primitive::Fill { points, color } => {
                layer.set_fill_color(pdf_color(*color));
                layer.add_shape(Line {
                    points: points.iter().map(|p| (point(*p), false)).collect(),
                    is_closed: true,
                    has_fill: true,
                    has_stroke: false,
                    is_clipping_path: false,
                });
            }
            Primitive::Circle {
                center,
                radius,
                color,
                width,
                fill,
            } => {
                if *fill {
                    layer.set_fill_color(pdf_color(*color));
                } else {
                    layer.set_outline_color(pdf_color(*color));
                    layer.set_outline_thickness(*width);
                }
                layer.add_shape(Line {
                    points: printpdf::utils::calculate_points_for_circle(
                        Pt(*radius),
                        Pt(center.0),
                        Pt(center.1),
                    ),
                    is_closed: true,
                    has_fill: *fill,
                    has_stroke: !*fill,
                    is_clipping_path: false,
                });
            }
            Primitive::Text {
                runs,
                origin,
                angle,
                size,
                color,
            } => {
                layer.begin_text_section();
                layer.set_fill_color(pdf_color(*color));
                layer.set_text_matrix(TextMatrix::TranslateRotate(
                    Pt(origin.0),
                    Pt(origin.1),
                    *angle,
                ));
                write_runs(&layer, runs, *size, &fonts);
                layer.end_text_section();
            }
        }
    }

    doc.save_to_bytes()
}

/// 文档内注册的两种内置字体
struct Fonts {
    helvetica: IndirectFontRef,
    symbol: IndirectFontRef,
}

/// 在已打开的文字段内依次写出各字体分段
fn write_runs(layer: &PdfLayerReference, runs: &[GlyphRun], size: f64, fonts: &Fonts) {
    for run in runs {
        let font = match run.face {
            Face::Helvetica => &fonts.helvetica,
            Face::Symbol => &fonts.symbol,
        };
        // 字节已按单字节编码，逐字节还原为字符
        let text: String = run.bytes.iter().map(|&b| b as char).collect();
        layer.set_font(font, size);
        layer.write_text(text, font);
    }
}

fn point((x, y): (f64, f64)) -> Point {
    Point::new(Mm::from(Pt(x)), Mm::from(Pt(y)))
}

fn pdf_color(c: Rgbf) -> Color {
    Color::Rgb(Rgb::new(c.0, c.1, c.2, None))
}
