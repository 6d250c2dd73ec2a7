//! # EPS 序列化
//!
//! 把 `VectorBackend` 记录的图元写成 EPSF-3.0 文档。
//! Helvetica 重编码为 ISOLatin1Encoding，希腊字母使用 Symbol 字体。
//!
//! ## 依赖关系
//! - 被 `chart/vector.rs` 调用
//! - 使用 `chart/glyphs.rs`

use crate::chart::glyphs::{escape_string, Face};
use crate::chart::vector::{fmt_num, Primitive, Rgbf};

use std::fmt::Write;

/// 重编码后的 Helvetica 字体名
const LATIN_FONT: &str = "/Helvetica-Latin1";

/// 生成完整 EPS 文档
pub fn render_eps(size: (u32, u32), primitives: &[Primitive]) -> String {
    let (w, h) = size;
    let mut out = String::new();

    out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    out.push_str("%%Creator: plotspec\n");
    let _ = writeln!(out, "%%BoundingBox: 0 0 {} {}", w, h);
    let _ = writeln!(out, "%%HiResBoundingBox: 0 0 {} {}", w, h);
    out.push_str("%%LanguageLevel: 2\n");
    out.push_str("%%Pages: 1\n");
    out.push_str("%%EndComments\n");

    out.push_str("%%BeginProlog\n");
    let _ = writeln!(
        out,
        "{} /Helvetica findfont dup length dict begin\n  {{1 index /FID ne {{def}} {{pop pop}} ifelse}} forall\n  /Encoding ISOLatin1Encoding def\n  currentdict\nend definefont pop",
        LATIN_FONT
    );
    out.push_str("%%EndProlog\n");

    out.push_str("%%Page: 1 1\n");
    out.push_str("1 setlinejoin 1 setlinecap\n");

    for primitive in primitives {
        write_primitive(&mut out, primitive);
    }

    out.push_str("showpage\n");
    out.push_str("%%EOF\n");
    out
}

fn set_color(out: &mut String, c: Rgbf) {
    let _ = writeln!(
        out,
        "{} {} {} setrgbcolor",
        fmt_color(c.0),
        fmt_color(c.1),
        fmt_color(c.2)
    );
}

fn fmt_color(v: f64) -> String {
    format!("{:.3}", v)
}

fn write_path(out: &mut String, points: &[(f64, f64)]) {
    out.push_str("newpath\n");
    for (i, (x, y)) in points.iter().enumerate() {
        let op = if i == 0 { "moveto" } else { "lineto" };
        let _ = writeln!(out, "{} {} {}", fmt_num(*x), fmt_num(*y), op);
    }
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Stroke {
            points,
            color,
            width,
            closed,
        } => {
            set_color(out, *color);
            let _ = writeln!(out, "{} setlinewidth", fmt_num(*width));
            write_path(out, points);
            if *closed {
                out.push_str("closepath\n");
            }
            out.push_str("stroke\n");
        }
        Primitive::Fill { points, color } => {
            set_color(out, *color);
            write_path(out, points);
            out.push_str("closepath fill\n");
        }
        Primitive::Circle {
            center,
            radius,
            color,
            width,
            fill,
        } => {
            set_color(out, *color);
            let _ = writeln!(
                out,
                "newpath {} {} {} 0 360 arc closepath",
                fmt_num(center.0),
                fmt_num(center.1),
                fmt_num(*radius)
            );
            if *fill {
                out.push_str("fill\n");
            } else {
                let _ = writeln!(out, "{} setlinewidth stroke", fmt_num(*width));
            }
        }
        Primitive::Text {
            runs,
            origin,
            angle,
            size,
            color,
        } => {
            set_color(out, *color);
            out.push_str("gsave\n");
            let _ = writeln!(out, "{} {} translate", fmt_num(origin.0), fmt_num(origin.1));
            if *angle != 0.0 {
                let _ = writeln!(out, "{} rotate", fmt_num(*angle));
            }
            out.push_str("0 0 moveto\n");
            for run in runs {
                let font = match run.face {
                    Face::Helvetica => LATIN_FONT,
                    Face::Symbol => "/Symbol",
                };
                let _ = writeln!(
                    out,
                    "{} findfont {} scalefont setfont ({}) show",
                    font,
                    fmt_num(*size),
                    escape_string(&run.bytes)
                );
            }
            out.push_str("grestore\n");
        }
    }
}
