//! # 矢量输出的文字编码
//!
//! PostScript 和 PDF 使用内置 Type1 字体，不能直接写 Unicode：
//! - ASCII 与 Latin-1 字符 → Helvetica（PS 用 ISOLatin1Encoding，PDF 用 WinAnsiEncoding，A0-FF 段一致）
//! - 希腊字母 → Symbol 字体中对应的拉丁字母位置
//! - 上标数字与减号 → 近似的普通字符
//!
//! 另外给出 Helvetica 的近似字宽，使矢量后端不依赖系统字体。
//!
//! ## 依赖关系
//! - 被 `chart/vector.rs`, `chart/eps.rs`, `chart/pdf.rs` 使用

/// 内置字体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Helvetica,
    Symbol,
}

/// 同一字体下的一段已编码文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRun {
    pub face: Face,
    pub bytes: Vec<u8>,
}

/// 把文字拆分为按字体分段的字节串
pub fn encode_runs(text: &str) -> Vec<GlyphRun> {
    let mut runs: Vec<GlyphRun> = Vec::new();

    for c in text.chars() {
        let (face, byte) = encode_char(c);
        match runs.last_mut() {
            Some(run) if run.face == face => run.bytes.push(byte),
            _ => runs.push(GlyphRun {
                face,
                bytes: vec![byte],
            }),
        }
    }

    runs
}

fn encode_char(c: char) -> (Face, u8) {
    let code = c as u32;
    if (0x20..0x7F).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return (Face::Helvetica, code as u8);
    }

    if let Some(b) = symbol_code(c) {
        return (Face::Symbol, b);
    }

    let fallback = match c {
        '⁰' => b'0',
        '⁴' => b'4',
        '⁵' => b'5',
        '⁶' => b'6',
        '⁷' => b'7',
        '⁸' => b'8',
        '⁹' => b'9',
        '⁻' | '−' | '–' => b'-',
        '⁺' => b'+',
        '\t' => b' ',
        _ => b'?',
    };
    (Face::Helvetica, fallback)
}

/// 希腊字母在 Symbol 字体中的编码
fn symbol_code(c: char) -> Option<u8> {
    let b = match c {
        'Α' => b'A',
        'Β' => b'B',
        'Γ' => b'G',
        'Δ' => b'D',
        'Ε' => b'E',
        'Θ' => b'Q',
        'Λ' => b'L',
        'Π' => b'P',
        'Σ' => b'S',
        'Φ' => b'F',
        'Ψ' => b'Y',
        'Ω' => b'W',
        'α' => b'a',
        'β' => b'b',
        'γ' => b'g',
        'δ' => b'd',
        'ε' => b'e',
        'ζ' => b'z',
        'η' => b'h',
        'θ' => b'q',
        'κ' => b'k',
        'λ' => b'l',
        'μ' => b'm',
        'ν' => b'n',
        'π' => b'p',
        'ρ' => b'r',
        'σ' => b's',
        'τ' => b't',
        'φ' => b'f',
        'χ' => b'c',
        'ψ' => b'y',
        'ω' => b'w',
        _ => return None,
    };
    Some(b)
}

/// 转义为 PS/PDF 字符串字面量内容（不含外层括号）
pub fn escape_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out
}

/// Helvetica 近似字宽（单位 em）
fn char_width_em(c: char) -> f64 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '!' | 'i' | 'j' | 'l' | '|' | 'I' | '\'' | '·' => 0.278,
        '(' | ')' | '-' | 'r' | 't' | 'f' | '[' | ']' | '/' | '⁻' | '¹' | '²' | '³' => 0.333,
        'm' | 'M' | 'W' => 0.833,
        'w' => 0.722,
        '0'..='9' | 'a'..='z' | '?' | '+' | '=' | '°' => 0.556,
        'A'..='Z' => 0.667,
        _ => 0.6,
    }
}

/// 估计文字宽度（像素）
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().map(char_width_em).sum::<f64>() * size
}

/// Helvetica 上伸部高度（em）
pub const ASCENT_EM: f64 = 0.718;

/// Helvetica 下伸部深度（em）
pub const DESCENT_EM: f64 = 0.207;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_single_run() {
        let runs = encode_runs("Wavelength (nm)");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].face, Face::Helvetica);
        assert_eq!(runs[0].bytes, b"Wavelength (nm)".to_vec());
    }

    #[test]
    fn test_greek_switches_to_symbol() {
        let runs = encode_runs("Δε (L/(mol·cm))");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].face, Face::Symbol);
        assert_eq!(runs[0].bytes, b"De".to_vec());
        assert_eq!(runs[1].face, Face::Helvetica);
        // · 为 Latin-1 0xB7
        assert!(runs[1].bytes.contains(&0xB7));
    }

    #[test]
    fn test_superscripts() {
        let runs = encode_runs("cm⁻¹");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].bytes, vec![b'c', b'm', b'-', 0xB9]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_string(b"a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_string(&[0xB7]), "\\267");
    }

    #[test]
    fn test_text_width_scales() {
        let w = text_width("200", 14.0);
        assert!((w - 3.0 * 0.556 * 14.0).abs() < 1e-9);
        assert!(text_width("WWW", 10.0) > text_width("iii", 10.0));
    }
}
