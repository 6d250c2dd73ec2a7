//! # 图表导出
//!
//! 按输出格式选择后端并写出文件。
//!
//! ## 格式
//! - SVG: plotters `SVGBackend`
//! - EPS / PDF: `VectorBackend`，完整矢量场景，无栅格回退
//! - PNG / JPEG: `BitMapBackend` 以 2 倍分辨率渲染到 RGB 缓冲，
//!   再由 `image` 编码（PNG 无损，JPEG 质量 95）
//!
//! ## 依赖关系
//! - 被 `chart/mod.rs` 调用
//! - 使用 `chart/render.rs` 绘制，`chart/vector.rs` 输出矢量格式
//! - 使用 `image` 编码位图

use crate::chart::render::draw_chart;
use crate::chart::spec::ChartSpec;
use crate::chart::vector::{VectorBackend, VectorFormat};
use crate::error::{PlotspecError, Result};
use crate::models::OutputFormat;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters_backend::DrawingErrorKind;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 位图输出的放大倍数
pub const RASTER_SCALE: u32 = 2;

/// JPEG 压缩质量
pub const JPEG_QUALITY: u8 = 95;

/// 导出图表到 `path`
pub fn export_chart(spec: &ChartSpec, format: OutputFormat, path: &Path) -> Result<()> {
    let size = (spec.style.width, spec.style.height);

    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, spec, 1.0)?;
            root.present()
                .map_err(|e| PlotspecError::RenderError(e.to_string()))?;
        }
        OutputFormat::Eps | OutputFormat::Pdf => {
            let vector_format = if format == OutputFormat::Eps {
                VectorFormat::Eps
            } else {
                VectorFormat::Pdf
            };
            let root = VectorBackend::new(path, size, vector_format).into_drawing_area();
            draw_chart(&root, spec, 1.0)?;
            root.present().map_err(|e| match e {
                DrawingAreaErrorKind::BackendError(DrawingErrorKind::DrawingError(source)) => {
                    PlotspecError::FileWriteError {
                        path: path.display().to_string(),
                        source,
                    }
                }
                other => PlotspecError::RenderError(other.to_string()),
            })?;
        }
        OutputFormat::Png | OutputFormat::Jpeg => {
            let image = rasterize(spec)?;
            encode_raster(&image, format, path)?;
        }
    }

    Ok(())
}

/// 以 `RASTER_SCALE` 倍分辨率渲染为 RGB 图像
pub fn rasterize(spec: &ChartSpec) -> Result<RgbImage> {
    let width = spec.style.width * RASTER_SCALE;
    let height = spec.style.height * RASTER_SCALE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, spec, RASTER_SCALE as f64)?;
        root.present()
            .map_err(|e| PlotspecError::RenderError(e.to_string()))?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| PlotspecError::RenderError("raster buffer size mismatch".to_string()))
}

/// 编码位图：PNG 无损，JPEG 使用固定质量
pub fn encode_raster(image: &RgbImage, format: OutputFormat, path: &Path) -> Result<()> {
    if format.is_vector() {
        return Err(PlotspecError::UnsupportedFormat(format.to_string()));
    }

    if format == OutputFormat::Png {
        image.save_with_format(path, ImageFormat::Png)?;
    } else {
        let write_error = |source| PlotspecError::FileWriteError {
            path: path.display().to_string(),
            source,
        };
        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(image)?;
        writer.flush().map_err(write_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::{compose_chart, tests as fixtures};

    fn gradient() -> RgbImage {
        RgbImage::from_fn(40, 20, |x, y| image::Rgb([(x * 6) as u8, (y * 12) as u8, 128]))
    }

    #[test]
    fn test_png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let img = gradient();
        encode_raster(&img, OutputFormat::Png, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_jpeg_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.jpg");
        encode_raster(&gradient(), OutputFormat::Jpeg, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 20));
    }

    #[test]
    fn test_raster_rejects_vector_format() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_raster(&gradient(), OutputFormat::Svg, &dir.path().join("x.svg"));
        assert!(matches!(result, Err(PlotspecError::UnsupportedFormat(_))));
    }

    fn benzene_chart() -> ChartSpec {
        compose_chart(
            &[fixtures::curve(0.0)],
            &fixtures::plan(),
            &fixtures::params_with_labels(&["benzene"]),
        )
        .unwrap()
    }

    #[test]
    fn test_export_png_at_double_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        export_chart(&benzene_chart(), OutputFormat::Png, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2000, 1400));
    }

    #[test]
    fn test_export_jpeg_at_double_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.jpg");
        export_chart(&benzene_chart(), OutputFormat::Jpeg, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2000, 1400));
    }

    #[test]
    fn test_export_svg_contains_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        export_chart(&benzene_chart(), OutputFormat::Svg, &path).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<svg"));
        assert!(doc.contains("benzene"));
        assert!(doc.contains("Wavelength (nm)"));
    }

    #[test]
    fn test_export_pdf_and_eps() {
        let dir = tempfile::tempdir().unwrap();
        let spec = benzene_chart();

        let pdf = dir.path().join("plot.pdf");
        export_chart(&spec, OutputFormat::Pdf, &pdf).unwrap();
        let bytes = std::fs::read(&pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes[bytes.len().saturating_sub(32)..]
            .windows(5)
            .any(|w| w == b"%%EOF"));

        let eps = dir.path().join("plot.eps");
        export_chart(&spec, OutputFormat::Eps, &eps).unwrap();
        let doc = std::fs::read_to_string(&eps).unwrap();
        assert!(doc.contains("%%BoundingBox: 0 0 1000 700"));
        assert!(doc.contains("(benzene) show"));
    }
}
