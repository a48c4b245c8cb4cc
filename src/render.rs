//! Renderers turning a finished [`QRCode`] into ASCII art, SVG markup, PNG
//! bytes or data URIs.

use std::fmt::Write as _;
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use thiserror::Error;

use crate::builder::{QRCode, QROptions};
use crate::common::error::{QRError, QRResult};

// Render config
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Quiet zone width in modules.
    pub margin: usize,
    /// Pixels per module for raster and vector output.
    pub scale: usize,
    pub dark: Rgb<u8>,
    pub light: Rgb<u8>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&QROptions::default())
    }
}

impl From<&QROptions> for RenderConfig {
    fn from(opts: &QROptions) -> Self {
        Self {
            margin: opts.margin,
            scale: opts.scale,
            dark: Rgb([0, 0, 0]),
            light: Rgb([255, 255, 255]),
        }
    }
}

impl RenderConfig {
    fn module_size(&self) -> usize {
        self.scale.max(1)
    }

    fn total_size(&self, code: &QRCode) -> usize {
        (code.size + 2 * self.margin) * self.module_size()
    }
}

/// Parses a `#rrggbb` colour.
pub fn parse_hex_color(s: &str) -> QRResult<Rgb<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(QRError::InvalidColor);
    }
    let channel =
        |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| QRError::InvalidColor);
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

fn to_hex_color(clr: Rgb<u8>) -> String {
    let [r, g, b] = clr.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}


// Renderers
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    QR(#[from] QRError),
}

pub trait Render {
    fn render(&self, code: &QRCode, cfg: &RenderConfig) -> Result<Vec<u8>, RenderError>;
}

/// Two characters per module, `██` for dark and spaces for light.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn to_str(&self, code: &QRCode, cfg: &RenderConfig) -> String {
        let w = code.size + 2 * cfg.margin;
        let blank = "  ".repeat(w);
        let pad = "  ".repeat(cfg.margin);

        let mut canvas = String::with_capacity((w * 2 + 1) * w);
        for _ in 0..cfg.margin {
            canvas.push_str(&blank);
            canvas.push('\n');
        }
        for row in &code.modules {
            canvas.push_str(&pad);
            for &dark in row {
                canvas.push_str(if dark { "██" } else { "  " });
            }
            canvas.push_str(&pad);
            canvas.push('\n');
        }
        for _ in 0..cfg.margin {
            canvas.push_str(&blank);
            canvas.push('\n');
        }
        canvas
    }
}

impl Render for AsciiRenderer {
    fn render(&self, code: &QRCode, cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
        Ok(self.to_str(code, cfg).into_bytes())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub xml_declaration: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { xml_declaration: true }
    }
}

impl SvgRenderer {
    pub fn to_str(&self, code: &QRCode, cfg: &RenderConfig) -> String {
        let total = cfg.total_size(code);
        let sz = cfg.module_size();
        let dark = to_hex_color(cfg.dark);

        let mut svg = String::new();
        if self.xml_declaration {
            svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total}\" height=\"{total}\" \
             viewBox=\"0 0 {total} {total}\">"
        );
        let _ = writeln!(
            svg,
            "  <rect width=\"{total}\" height=\"{total}\" fill=\"{}\"/>",
            to_hex_color(cfg.light)
        );
        for (r, row) in code.modules.iter().enumerate() {
            for (c, _) in row.iter().enumerate().filter(|&(_, &m)| m) {
                let x = (c + cfg.margin) * sz;
                let y = (r + cfg.margin) * sz;
                let _ = writeln!(
                    svg,
                    "  <rect x=\"{x}\" y=\"{y}\" width=\"{sz}\" height=\"{sz}\" fill=\"{dark}\"/>"
                );
            }
        }
        svg.push_str("</svg>");
        svg
    }
}

impl Render for SvgRenderer {
    fn render(&self, code: &QRCode, cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
        Ok(self.to_str(code, cfg).into_bytes())
    }
}

/// Rasterises `code` with the configured quiet zone, scale and colours.
pub fn to_image(code: &QRCode, cfg: &RenderConfig) -> RgbImage {
    let total = cfg.total_size(code) as u32;
    let sz = cfg.module_size() as u32;
    let qz = (cfg.margin * cfg.module_size()) as u32;
    let qr_sz = code.size as u32 * sz;

    ImageBuffer::from_fn(total, total, |x, y| {
        if x < qz || y < qz || x >= qz + qr_sz || y >= qz + qr_sz {
            return cfg.light;
        }
        let r = ((y - qz) / sz) as usize;
        let c = ((x - qz) / sz) as usize;
        if code.is_dark(r, c) {
            cfg.dark
        } else {
            cfg.light
        }
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl Render for PngRenderer {
    fn render(&self, code: &QRCode, cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        to_image(code, cfg).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Base64 data URI wrapping SVG markup (without XML declaration) or PNG bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DataUriRenderer {
    #[default]
    Svg,
    Png,
}

impl DataUriRenderer {
    pub fn to_str(&self, code: &QRCode, cfg: &RenderConfig) -> Result<String, RenderError> {
        let (mime, bytes) = match self {
            Self::Svg => {
                ("image/svg+xml", SvgRenderer { xml_declaration: false }.render(code, cfg)?)
            }
            Self::Png => ("image/png", PngRenderer.render(code, cfg)?),
        };
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }
}

impl Render for DataUriRenderer {
    fn render(&self, code: &QRCode, cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
        self.to_str(code, cfg).map(String::into_bytes)
    }
}
