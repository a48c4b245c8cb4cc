use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::Rgb;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrmint::render::{
    parse_hex_color, AsciiRenderer, DataUriRenderer, PngRenderer, Render, RenderConfig,
    SvgRenderer,
};
use qrmint::{generate, ECLevel, QROptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Svg,
    Png,
    Dataurl,
}

/// Generate a QR code from text.
#[derive(Parser, Debug)]
#[command(name = "qrmint", about)]
struct Cli {
    /// Text to encode
    #[arg(value_name = "TEXT", required_unless_present = "text", conflicts_with = "text")]
    input: Option<String>,

    /// Text to encode, in place of the positional argument
    #[arg(short, long)]
    text: Option<String>,

    /// Output file, stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Error correction level (L, M, Q or H)
    #[arg(short, long = "error-correction", visible_alias = "ec-level", default_value = "M")]
    ec_level: ECLevel,

    /// QR version 1-40, 0 picks the smallest that fits
    #[arg(short = 'v', long = "version", default_value_t = 0,
          value_parser = clap::value_parser!(u8).range(0..=40))]
    qr_version: u8,

    /// Quiet zone width in modules
    #[arg(short, long, default_value_t = 4)]
    margin: usize,

    /// Pixels per module
    #[arg(short, long, default_value_t = 1)]
    scale: usize,

    /// Dark module colour as #rrggbb
    #[arg(long, default_value = "#000000", value_parser = parse_hex_color)]
    dark_color: Rgb<u8>,

    /// Light module colour as #rrggbb
    #[arg(long, default_value = "#ffffff", value_parser = parse_hex_color)]
    light_color: Rgb<u8>,
}

impl Cli {
    fn text(&self) -> Result<&str> {
        self.text.as_deref().or(self.input.as_deref()).context("No text to encode")
    }

    fn options(&self) -> QROptions {
        QROptions {
            ec_level: self.ec_level,
            version: self.qr_version,
            margin: self.margin,
            scale: self.scale,
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            dark: self.dark_color,
            light: self.light_color,
            ..RenderConfig::from(&self.options())
        }
    }

    fn renderer(&self) -> Box<dyn Render> {
        match self.format {
            Format::Ascii => Box::new(AsciiRenderer),
            Format::Svg => Box::new(SvgRenderer::default()),
            Format::Png => Box::new(PngRenderer),
            Format::Dataurl => Box::new(DataUriRenderer::Svg),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let code = generate(cli.text()?, &cli.options()).context("Failed to generate QR code")?;
    info!(version = *code.version, size = code.size, "Generated QR code");

    let mut bytes = cli
        .renderer()
        .render(&code, &cli.render_config())
        .with_context(|| format!("Failed to render QR code as {:?}", cli.format))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Saved QR code");
        }
        None => {
            if matches!(cli.format, Format::Svg | Format::Dataurl) {
                bytes.push(b'\n');
            }
            io::stdout().write_all(&bytes).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
