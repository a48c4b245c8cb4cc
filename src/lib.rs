//! # qrmint
//!
//! A Rust library for generating QR codes with Reed-Solomon error correction,
//! penalty based mask selection and ASCII, SVG and PNG renderers.
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrmint::{generate, QROptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest fitting version, error correction level M
//! let code = generate("Hello, World!", &QROptions::default())?;
//! assert_eq!(code.size, 21);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrmint::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2)?)     // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)          // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)    // if not provided, picks the lowest penalty mask
//!     .build()?;
//!
//! assert_eq!(code.size, 25);
//! # Ok(())
//! # }
//! ```
//!
//! ### Rendering
//!
//! ```rust
//! use qrmint::render::{Render, RenderConfig, SvgRenderer};
//! use qrmint::{generate, QROptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = QROptions { scale: 4, ..QROptions::default() };
//! let code = generate("HELLO", &opts)?;
//! let svg = SvgRenderer::default().render(&code, &RenderConfig::from(&opts))?;
//! assert!(svg.starts_with(b"<?xml"));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! The level is recorded in the format information. Codeword counts come from a
//! single capacity table shared by all four levels.

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{generate, QRBuilder, QRCode, QROptions};
pub use common::bit_utils::to_binary;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
