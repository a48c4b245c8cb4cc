use super::QR;
use crate::common::metadata::{ECLevel, Version};

/// Finished symbol handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    /// Row major grid, `true` for dark modules.
    pub modules: Vec<Vec<bool>>,
    pub version: Version,
    /// Modules per side, without quiet zone.
    pub size: usize,
    pub ec_level: ECLevel,
}

impl QRCode {
    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        self.modules[r][c]
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().flatten().filter(|&&m| m).count()
    }
}

impl From<&QR> for QRCode {
    fn from(qr: &QR) -> Self {
        Self {
            modules: qr.to_modules(),
            version: qr.version(),
            size: qr.width(),
            ec_level: qr.ec_level(),
        }
    }
}
