mod code;
mod qr;

pub use code::QRCode;
pub(crate) use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use tracing::debug;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version},
    ec::ecc,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

// Options
//------------------------------------------------------------------------------

/// Generation settings. `version` 0 picks the smallest fitting version;
/// `margin` and `scale` are only read by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QROptions {
    pub ec_level: ECLevel,
    pub version: u8,
    pub margin: usize,
    pub scale: usize,
}

impl Default for QROptions {
    fn default() -> Self {
        Self { ec_level: ECLevel::M, version: 0, margin: 4, scale: 1 }
    }
}

// Builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    data: &'a str,
    options: QROptions,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self::with_options(data, &QROptions::default())
    }

    pub fn with_options(data: &'a str, options: &QROptions) -> Self {
        Self { data, options: *options, mask: None }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.options.version = *version;
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.options.version = 0;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.options.ec_level = ec_level;
        self
    }

    pub fn margin(&mut self, margin: usize) -> &mut Self {
        self.options.margin = margin;
        self
    }

    pub fn scale(&mut self, scale: usize) -> &mut Self {
        self.options.scale = scale;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn options(&self) -> &QROptions {
        &self.options
    }

    pub fn metadata(&self) -> String {
        match self.options.version {
            0 => format!("{{ Version: Auto, Ec level: {} }}", self.options.ec_level),
            v => format!("{{ Version: {v}, Ec level: {} }}", self.options.ec_level),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QRCode> {
        self.build_qr().map(|qr| QRCode::from(&qr))
    }

    pub(crate) fn build_qr(&self) -> QRResult<QR> {
        let mut qr = self.build_unmasked()?;
        let version = qr.version();

        let mask = match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying forced mask");
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };
        qr.draw_format_info(mask);

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            version = *version,
            ec_level = %qr.ec_level(),
            mask = *mask,
            balance = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }

    // Function patterns and placed codewords, before masking and format info
    fn build_unmasked(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        let data = self.data.as_bytes();

        let (encoded_data, version) = match self.options.version {
            0 => {
                debug!("Finding best version");
                encode(data)?
            }
            v => {
                let version = Version::new(v)?;
                (encode_with_version(data, version)?, version)
            }
        };

        debug!(
            version = *version,
            ec_codewords = version.ec_codewords(),
            blocks = version.blocks(),
            "Computing error correction codewords"
        );
        let ec_codewords = ecc(encoded_data.data(), version.ec_codewords())?;
        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(encoded_data.data());
        payload.extend(&ec_codewords);

        debug!("Drawing function patterns and encoding region");
        let mut qr = QR::new(version, self.options.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);
        Ok(qr)
    }
}

/// Builds the symbol for `data` with the given options.
pub fn generate(data: &str, options: &QROptions) -> QRResult<QRCode> {
    QRBuilder::with_options(data, options).build()
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::{generate, QRBuilder, QROptions};
    use crate::common::codec::encode;
    use crate::common::ec::{generator_polynomial, remainder};
    use crate::common::error::QRError;
    use crate::common::iter::EncRegionIter;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    #[test_case("HELLO", 1)]
    #[test_case("1", 1)]
    #[test_case("", 1)]
    #[test_case("Hello, world!", 1)]
    #[test_case(&"A".repeat(100), 4)]
    #[test_case(&"https://example.com/".repeat(20), 13)]
    fn test_generate_version(data: &str, exp: u8) {
        let code = generate(data, &QROptions::default()).unwrap();
        assert_eq!(*code.version, exp);
        assert_eq!(code.size, 17 + 4 * exp as usize);
        assert_eq!(code.modules.len(), code.size);
        assert_eq!(code.ec_level, ECLevel::M);
    }

    #[test]
    fn test_generate_explicit_version() {
        let opts = QROptions { version: 5, ..QROptions::default() };
        assert_eq!(*generate("HELLO", &opts).unwrap().version, 5);

        let opts = QROptions { version: 41, ..QROptions::default() };
        assert_eq!(generate("HELLO", &opts), Err(QRError::InvalidVersion));

        let opts = QROptions { version: 1, ..QROptions::default() };
        assert_eq!(generate(&"a".repeat(18), &opts), Err(QRError::DataTooLarge));
    }

    #[test]
    fn test_generate_too_large() {
        let opts = QROptions { ec_level: ECLevel::H, ..QROptions::default() };
        assert_eq!(generate(&"a".repeat(3000), &opts), Err(QRError::DataTooLarge));
    }

    #[test]
    fn test_forced_mask() {
        let mask = MaskPattern::new(3).unwrap();
        let qr = QRBuilder::new("HELLO").mask(mask).build_qr().unwrap();
        assert_eq!(qr.mask(), Some(mask));
    }

    #[test_case("HELLO WORLD", ECLevel::L)]
    #[test_case("01234567", ECLevel::M)]
    #[test_case("hello, world", ECLevel::H)]
    fn test_payload_round_trip_v1(data: &str, ecl: ECLevel) {
        let mask = MaskPattern::new(2).unwrap();
        let mut qr = QRBuilder::new(data).ec_level(ecl).mask(mask).build_qr().unwrap();
        qr.apply_mask(mask);

        let ver = Version::new(1).unwrap();
        let bits = EncRegionIter::data_cells(ver).map(|(r, c)| bool::from(qr.get(r, c)));
        let bytes = bits
            .collect::<Vec<_>>()
            .chunks(8)
            .map(|b| b.iter().fold(0u8, |n, &bit| (n << 1) | bit as u8))
            .collect::<Vec<_>>();
        assert_eq!(bytes.len(), ver.total_codewords());

        let (encoded, _) = encode(data.as_bytes()).unwrap();
        assert_eq!(&bytes[..ver.data_codewords()], encoded.data());
        let rem = remainder(&bytes, &generator_polynomial(ver.ec_codewords())).unwrap();
        assert!(rem.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let opts = QROptions::default();
        assert_eq!(generate("determinism", &opts), generate("determinism", &opts));
    }
}
