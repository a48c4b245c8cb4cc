pub mod encoder;
pub mod types;

pub use encoder::*;
pub use types::*;

// Codec proptesting
//------------------------------------------------------------------------------

#[cfg(test)]
mod codec_proptests {
    use proptest::prelude::*;

    use super::{encode, encode_with_version, Mode};
    use crate::common::metadata::Version;

    proptest! {
        #[test]
        fn proptest_stream_fills_capacity(data in "\\PC{0,50}") {
            let (bs, ver) = encode(data.as_bytes()).unwrap();
            prop_assert_eq!(bs.len(), ver.data_bit_capacity());
            prop_assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn proptest_stream_header(data in "[0-9A-Z]{1,100}", v in 10u8..=40) {
            let ver = Version::new(v).unwrap();
            let bs = encode_with_version(data.as_bytes(), ver).unwrap();
            let mode = Mode::select(data.as_bytes());
            let header = bs.to_string();
            let cnt_bits = ver.char_cnt_bits(mode);
            let exp = format!("{:04b}{:0cnt_bits$b}", mode.indicator(), data.len());
            prop_assert_eq!(&header[..4 + cnt_bits], exp);
        }
    }
}
