use tracing::debug;

use super::types::{Mode, PADDING_CODEWORDS};
use crate::common::bit_utils::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Encoder
//------------------------------------------------------------------------------

/// Encodes `data` into a padded bit stream sized for the smallest fitting version.
pub fn encode(data: &[u8]) -> QRResult<(BitStream, Version)> {
    let mode = Mode::select(data);
    let ver = find_min_version(data, mode)?;
    let bs = encode_with_mode(data, mode, ver)?;
    Ok((bs, ver))
}

/// Encodes `data` into a padded bit stream for a caller chosen version.
pub fn encode_with_version(data: &[u8], ver: Version) -> QRResult<BitStream> {
    encode_with_mode(data, Mode::select(data), ver)
}

fn encode_with_mode(data: &[u8], mode: Mode, ver: Version) -> QRResult<BitStream> {
    let bcap = ver.data_bit_capacity();
    let sz = ver.mode_bits() + ver.char_cnt_bits(mode) + mode.encoded_len(data.len());
    if sz > bcap {
        debug!(version = *ver, required = sz, capacity = bcap, "Data overflows version capacity");
        return Err(QRError::DataTooLarge);
    }

    let mut bs = BitStream::new(bcap);
    push_segment(data, mode, ver, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    debug!(%mode, version = *ver, payload_bits = sz, "Encoded data stream");
    Ok(bs)
}

// Sizes the stream with version 1 count indicator widths, which undercounts by
// a few bits once the data crosses into version 10 or 27.
// TODO: Re-estimate with the resolved version's count indicator width.
fn find_min_version(data: &[u8], mode: Mode) -> QRResult<Version> {
    let est = Version::MIN;
    let sz = est.mode_bits() + est.char_cnt_bits(mode) + mode.encoded_len(data.len());
    (*Version::MIN..=*Version::MAX)
        .filter_map(|v| Version::new(v).ok())
        .find(|ver| ver.data_bit_capacity() >= sz)
        .ok_or(QRError::DataTooLarge)
}


// Writer for encoded data
//------------------------------------------------------------------------------

pub fn push_segment(data: &[u8], mode: Mode, ver: Version, out: &mut BitStream) {
    push_header(data.len(), mode, ver, out);
    for bit in encode_payload(data, mode) {
        out.push(bit);
    }
}

fn push_header(char_cnt: usize, mode: Mode, ver: Version, out: &mut BitStream) {
    out.push_bits(mode.indicator(), ver.mode_bits());
    let len_bits = ver.char_cnt_bits(mode);
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(char_cnt as u16, len_bits);
}

/// Packs the payload alone, without mode or count indicators.
pub fn encode_payload(data: &[u8], mode: Mode) -> BitStream {
    let mut bs = BitStream::new(mode.encoded_len(data.len()));
    for chunk in data.chunks(mode.chunk_size()) {
        bs.push_bits(mode.encode_chunk(chunk), mode.encoded_chunk_len(chunk.len()));
    }
    bs
}

pub fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0u8, term_len);
    }
}

pub fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    debug_assert!(out.len() & 7 == 0, "Bit offset should be zero before padding codewords");

    let remain_byte_capacity = out.remaining() >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
