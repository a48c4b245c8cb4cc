use std::fmt::{Display, Formatter};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    // Defined for completeness; never chosen by the selector
    Kanji = 0b1000,
}

impl Mode {
    /// Picks the narrowest mode able to hold every byte of `data`.
    pub fn select(data: &[u8]) -> Self {
        if !data.is_empty() && data.iter().all(|&b| Self::Numeric.contains(b)) {
            Self::Numeric
        } else if data.iter().all(|&b| Self::Alphanumeric.contains(b)) {
            Self::Alphanumeric
        } else {
            Self::Byte
        }
    }

    pub fn indicator(self) -> u8 {
        self as u8
    }

    pub fn contains(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARS.contains(&byte),
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    // Characters packed together into one chunk
    pub fn chunk_size(self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric => 2,
            Self::Byte | Self::Kanji => 1,
        }
    }

    pub fn encoded_chunk_len(self, chunk_len: usize) -> usize {
        match (self, chunk_len) {
            (Self::Numeric, 3) => 10,
            (Self::Numeric, 2) => 7,
            (Self::Numeric, 1) => 4,
            (Self::Alphanumeric, 2) => 11,
            (Self::Alphanumeric, 1) => 6,
            (Self::Byte, 1) => 8,
            (Self::Kanji, 1) => 13,
            _ => unreachable!("Invalid chunk length {chunk_len} for {self:?}"),
        }
    }

    /// Bit length of the packed payload for `char_len` characters.
    pub fn encoded_len(self, char_len: usize) -> usize {
        match self {
            Self::Numeric => (char_len / 3) * 10 + [0, 4, 7][char_len % 3],
            Self::Alphanumeric => (char_len / 2) * 11 + (char_len % 2) * 6,
            Self::Byte => char_len * 8,
            Self::Kanji => char_len * 13,
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => unreachable!("Kanji mode is never selected"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Byte => "byte",
            Self::Kanji => "kanji",
        };
        f.write_str(name)
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
