use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};
use std::str::FromStr;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::version_db::{alignment_positions, version_info, VersionInfo};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ECLevel {
    L = 0b01,
    #[default]
    M = 0b00,
    Q = 0b11,
    H = 0b10,
}

impl ECLevel {
    pub fn letter(self) -> char {
        match self {
            Self::L => 'L',
            Self::M => 'M',
            Self::Q => 'Q',
            Self::H => 'H',
        }
    }

    // Row of the format info table
    pub(crate) fn table_index(self) -> usize {
        match self {
            Self::L => 0,
            Self::M => 1,
            Self::Q => 2,
            Self::H => 3,
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s {
            "L" | "l" => Ok(Self::L),
            "M" | "m" => Ok(Self::M),
            "Q" | "q" => Ok(Self::Q),
            "H" | "h" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: u8) -> QRResult<Self> {
        version_info(version).map(|_| Self(version))
    }

    pub fn info(self) -> &'static VersionInfo {
        debug_assert!((1..=40).contains(&self.0), "Invalid version {}", self.0);
        &super::version_db::VERSION_TABLE[self.0 as usize - 1]
    }

    pub fn width(self) -> usize {
        self.info().size
    }

    pub fn total_codewords(self) -> usize {
        self.info().total_codewords
    }

    pub fn data_codewords(self) -> usize {
        self.info().data_codewords
    }

    pub fn ec_codewords(self) -> usize {
        self.info().ec_codewords
    }

    pub fn blocks(self) -> usize {
        self.info().blocks
    }

    pub fn data_bit_capacity(self) -> usize {
        self.data_codewords() << 3
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        alignment_positions(self.0).unwrap_or(&[])
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let tier = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
            Mode::Kanji => [8, 10, 12][tier],
        }
    }

    // Fixed dark module, absent on version 1
    pub fn dark_module(self) -> Option<(i16, i16)> {
        match self.0 {
            1 => None,
            v => Some((4 * v as i16 + 9, 8)),
        }
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl From<Color> for bool {
    fn from(clr: Color) -> Self {
        clr == Color::Dark
    }
}
