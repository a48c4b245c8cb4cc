use super::error::{QRError, QRResult};

// Version descriptor
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct VersionInfo {
    pub version: u8,
    pub total_codewords: usize,
    pub ec_codewords: usize,
    pub data_codewords: usize,
    pub blocks: usize,
    pub size: usize,
}

const fn info(
    version: u8,
    total_codewords: usize,
    ec_codewords: usize,
    data_codewords: usize,
    blocks: usize,
) -> VersionInfo {
    VersionInfo {
        version,
        total_codewords,
        ec_codewords,
        data_codewords,
        blocks,
        size: 21 + 4 * (version as usize - 1),
    }
}

/// Looks up the capacity descriptor of a symbol version.
pub fn version_info(version: u8) -> QRResult<&'static VersionInfo> {
    match version {
        1..=40 => Ok(&VERSION_TABLE[version as usize - 1]),
        _ => Err(QRError::InvalidVersion),
    }
}

/// Alignment pattern centre coordinates of a symbol version.
pub fn alignment_positions(version: u8) -> QRResult<&'static [i16]> {
    match version {
        1..=40 => Ok(ALIGNMENT_PATTERN_POSITIONS[version as usize - 1]),
        _ => Err(QRError::InvalidVersion),
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static VERSION_TABLE: [VersionInfo; 40] = [
    info(1, 26, 7, 19, 1),
    info(2, 44, 10, 34, 1),
    info(3, 70, 15, 55, 1),
    info(4, 100, 20, 80, 1),
    info(5, 134, 26, 108, 1),
    info(6, 172, 36, 136, 2),
    info(7, 196, 40, 156, 2),
    info(8, 242, 48, 194, 2),
    info(9, 292, 60, 232, 2),
    info(10, 346, 72, 274, 2),
    info(11, 404, 80, 324, 4),
    info(12, 466, 96, 370, 4),
    info(13, 532, 104, 428, 4),
    info(14, 581, 120, 461, 4),
    info(15, 655, 132, 523, 6),
    info(16, 733, 144, 589, 6),
    info(17, 815, 168, 647, 6),
    info(18, 901, 180, 721, 6),
    info(19, 991, 196, 795, 7),
    info(20, 1085, 224, 861, 8),
    info(21, 1156, 224, 932, 8),
    info(22, 1258, 252, 1006, 9),
    info(23, 1364, 270, 1094, 9),
    info(24, 1474, 300, 1174, 10),
    info(25, 1588, 312, 1276, 12),
    info(26, 1706, 336, 1370, 12),
    info(27, 1828, 360, 1468, 12),
    info(28, 1921, 390, 1531, 13),
    info(29, 2051, 420, 1631, 14),
    info(30, 2185, 450, 1735, 15),
    info(31, 2323, 480, 1843, 16),
    info(32, 2465, 510, 1955, 17),
    info(33, 2611, 540, 2071, 18),
    info(34, 2761, 570, 2191, 19),
    info(35, 2915, 570, 2345, 19),
    info(36, 3073, 600, 2473, 20),
    info(37, 3235, 630, 2605, 21),
    info(38, 3401, 660, 2741, 22),
    info(39, 3571, 720, 2851, 24),
    info(40, 3745, 750, 2995, 25),
];

pub static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

pub static FINDER_PATTERN: [[u8; 7]; 7] = [
    [1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1],
];

pub static FORMAT_INFO_BIT_LEN: usize = 15;

// Rows in L, M, Q, H order; columns by mask id
pub static FORMAT_INFO_TABLE: [[u16; 8]; 4] = [
    [
        0b111011111000100,
        0b111001011110011,
        0b111110110101010,
        0b111100010011101,
        0b110011000101111,
        0b110001100011000,
        0b110110001000001,
        0b110100101110110,
    ],
    [
        0b101010000010010,
        0b101000100100101,
        0b101111001111100,
        0b101101101001011,
        0b100010111111001,
        0b100000011001110,
        0b100111110010111,
        0b100101010100000,
    ],
    [
        0b011010101011111,
        0b011000001101000,
        0b011111100110001,
        0b011101000000110,
        0b010010010110100,
        0b010000110000011,
        0b010111011011010,
        0b010101111101101,
    ],
    [
        0b001011010001001,
        0b001001110111110,
        0b001110011100111,
        0b001100111010000,
        0b000011101100010,
        0b000001001010101,
        0b000110100001100,
        0b000100000111011,
    ],
];

// Format info for EC level M with mask 0
pub static FORMAT_INFO_FALLBACK: u16 = 0b101010000010010;
