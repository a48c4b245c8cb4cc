use super::metadata::Version;

// Function cell predicate
//------------------------------------------------------------------------------

/// Whether `(r, c)` holds a finder, separator, timing or format info module.
/// Alignment patterns are not reserved.
pub fn is_reserved(r: i16, c: i16, w: i16) -> bool {
    let finder = (r < 9 && c < 9) || (r < 9 && c >= w - 8) || (r >= w - 8 && c < 9);
    let timing = r == 6 || c == 6;
    let format = (r == 8 && (c < 9 || c >= w - 8)) || (c == 8 && (r < 9 || r >= w - 7));
    finder || timing || format
}

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every module in zigzag placement order, two columns at a time from
/// the right edge, hopping over the vertical timing column.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }

    /// Only the modules left free for data and error correction bits.
    pub fn data_cells(version: Version) -> impl Iterator<Item = (i16, i16)> {
        let w = version.width() as i16;
        Self::new(version).filter(move |&(r, c)| !is_reserved(r, c, w))
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}
