use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskPattern);
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let (r, c) = (r as i32, c as i32);
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let (r, c) = (r as i32, c as i32);
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let (r, c) = (r as i32, c as i32);
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate telling whether the module at `(row, col)` gets inverted.
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Masks `qr` with the lowest penalty pattern and returns that pattern.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = select_best_mask(qr);
    qr.apply_mask(best_mask);
    best_mask
}

/// Lowest penalty pattern for `qr`; ties go to the lower pattern id.
pub fn select_best_mask(qr: &QR) -> MaskPattern {
    let penalties = candidate_penalties(qr);
    let best = (0..8).min_by_key(|&m| penalties[m]).unwrap_or(0);
    MaskPattern(best as u8)
}

pub fn candidate_penalties(qr: &QR) -> [u32; 8] {
    let mut penalties = [0; 8];
    for (pen, mask) in penalties.iter_mut().zip(MaskPattern::all()) {
        let mut qr = qr.clone();
        qr.apply_mask(mask);
        *pen = compute_total_penalty(&qr);
        trace!(mask = *mask, penalty = *pen, "Scored mask candidate");
    }
    penalties
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen = compute_finder_pattern_penalty(qr);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Every row followed by every column
fn lines(qr: &QR) -> impl Iterator<Item = Vec<Color>> + '_ {
    let w = qr.width() as i16;
    let rows = (0..w).map(move |r| (0..w).map(|c| qr.get(r, c)).collect());
    let cols = (0..w).map(move |c| (0..w).map(|r| qr.get(r, c)).collect());
    rows.chain(cols)
}

fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    for line in lines(qr) {
        for run in line.chunk_by(|a, b| a == b) {
            if run.len() >= 5 {
                pen += 3 + (run.len() as u32 - 5);
            }
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = qr.get(r, c);
            if clr == qr.get(r + 1, c) && clr == qr.get(r, c + 1) && clr == qr.get(r + 1, c + 1) {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR) -> u32 {
    static PATTERN: [bool; 11] =
        [true, false, true, true, true, false, true, false, false, false, false];
    let mut pen = 0;
    for line in lines(qr) {
        for win in line.windows(11) {
            let fwd = win.iter().zip(PATTERN.iter()).all(|(&clr, &p)| bool::from(clr) == p);
            let rev = win.iter().zip(PATTERN.iter().rev()).all(|(&clr, &p)| bool::from(clr) == p);
            if fwd {
                pen += 40;
            }
            if rev {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let percent = dark_cnt * 100 / (w * w);
    (percent.abs_diff(50) / 5 * 10) as u32
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{
        apply_best_mask, candidate_penalties, compute_adjacent_penalty, compute_balance_penalty,
        compute_block_penalty, compute_finder_pattern_penalty, select_best_mask, MaskPattern,
    };
    use crate::builder::{Module, QR};
    use crate::common::error::QRError;
    use crate::common::metadata::{Color, ECLevel, Version};

    fn blank_qr() -> QR {
        QR::new(Version::new(1).unwrap(), ECLevel::M)
    }

    #[test]
    fn test_mask_pattern_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskPattern));
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (3, 2)])]
    #[test_case(1, &[(0, 5), (2, 1)], &[(1, 0), (3, 3)])]
    #[test_case(2, &[(5, 0), (1, 3)], &[(0, 1), (0, 2)])]
    #[test_case(3, &[(1, 2), (3, 3)], &[(1, 1), (0, 4)])]
    #[test_case(4, &[(0, 2), (2, 3), (1, 1)], &[(2, 0), (0, 3)])]
    #[test_case(5, &[(0, 7), (6, 1), (2, 3)], &[(1, 1), (1, 5)])]
    #[test_case(6, &[(1, 1), (0, 9), (3, 4)], &[(1, 5), (2, 5)])]
    #[test_case(7, &[(0, 0), (1, 3), (2, 4)], &[(0, 1), (1, 1)])]
    fn test_mask_function(pattern: u8, dark: &[(i16, i16)], light: &[(i16, i16)]) {
        let f = MaskPattern::new(pattern).unwrap().mask_function();
        assert!(dark.iter().all(|&(r, c)| f(r, c)));
        assert!(light.iter().all(|&(r, c)| !f(r, c)));
    }

    #[test]
    fn test_adjacent_penalty() {
        // All light: 21 rows and 21 columns each a single run of 21
        let qr = blank_qr();
        assert_eq!(compute_adjacent_penalty(&qr), 42 * (3 + 16));

        let mut qr = blank_qr();
        for r in 0..21 {
            for c in 0..21 {
                qr.set(r, c, Module::Data(Color::from((r + c) & 1 == 0)));
            }
        }
        assert_eq!(compute_adjacent_penalty(&qr), 0);
        assert_eq!(compute_block_penalty(&qr), 0);
    }

    #[test]
    fn test_block_penalty() {
        assert_eq!(compute_block_penalty(&blank_qr()), 20 * 20 * 3);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut qr = blank_qr();
        assert_eq!(compute_finder_pattern_penalty(&qr), 0);
        for c in [0, 2, 3, 4, 6] {
            qr.set(10, c, Module::Data(Color::Dark));
        }
        assert_eq!(compute_finder_pattern_penalty(&qr), 40);
        // Shifting the same run right by four also matches the mirrored window
        let mut qr = blank_qr();
        for c in [4, 6, 7, 8, 10] {
            qr.set(10, c, Module::Data(Color::Dark));
        }
        assert_eq!(compute_finder_pattern_penalty(&qr), 80);
    }

    #[test]
    fn test_balance_penalty() {
        let mut qr = blank_qr();
        assert_eq!(compute_balance_penalty(&qr), 100);
        for r in 0..10 {
            for c in 0..21 {
                qr.set(r, c, Module::Data(Color::Dark));
            }
        }
        // 210 of 441 dark is 47 percent
        assert_eq!(compute_balance_penalty(&qr), 0);
    }

    #[test]
    fn test_select_best_mask_is_minimal() {
        let mut qr = blank_qr();
        qr.draw_all_function_patterns();
        let penalties = candidate_penalties(&qr);
        let best = select_best_mask(&qr);
        assert!(penalties.iter().all(|&p| penalties[*best as usize] <= p));
        let first_min = penalties.iter().position(|&p| p == penalties[*best as usize]).unwrap();
        assert_eq!(*best as usize, first_min);

        let mask = apply_best_mask(&mut qr);
        assert_eq!(mask, best);
        assert_eq!(qr.mask(), Some(best));
    }
}
