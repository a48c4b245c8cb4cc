use std::ops::Deref;

use crate::common::bit_utils::BitStream;
use crate::common::iter::{is_reserved, EncRegionIter};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{Color, ECLevel, Version};
use crate::common::version_db::{
    FINDER_PATTERN, FORMAT_INFO_BIT_LEN, FORMAT_INFO_FALLBACK, FORMAT_INFO_TABLE,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Format(Color),
    Data(Color),
}

impl Module {
    fn toggled(self) -> Self {
        match self {
            Module::Empty => Module::Data(Color::Dark),
            Module::Func(c) => Module::Func(!c),
            Module::Format(c) => Module::Format(!c),
            Module::Data(c) => Module::Data(!c),
        }
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// Row major boolean grid, `true` for dark modules.
    pub fn to_modules(&self) -> Vec<Vec<bool>> {
        self.grid.chunks(self.w).map(|row| row.iter().map(|m| bool::from(**m)).collect()).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.module(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    pub fn module(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        *self.module(r, c)
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(0, 0);
        self.draw_finder_pattern_at(0, -7);
        self.draw_finder_pattern_at(-7, 0);
    }

    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        for (i, row) in FINDER_PATTERN.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                self.set(r + i as i16, c + j as i16, Module::Func(Color::from(bit == 1)));
            }
        }
    }

    // Light border on the inner sides of each finder pattern
    fn draw_separators(&mut self) {
        let light = Module::Func(Color::Light);
        for i in 0..8 {
            self.set(7, i, light);
            self.set(i, 7, light);
            self.set(7, -1 - i, light);
            self.set(i, -8, light);
            self.set(-8, i, light);
            self.set(-1 - i, 7, light);
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_finder_pattern_qr() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        qr.draw_finder_patterns();
        qr.draw_separators();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        self.draw_line(6, 8, 6, w - 9);
        self.draw_line(8, 6, w - 9, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from(i & 1 == 0)));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r <= 8 && c <= 8) || (r <= 8 && c >= w - 9) || (r >= w - 9 && c <= 8) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }

    fn draw_dark_module(&mut self) {
        if let Some((r, c)) = self.ver.dark_module() {
            self.set(r, c, Module::Func(Color::Dark));
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_alignment_pattern_1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        qr.draw_alignment_patterns();
        assert_eq!(qr.to_debug_str().matches('f').count(), 0);
    }

    #[test]
    fn test_alignment_pattern_3() {
        let mut qr = QR::new(Version::new(3).unwrap(), ECLevel::L);
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             ....................fffff....\n\
             ....................fFFFf....\n\
             ....................fFfFf....\n\
             ....................fFFFf....\n\
             ....................fffff....\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_7() {
        // 3 x 3 grid of centres minus the 3 under finder patterns
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_alignment_patterns();
        assert_eq!(qr.to_debug_str().matches('f').count(), 6 * 17);
        assert_eq!(qr.to_debug_str().matches('F').count(), 6 * 8);
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_separators();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.draw_dark_module();
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_all_function_patterns_1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }

    #[test]
    fn test_all_function_patterns_2() {
        let mut qr = QR::new(Version::new(2).unwrap(), ECLevel::M);
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.........Ffffffff\n\
             fFFFFFfF.........FfFFFFFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFFFFFfF.........FfFFFFFf\n\
             fffffffFfFfFfFfFfFfffffff\n\
             FFFFFFFF.........FFFFFFFF\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f.........fffff....\n\
             FFFFFFFFf.......fFFFf....\n\
             fffffffF........fFfFf....\n\
             fFFFFFfF........fFFFf....\n\
             fFfffFfF........fffff....\n\
             fFfffFfF.................\n\
             fFfffFfF.................\n\
             fFFFFFfF.................\n\
             fffffffF.................\n"
        );
    }
}

// Format info
//------------------------------------------------------------------------------

// Bit 0 is the most significant bit of the format info
static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

/// 15 bit format info for the EC level and mask pattern, falling back to
/// level M with mask 0 if the pair is missing from the table.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u16 {
    FORMAT_INFO_TABLE
        .get(ecl.table_index())
        .and_then(|row| row.get(*mask as usize))
        .copied()
        .unwrap_or(FORMAT_INFO_FALLBACK)
}

impl QR {
    pub fn draw_format_info(&mut self, mask: MaskPattern) {
        let info = format_info(self.ecl, mask);
        let off = Module::Format(Color::Light);
        let on = Module::Format(Color::Dark);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_SIDE);
    }

    fn draw_number(
        &mut self,
        number: u16,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            if number & mask == 0 {
                self.set(r, c, off_clr);
            } else {
                self.set(r, c, on_clr);
            }
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places data and error correction bits into the free modules. Modules
    /// left over once the bits run out are kept as they are.
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        for ((r, c), bit) in EncRegionIter::data_cells(self.ver).zip(payload) {
            self.set(r, c, Module::Data(Color::from(bit)));
        }
    }

    /// Inverts every free module selected by the mask pattern.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if !is_reserved(r, c, w) && mask_fn(r, c) {
                    let module = self.module(r, c).toggled();
                    self.set(r, c, module);
                }
            }
        }
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use crate::builder::{Module, QR};
    use crate::common::bit_utils::BitStream;
    use crate::common::iter::is_reserved;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{Color, ECLevel, Version};

    #[test]
    fn test_draw_encoding_region() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::M);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(BitStream::from(&[0b10100000, 0xFF]));
        assert_eq!(qr.module(20, 20), Module::Data(Color::Dark));
        assert_eq!(qr.module(20, 19), Module::Data(Color::Light));
        assert_eq!(qr.module(19, 20), Module::Data(Color::Dark));
        assert_eq!(qr.module(19, 19), Module::Data(Color::Light));
        assert_eq!(qr.module(16, 20), Module::Data(Color::Dark));
        assert_eq!(qr.module(13, 19), Module::Data(Color::Dark));
        // Bits ran out
        assert_eq!(qr.module(12, 20), Module::Empty);
    }

    #[test]
    fn test_draw_encoding_region_fills_v1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::M);
        qr.draw_all_function_patterns();
        qr.draw_format_info(MaskPattern::new(0).unwrap());
        qr.draw_encoding_region(BitStream::from(&[0; 26]));
        // Only the dark module slot stays empty on version 1
        assert_eq!(qr.to_debug_str().matches('.').count(), 1);
        assert_eq!(qr.module(13, 8), Module::Empty);
    }

    #[test]
    fn test_apply_mask_skips_reserved() {
        let mut qr = QR::new(Version::new(2).unwrap(), ECLevel::M);
        qr.draw_all_function_patterns();
        let before = qr.clone();
        qr.apply_mask(MaskPattern::new(1).unwrap());
        assert_eq!(qr.mask(), Some(MaskPattern::new(1).unwrap()));
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                let flipped = qr.get(r, c) != before.get(r, c);
                assert_eq!(flipped, !is_reserved(r, c, w) && r % 2 == 0);
            }
        }
        // Unreserved alignment module is inverted with the data
        assert_eq!(qr.module(16, 16), Module::Func(Color::Light));
    }
}
