use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

use crate::common::error::{QRError, QRResult};

// x^8 + x^4 + x^3 + x^2 + 1
pub const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    // a^255 == a^0
    exp[255] = exp[0];
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// Antilog table: `EXP_TABLE[i]` is the generator raised to `i`.
pub static EXP_TABLE: [u8; 256] = TABLES.0;

/// Log table. `LOG_TABLE[0]` is 0 and is never a real logarithm.
pub static LOG_TABLE: [u8; 256] = TABLES.1;

/// Product of two field elements.
#[inline]
pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

/// Quotient of two field elements.
#[inline]
pub fn divide(a: u8, b: u8) -> QRResult<u8> {
    if b == 0 {
        return Err(QRError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let log_diff = LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize;
    Ok(EXP_TABLE[log_diff % 255])
}

// Galois field element
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct G(pub u8);

impl G {
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn checked_div(self, rhs: Self) -> QRResult<Self> {
        divide(self.0, rhs.0).map(Self)
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Sub for G {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(multiply(self.0, rhs.0))
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = multiply(self.0, rhs.0);
    }
}
