use super::galois::G;
use crate::common::error::{QRError, QRResult};

// Generator polynomial
//------------------------------------------------------------------------------

// Coefficients are ordered from the highest degree down
fn poly_mul(a: &[G], b: &[G]) -> Vec<G> {
    let mut res = vec![G(0); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            res[i + j] += x * y;
        }
    }
    res
}

/// Builds the product of `(x - a^i)` for `i` in `0..ec_len`.
pub fn generator_polynomial(ec_len: usize) -> Vec<G> {
    (0..ec_len).fold(vec![G(1)], |gen, i| poly_mul(&gen, &[G(1), G::gen_pow(i)]))
}

// ECC: Error correction codewords
//------------------------------------------------------------------------------

/// Error correction codewords for `data`: the remainder of `data · x^ec_len`
/// divided by the generator polynomial. Always `ec_len` bytes long.
pub fn ecc(data: &[u8], ec_len: usize) -> QRResult<Vec<u8>> {
    let mut dividend = data.to_vec();
    dividend.resize(data.len() + ec_len, 0);
    remainder(&dividend, &generator_polynomial(ec_len))
}

/// Remainder of `dividend` divided by `divisor`, both highest degree first.
pub fn remainder(dividend: &[u8], divisor: &[G]) -> QRResult<Vec<u8>> {
    let lead = divisor.first().ok_or(QRError::DivisionByZero)?;
    let rem_len = divisor.len() - 1;
    if dividend.len() < rem_len {
        let mut res = vec![0; rem_len - dividend.len()];
        res.extend_from_slice(dividend);
        return Ok(res);
    }

    let steps = dividend.len() - rem_len;
    let mut res = dividend.to_vec();
    for i in 0..steps {
        if res[i] == 0 {
            continue;
        }
        let factor = G(res[i]).checked_div(*lead)?;
        for (u, &g) in res[i..].iter_mut().zip(divisor.iter()) {
            *u = (G(*u) - g * factor).into();
        }
    }

    Ok(res.split_off(steps))
}
