//! GF(2^8) arithmetic used by the share engine.
//!
//! The field is fixed to the AES representation: reduction polynomial
//! `x^8 + x^4 + x^3 + x + 1` (`0x11B`) with generator `0x03`. Shares produced
//! under any other representation cannot be combined by this crate, so both
//! constants are part of the share format.
//!
//! Multiplication and division go through log/exp tables that are computed
//! at compile time. The exp table is doubled (510 entries) so that
//! `log a + log b` never needs a modulo.

use thiserror::Error;

/// Reduction polynomial of the field (AES polynomial).
pub const IRREDUCIBLE_POLY: u16 = 0x11b;

/// Generator used to build the log/exp tables.
pub const GENERATOR: u8 = 0x03;

/// Order of the multiplicative group.
const GROUP_ORDER: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
}

struct Tables {
    exp: [u8; 2 * GROUP_ORDER],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 2 * GROUP_ORDER];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < GROUP_ORDER {
        exp[i] = x as u8;
        exp[i + GROUP_ORDER] = x as u8;
        log[x as usize] = i as u8;
        // x * 3 = (x * 2) ^ x, reducing the doubling by the field polynomial
        let mut doubled = x << 1;
        if doubled & 0x100 != 0 {
            doubled ^= IRREDUCIBLE_POLY;
        }
        x = doubled ^ x;
        i += 1;
    }
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

/// Field addition (XOR).
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Field subtraction; identical to addition in characteristic 2.
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let la = TABLES.log[a as usize] as usize;
    let lb = TABLES.log[b as usize] as usize;
    TABLES.exp[la + lb]
}

/// Field division. Fails for a zero divisor.
#[inline]
pub fn div(a: u8, b: u8) -> Result<u8, FieldError> {
    if b == 0 {
        return Err(FieldError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let la = TABLES.log[a as usize] as usize;
    let lb = TABLES.log[b as usize] as usize;
    Ok(TABLES.exp[la + GROUP_ORDER - lb])
}

/// Multiplicative inverse. Fails for zero.
#[inline]
pub fn inv(a: u8) -> Result<u8, FieldError> {
    div(1, a)
}

/// Evaluate a polynomial at `x` with Horner's rule.
///
/// `coeffs[0]` is the constant term.
pub fn eval_poly(coeffs: &[u8], x: u8) -> u8 {
    coeffs.iter().rev().fold(0u8, |acc, &c| add(mul(acc, x), c))
}

/// Lagrange basis values at `x = 0` for the given evaluation points.
///
/// `basis[j] = prod_{m != j} x_m / (x_m - x_j)`. Repeated points produce a
/// zero denominator and therefore a `DivisionByZero` error.
pub fn lagrange_basis_at_zero(xs: &[u8]) -> Result<Vec<u8>, FieldError> {
    xs.iter()
        .enumerate()
        .map(|(j, &xj)| {
            let mut num = 1u8;
            let mut den = 1u8;
            for (m, &xm) in xs.iter().enumerate() {
                if m == j {
                    continue;
                }
                num = mul(num, xm);
                den = mul(den, sub(xm, xj));
            }
            div(num, den)
        })
        .collect()
}
