//! Bit and basis primitives.
//!
//! A qubit in this model carries one classical [`Bit`] encoded in one of two
//! measurement [`Basis`] orientations. Both are drawn from the low bit of a
//! random byte, so a single environment byte backs every draw.

use std::{fmt, ops::BitXor};

use serde::Serialize;

/// Classical bit value carried by a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Bit {
    /// Bit value 0.
    Zero,
    /// Bit value 1.
    One,
}

impl Bit {
    /// Interpret the least significant bit of `byte`.
    pub fn from_low_bit(byte: u8) -> Self {
        if byte & 1 == 0 { Self::Zero } else { Self::One }
    }

    /// Numeric value (0 or 1).
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Digit character for display (`'0'` or `'1'`).
    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Self::One } else { Self::Zero }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl TryFrom<u8> for Bit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(other),
        }
    }
}

impl BitXor for Bit {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self::from(self != rhs)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Measurement orientation used to prepare or read a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Basis {
    /// Rectilinear basis (`+`), states |0> and |1>.
    #[serde(rename = "+")]
    Rectilinear,
    /// Diagonal basis (`x`), states |+> and |->.
    #[serde(rename = "x")]
    Diagonal,
}

impl Basis {
    /// Both bases, in draw order (low bit 0 selects the first).
    pub const ALL: [Self; 2] = [Self::Rectilinear, Self::Diagonal];

    /// Select a basis from the least significant bit of `byte`.
    pub fn from_low_bit(byte: u8) -> Self {
        if byte & 1 == 0 { Self::Rectilinear } else { Self::Diagonal }
    }

    /// Single-character symbol (`'+'` or `'x'`).
    pub fn symbol(self) -> char {
        match self {
            Self::Rectilinear => '+',
            Self::Diagonal => 'x',
        }
    }

    /// The other basis.
    pub fn conjugate(self) -> Self {
        match self {
            Self::Rectilinear => Self::Diagonal,
            Self::Diagonal => Self::Rectilinear,
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_bit_selects_value() {
        assert_eq!(Bit::from_low_bit(0b1010), Bit::Zero);
        assert_eq!(Bit::from_low_bit(0b1011), Bit::One);
        assert_eq!(Basis::from_low_bit(0xFE), Basis::Rectilinear);
        assert_eq!(Basis::from_low_bit(0xFF), Basis::Diagonal);
    }

    #[test]
    fn bit_xor_truth_table() {
        assert_eq!(Bit::Zero ^ Bit::Zero, Bit::Zero);
        assert_eq!(Bit::Zero ^ Bit::One, Bit::One);
        assert_eq!(Bit::One ^ Bit::Zero, Bit::One);
        assert_eq!(Bit::One ^ Bit::One, Bit::Zero);
    }

    #[test]
    fn bit_rejects_non_binary() {
        assert_eq!(Bit::try_from(1), Ok(Bit::One));
        assert_eq!(Bit::try_from(2), Err(2));
    }

    #[test]
    fn basis_symbols() {
        assert_eq!(Basis::Rectilinear.to_string(), "+");
        assert_eq!(Basis::Diagonal.to_string(), "x");
        assert_eq!(Basis::Diagonal.conjugate(), Basis::Rectilinear);
    }
}
