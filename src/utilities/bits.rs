//! Fixed-width bit masks used for the Bloom filter, PRR and IRR.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A mask of exactly `num_bits` bits, stored as a big-endian byte string of
/// `ceil(num_bits / 8)` bytes. Bit `i` is the bit of weight `2^i` of the
/// big-endian integer, so a 32-bit mask reads back as the same `u32`.
///
/// Bits at positions `>= num_bits` are always zero.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bits {
    num_bits: usize,
    bytes: Vec<u8>,
}

impl Bits {
    /// An all-zero mask of the given width.
    pub fn zeros(num_bits: usize) -> Bits {
        Bits { num_bits, bytes: vec![0; byte_len(num_bits)] }
    }

    /// An all-one mask of the given width.
    pub fn ones(num_bits: usize) -> Bits {
        !Bits::zeros(num_bits)
    }

    /// Build a mask from a per-bit predicate, bit `i` set when `f(i)` holds.
    pub fn from_fn<F: FnMut(usize) -> bool>(num_bits: usize, mut f: F) -> Bits {
        let mut bits = Bits::zeros(num_bits);
        for i in 0..num_bits {
            if f(i) {
                bits.set(i);
            }
        }
        bits
    }

    /// Take a big-endian byte string as a mask of `num_bits` bits.
    /// Returns `None` if the length is not `ceil(num_bits / 8)` or a bit
    /// beyond the width is set.
    pub fn from_be_bytes(num_bits: usize, bytes: &[u8]) -> Option<Bits> {
        if bytes.len() != byte_len(num_bits) {
            return None;
        }
        let bits = Bits { num_bits, bytes: bytes.to_vec() };
        if bits.clone().masked() != bits {
            return None;
        }
        Some(bits)
    }

    /// The low `num_bits` bits of `value`.
    pub fn from_u64(num_bits: usize, value: u64) -> Bits {
        Bits::from_fn(num_bits, |i| i < 64 && (value >> i) & 1 == 1)
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Set bit `i`. Setting an already set bit is a no-op.
    ///
    /// Panics if `i >= num_bits`.
    pub fn set(&mut self, i: usize) {
        assert!(i < self.num_bits, "bit {} out of range for width {}", i, self.num_bits);
        let last = self.bytes.len() - 1;
        self.bytes[last - i / 8] |= 1 << (i % 8);
    }

    /// Set bit `i`, or return `None` if `i >= num_bits`.
    pub fn checked_set(&mut self, i: usize) -> Option<()> {
        if i >= self.num_bits {
            return None;
        }
        self.set(i);
        Some(())
    }

    pub fn is_set(&self, i: usize) -> bool {
        if i >= self.num_bits {
            return false;
        }
        let last = self.bytes.len() - 1;
        self.bytes[last - i / 8] & (1 << (i % 8)) != 0
    }

    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// The big-endian wire representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The mask as a native integer, if it is at most 32 bits wide.
    pub fn to_u32(&self) -> Option<u32> {
        if self.num_bits > 32 {
            return None;
        }
        Some(self.bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }

    /// The mask as a native integer, if it is at most 64 bits wide.
    pub fn to_u64(&self) -> Option<u64> {
        if self.num_bits > 64 {
            return None;
        }
        Some(self.bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    /// Bitwise AND, or `None` if the widths differ.
    pub fn checked_and(&self, rhs: &Bits) -> Option<Bits> {
        if self.num_bits != rhs.num_bits {
            return None;
        }
        Some(self & rhs)
    }

    /// Bitwise OR, or `None` if the widths differ.
    pub fn checked_or(&self, rhs: &Bits) -> Option<Bits> {
        if self.num_bits != rhs.num_bits {
            return None;
        }
        Some(self | rhs)
    }

    // Clear the unused high bits of the leading byte.
    fn masked(mut self) -> Bits {
        let spare = self.bytes.len() * 8 - self.num_bits;
        if spare > 0 {
            self.bytes[0] &= 0xFF >> spare;
        }
        self
    }

    fn zip_with<F: Fn(u8, u8) -> u8>(mut self, rhs: &Bits, f: F) -> Bits {
        assert_eq!(self.num_bits, rhs.num_bits, "bit widths differ");
        for (a, b) in self.bytes.iter_mut().zip(rhs.bytes.iter()) {
            *a = f(*a, *b);
        }
        self
    }
}

fn byte_len(num_bits: usize) -> usize {
    (num_bits + 7) / 8
}

/// # Panics
/// Panics if the operands have different widths; see [`Bits::checked_and`].
impl<'a> BitAnd<&'a Bits> for &'a Bits {
    type Output = Bits;

    fn bitand(self, rhs: &'a Bits) -> Bits {
        self.clone().zip_with(rhs, |a, b| a & b)
    }
}

/// # Panics
/// Panics if the operands have different widths; see [`Bits::checked_or`].
impl<'a> BitOr<&'a Bits> for &'a Bits {
    type Output = Bits;

    fn bitor(self, rhs: &'a Bits) -> Bits {
        self.clone().zip_with(rhs, |a, b| a | b)
    }
}

/// # Panics
/// Panics if the operands have different widths; see [`Bits::checked_and`].
impl BitAnd for Bits {
    type Output = Bits;

    fn bitand(self, rhs: Bits) -> Bits {
        self.zip_with(&rhs, |a, b| a & b)
    }
}

/// # Panics
/// Panics if the operands have different widths; see [`Bits::checked_or`].
impl BitOr for Bits {
    type Output = Bits;

    fn bitor(self, rhs: Bits) -> Bits {
        self.zip_with(&rhs, |a, b| a | b)
    }
}

impl<'a> Not for &'a Bits {
    type Output = Bits;

    fn not(self) -> Bits {
        !self.clone()
    }
}

impl Not for Bits {
    type Output = Bits;

    fn not(mut self) -> Bits {
        for b in self.bytes.iter_mut() {
            *b = !*b;
        }
        self.masked()
    }
}

impl fmt::LowerHex for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bytes {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({}; 0x{:x})", self.num_bits, self)
    }
}
