use std::fmt::{Display, Formatter};
use std::mem;

use num_traits::PrimInt;

/// Formats `num` as a binary string left-padded with zeros to `len` digits.
pub fn to_binary(num: u32, len: usize) -> String {
    format!("{num:0len$b}")
}


// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

impl Display for BitStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            let bit = (self.data[i >> 3] >> (7 - (i & 7))) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            let bit = i < max_bits && (bits >> i) & T::one() == T::one();
            self.push(bit);
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        let pos = self.len >> 3;
        let arr_bits = arr.len() << 3;
        debug_assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data[pos..pos + arr.len()].copy_from_slice(arr);
        self.len += arr_bits;
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bit(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take_bit()
    }
}
