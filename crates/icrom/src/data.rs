//! ROM contents as a word-by-bit matrix.
//!
//! The input file is raw binary. By default it is a packed bit stream read
//! most significant bit first: bit 7 of byte 0 is word 0 bit 0. With a word
//! stride each word starts on its own byte boundary and may be followed by
//! padding bytes that are skipped.
//!
//! A file always holds whole bytes, so a packed array must have a multiple
//! of 8 cells (`words × bits`). Other shapes need a stride.
//!
//! # Example
//!
//! ```
//! # use icrom::data::{DataLayout, RomData};
//! // two 4-bit words packed into one byte: 1010 then 0011
//! let data = RomData::from_bytes(&[0b1010_0011], 2, 4, DataLayout::Packed).unwrap();
//!
//! assert!(data.get(0, 0));
//! assert!(!data.get(0, 1));
//! assert_eq!(data.word(1).collect::<Vec<_>>(), [false, false, true, true]);
//! assert_eq!(data.ones(), 4);
//! ```

use std::io::{self, Read};

use log::debug;
use thiserror::Error;

/// Errors raised while loading ROM contents.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("input holds {actual_bits} bits but the array needs {expected_bits}")]
    SizeMismatch {
        expected_bits: usize,
        actual_bits: usize,
    },

    #[error("a stride of {stride} bytes cannot hold a {bits}-bit word ({needed} bytes)")]
    StrideTooSmall {
        stride: usize,
        bits: usize,
        needed: usize,
    },

    #[error("array must have at least one word and one bit (got {words}x{bits})")]
    EmptyArray { words: usize, bits: usize },

    #[error("a {words}x{bits} array is too large to address")]
    TooLarge { words: usize, bits: usize },
}

/// How words are laid out in the input bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataLayout {
    /// One continuous bit stream with no padding between words. The input
    /// must hold exactly `words × bits` bits, so that product has to be a
    /// multiple of 8.
    #[default]
    Packed,
    /// Every word occupies this many bytes; the word itself fills the
    /// leading `ceil(bits / 8)` of them.
    Stride(usize),
}

impl DataLayout {
    /// Builds the layout from an optional stride.
    pub fn from_stride(stride: Option<usize>) -> Self {
        stride.map_or(Self::Packed, Self::Stride)
    }
}

/// The bit matrix to encode, stored row-major (`word * bits + bit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomData {
    words: usize,
    bits: usize,
    cells: Vec<bool>,
}

impl RomData {
    /// Decodes `bytes` into a `words` by `bits` matrix.
    ///
    /// # Errors
    ///
    /// - [`DataError::EmptyArray`] if either dimension is zero
    /// - [`DataError::StrideTooSmall`] if a stride cannot hold one word
    /// - [`DataError::SizeMismatch`] if the input is longer or shorter than
    ///   the array requires
    /// - [`DataError::TooLarge`] if the array size does not fit in `usize`
    pub fn from_bytes(
        bytes: &[u8],
        words: usize,
        bits: usize,
        layout: DataLayout,
    ) -> Result<Self, DataError> {
        if words == 0 || bits == 0 {
            return Err(DataError::EmptyArray { words, bits });
        }

        let too_large = DataError::TooLarge { words, bits };
        let expected_cells = words.checked_mul(bits).ok_or(too_large)?;
        let actual_bits = bytes.len().saturating_mul(8);

        let cells = match layout {
            DataLayout::Packed => {
                if actual_bits != expected_cells {
                    return Err(DataError::SizeMismatch {
                        expected_bits: expected_cells,
                        actual_bits,
                    });
                }
                (0..expected_cells).map(|i| bit_at(bytes, i)).collect()
            }
            DataLayout::Stride(stride) => {
                let needed = bits.div_ceil(8);
                if stride < needed {
                    return Err(DataError::StrideTooSmall {
                        stride,
                        bits,
                        needed,
                    });
                }
                let expected_bits = words
                    .checked_mul(stride)
                    .and_then(|len| len.checked_mul(8))
                    .ok_or(too_large)?;
                if actual_bits != expected_bits {
                    return Err(DataError::SizeMismatch {
                        expected_bits,
                        actual_bits,
                    });
                }
                bytes
                    .chunks_exact(stride)
                    .flat_map(|chunk| (0..bits).map(move |bit| bit_at(chunk, bit)))
                    .collect()
            }
        };

        let data = Self { words, bits, cells };
        debug!(words, bits, ones = data.ones(), layout:?; "ROM data decoded");
        Ok(data)
    }

    /// Reads the whole of `reader` and decodes it with [`Self::from_bytes`].
    pub fn read_from<R: Read>(
        mut reader: R,
        words: usize,
        bits: usize,
        layout: DataLayout,
    ) -> Result<Self, ReadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        debug!(bytes = bytes.len(); "ROM data read");
        Ok(Self::from_bytes(&bytes, words, bits, layout)?)
    }

    /// An all-zero matrix, for generating a blank board.
    pub fn zeroed(words: usize, bits: usize) -> Result<Self, DataError> {
        if words == 0 || bits == 0 {
            return Err(DataError::EmptyArray { words, bits });
        }
        let cells = words
            .checked_mul(bits)
            .ok_or(DataError::TooLarge { words, bits })?;
        Ok(Self {
            words,
            bits,
            cells: vec![false; cells],
        })
    }

    /// Builds a matrix from explicit rows. Every row must have the same
    /// length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = bool>,
    {
        let mut cells = Vec::new();
        let mut words = 0;
        let mut bits = None;
        for row in rows {
            let before = cells.len();
            cells.extend(row);
            let width = cells.len() - before;
            match bits {
                None => bits = Some(width),
                Some(expected) if expected != width => {
                    return Err(DataError::SizeMismatch {
                        expected_bits: (words + 1) * expected,
                        actual_bits: words * expected + width,
                    });
                }
                Some(_) => {}
            }
            words += 1;
        }
        let bits = bits.unwrap_or(0);
        if words == 0 || bits == 0 {
            return Err(DataError::EmptyArray { words, bits });
        }
        Ok(Self { words, bits, cells })
    }

    /// Returns the number of words (rows).
    pub fn words(&self) -> usize {
        self.words
    }

    /// Returns the number of bits per word (columns).
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Returns the value of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `word` or `bit` is out of range.
    pub fn get(&self, word: usize, bit: usize) -> bool {
        assert!(bit < self.bits, "bit {bit} out of range");
        self.cells[word * self.bits + bit]
    }

    /// Iterates the bits of one word, bit 0 first.
    pub fn word(&self, word: usize) -> impl Iterator<Item = bool> + '_ {
        self.cells[word * self.bits..(word + 1) * self.bits]
            .iter()
            .copied()
    }

    /// Iterates one bit position across all words, word 0 first.
    pub fn column(&self, bit: usize) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().skip(bit).step_by(self.bits).copied()
    }

    /// Returns the number of set cells.
    pub fn ones(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

/// Errors raised by [`RomData::read_from`].
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read ROM data: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Bit `index` of a big-endian bit stream.
fn bit_at(bytes: &[u8], index: usize) -> bool {
    bytes[index / 8] & (0x80 >> (index % 8)) != 0
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_packed_is_msb_first() {
        let data = RomData::from_bytes(&[0x80, 0x01], 1, 16, DataLayout::Packed).unwrap();
        let bits: Vec<_> = data.word(0).collect();
        assert!(bits[0]);
        assert!(bits[15]);
        assert_eq!(data.ones(), 2);
    }

    #[test]
    fn test_packed_words_cross_byte_boundaries() {
        // 16 bits of input cannot fill 5 words of 3 bits
        let data = RomData::from_bytes(&[0b1011_0011, 0b1000_0000], 5, 3, DataLayout::Packed);
        assert_eq!(
            data,
            Err(DataError::SizeMismatch {
                expected_bits: 15,
                actual_bits: 16
            })
        );

        let data = RomData::from_bytes(&[0b1011_0011, 0b1000_0000], 4, 4, DataLayout::Packed)
            .unwrap();
        assert_eq!(data.word(0).collect::<Vec<_>>(), [true, false, true, true]);
        assert_eq!(data.word(1).collect::<Vec<_>>(), [false, false, true, true]);
        assert_eq!(data.word(2).collect::<Vec<_>>(), [true, false, false, false]);
    }

    #[test]
    fn test_size_mismatch() {
        let err = RomData::from_bytes(&[0; 7], 8, 8, DataLayout::Packed).unwrap_err();
        assert_eq!(
            err,
            DataError::SizeMismatch {
                expected_bits: 64,
                actual_bits: 56
            }
        );
        assert_eq!(err.to_string(), "input holds 56 bits but the array needs 64");
    }

    #[test]
    fn test_stride_skips_padding() {
        // 12-bit words in 4-byte slots
        let bytes = [0xFF, 0xF0, 0xAA, 0xAA, 0x00, 0x10, 0x55, 0x55];
        let data = RomData::from_bytes(&bytes, 2, 12, DataLayout::Stride(4)).unwrap();
        assert!(data.word(0).all(|bit| bit));
        assert_eq!(data.word(1).filter(|&b| b).count(), 1);
        assert!(data.get(1, 11));
    }

    #[test]
    fn test_stride_too_small() {
        let err = RomData::from_bytes(&[0; 4], 2, 12, DataLayout::Stride(1)).unwrap_err();
        assert_eq!(
            err,
            DataError::StrideTooSmall {
                stride: 1,
                bits: 12,
                needed: 2
            }
        );
    }

    #[test]
    fn test_stride_size_mismatch() {
        let err = RomData::from_bytes(&[0; 5], 2, 8, DataLayout::Stride(2)).unwrap_err();
        assert_eq!(
            err,
            DataError::SizeMismatch {
                expected_bits: 32,
                actual_bits: 40
            }
        );
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(
            RomData::from_bytes(&[], 0, 8, DataLayout::Packed),
            Err(DataError::EmptyArray { words: 0, bits: 8 })
        );
        assert!(RomData::zeroed(4, 0).is_err());
    }

    #[test]
    fn test_read_from() {
        let data = RomData::read_from(Cursor::new(vec![0xF0]), 2, 4, DataLayout::Packed).unwrap();
        assert_eq!(data.ones(), 4);
        assert!(data.get(0, 3));
        assert!(!data.get(1, 0));

        let err = RomData::read_from(Cursor::new(vec![0xF0]), 2, 8, DataLayout::Packed);
        assert!(matches!(err, Err(ReadError::Data(DataError::SizeMismatch { .. }))));
    }

    #[test]
    fn test_column() {
        let data = RomData::from_rows([[true, false], [true, true], [false, false]]).unwrap();
        assert_eq!(data.column(0).collect::<Vec<_>>(), [true, true, false]);
        assert_eq!(data.column(1).collect::<Vec<_>>(), [false, true, false]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows: Vec<Vec<bool>> = vec![vec![true, false], vec![true]];
        assert!(matches!(
            RomData::from_rows(rows),
            Err(DataError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_oversized_array_is_rejected() {
        let words = 1usize << 33;
        let bits = 1usize << 32;
        let expected = Err(DataError::TooLarge { words, bits });

        assert_eq!(
            RomData::from_bytes(&[0; 8], words, bits, DataLayout::Packed),
            expected
        );
        assert_eq!(
            RomData::from_bytes(&[0; 8], words, 8, DataLayout::Stride(usize::MAX / 2)),
            Err(DataError::TooLarge { words, bits: 8 })
        );
        assert_eq!(RomData::zeroed(words, bits), expected);
    }

    #[test]
    fn test_layout_from_stride() {
        assert_eq!(DataLayout::from_stride(None), DataLayout::Packed);
        assert_eq!(DataLayout::from_stride(Some(4)), DataLayout::Stride(4));
    }
}
