//! Primitive encoders and decoders as extension traits on `Read`/`Write`.
//!
//! | Type | Encoding |
//! |---|---|
//! | int32 | 4 bytes, big-endian, signed |
//! | float64 | 8 bytes, big-endian IEEE-754 |
//! | string | int32 byte length, then raw UTF-8, no terminator |
//! | bool | 1 byte, nonzero = true |

use std::io::{ErrorKind, Read, Write};

use armada_core::constants::MAX_WIRE_COUNT;
use armada_core::errors::WireError;

/// Decoding side of the codec.
pub trait WireRead: Read {
    /// Fill `buf` completely, looping over short reads.
    ///
    /// End-of-stream before `buf` is full is an `IncompleteMessage`, never a
    /// partial or default value.
    fn read_field(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        let mut received = 0;
        while received < buf.len() {
            match self.read(&mut buf[received..]) {
                Ok(0) => {
                    return Err(WireError::IncompleteMessage {
                        expected: buf.len(),
                        received,
                    })
                }
                Ok(n) => received += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(WireError::Io(e)),
            }
        }
        Ok(())
    }

    fn read_i32(&mut self) -> Result<i32, WireError> {
        let mut bytes = [0u8; 4];
        self.read_field(&mut bytes)?;
        Ok(i32::from_be_bytes(bytes))
    }

    fn read_f64(&mut self) -> Result<f64, WireError> {
        let mut bytes = [0u8; 8];
        self.read_field(&mut bytes)?;
        Ok(f64::from_be_bytes(bytes))
    }

    fn read_bool(&mut self) -> Result<bool, WireError> {
        let mut byte = [0u8; 1];
        self.read_field(&mut byte)?;
        Ok(byte[0] != 0)
    }

    /// An int32 count or length, rejected if negative or implausibly large.
    fn read_count(&mut self, field: &'static str) -> Result<usize, WireError> {
        let value = self.read_i32()?;
        if !(0..=MAX_WIRE_COUNT).contains(&value) {
            return Err(WireError::InvalidLength {
                field,
                value: i64::from(value),
            });
        }
        Ok(value as usize)
    }

    fn read_string(&mut self) -> Result<String, WireError> {
        let len = self.read_count("string length")?;
        let mut bytes = vec![0u8; len];
        self.read_field(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| WireError::InvalidUtf8 {
            reason: e.to_string(),
        })
    }

    /// A count followed by that many float64 values.
    fn read_f64_vec(&mut self, field: &'static str) -> Result<Vec<f64>, WireError> {
        let len = self.read_count(field)?;
        (0..len).map(|_| self.read_f64()).collect()
    }
}

impl<R: Read + ?Sized> WireRead for R {}

/// Encoding side of the codec.
pub trait WireWrite: Write {
    fn write_i32(&mut self, value: i32) -> Result<(), WireError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn write_f64(&mut self, value: f64) -> Result<(), WireError> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<(), WireError> {
        self.write_all(&[u8::from(value)])?;
        Ok(())
    }

    fn write_count(&mut self, count: usize, field: &'static str) -> Result<(), WireError> {
        let value = i32::try_from(count)
            .ok()
            .filter(|v| *v <= MAX_WIRE_COUNT)
            .ok_or(WireError::InvalidLength {
                field,
                value: count as i64,
            })?;
        self.write_i32(value)
    }

    /// Byte length then the raw UTF-8 bytes.
    fn write_str(&mut self, value: &str) -> Result<(), WireError> {
        self.write_count(value.len(), "string length")?;
        self.write_all(value.as_bytes())?;
        Ok(())
    }

    fn write_f64_slice(&mut self, values: &[f64], field: &'static str) -> Result<(), WireError> {
        self.write_count(values.len(), field)?;
        for v in values {
            self.write_f64(*v)?;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> WireWrite for W {}
