use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength};

// Every variable-length integer is written as a series of BITS-wide groups,
// each preceded by a "proceed" bit that is set when another group follows.

fn write_groups(writer: &mut dyn BitWrite, mut value: u64, bits: u8) {
    loop {
        let proceed = bits < 64 && value >= 1u64 << bits;
        writer.write_bit(proceed);
        for _ in 0..bits {
            writer.write_bit(value & 1 != 0);
            value >>= 1;
        }
        if !proceed {
            return;
        }
    }
}

fn read_groups(reader: &mut BitReader, bits: u8) -> Result<u64, SerdeErr> {
    let mut output: u128 = 0;
    let mut shift: u32 = 0;
    loop {
        let proceed = reader.read_bit()?;
        for _ in 0..bits {
            if reader.read_bit()? {
                if shift >= 64 {
                    return Err(SerdeErr::OutOfRange {
                        value: i128::MAX,
                        type_name: "u64",
                    });
                }
                output |= 1u128 << shift;
            }
            shift += 1;
        }
        if !proceed {
            break;
        }
    }

    u64::try_from(output).map_err(|_| SerdeErr::OutOfRange {
        value: output as i128,
        type_name: "u64",
    })
}

fn groups_bit_length(mut value: u64, bits: u8) -> u32 {
    let mut output = 0;
    loop {
        let proceed = bits < 64 && value >= 1u64 << bits;
        output += 1 + bits as u32;
        if bits < 64 {
            value >>= bits;
        }
        if !proceed {
            return output;
        }
    }
}

/// An unsigned integer that always occupies exactly BITS bits
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UnsignedInteger<const BITS: u8>(u64);

impl<const BITS: u8> UnsignedInteger<BITS> {
    pub fn new(value: impl Into<u64>) -> Self {
        let value = value.into();
        if BITS == 0 || BITS > 64 {
            panic!("UnsignedInteger must be between 1 and 64 bits wide");
        }
        if BITS < 64 && value >= 1u64 << BITS {
            panic!("with {} bits, can't encode {}", BITS, value);
        }
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl<const BITS: u8> Serde for UnsignedInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.0;
        for _ in 0..BITS {
            writer.write_bit(value & 1 != 0);
            value >>= 1;
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u64 = 0;
        for index in 0..BITS {
            if reader.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(Self(output))
    }

    fn bit_length(&self) -> u32 {
        BITS as u32
    }
}

impl<const BITS: u8> ConstBitLength for UnsignedInteger<BITS> {
    fn const_bit_length() -> u32 {
        BITS as u32
    }
}

/// An unsigned integer whose encoded width grows with its magnitude
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UnsignedVariableInteger<const BITS: u8>(u64);

impl<const BITS: u8> UnsignedVariableInteger<BITS> {
    pub fn new(value: impl Into<u64>) -> Self {
        if BITS == 0 || BITS > 64 {
            panic!("UnsignedVariableInteger groups must be between 1 and 64 bits wide");
        }
        Self(value.into())
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl<const BITS: u8> Serde for UnsignedVariableInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        write_groups(writer, self.0, BITS);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(read_groups(reader, BITS)?))
    }

    fn bit_length(&self) -> u32 {
        groups_bit_length(self.0, BITS)
    }
}

/// A signed integer written as a sign bit followed by a variable-length
/// magnitude
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SignedVariableInteger<const BITS: u8>(i64);

impl<const BITS: u8> SignedVariableInteger<BITS> {
    pub fn new(value: impl Into<i64>) -> Self {
        if BITS == 0 || BITS > 64 {
            panic!("SignedVariableInteger groups must be between 1 and 64 bits wide");
        }
        Self(value.into())
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl<const BITS: u8> Serde for SignedVariableInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(self.0 < 0);
        write_groups(writer, self.0.unsigned_abs(), BITS);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let negative = reader.read_bit()?;
        let magnitude = read_groups(reader, BITS)? as i128;
        let value = if negative { -magnitude } else { magnitude };

        i64::try_from(value)
            .map(Self)
            .map_err(|_| SerdeErr::OutOfRange {
                value,
                type_name: "i64",
            })
    }

    fn bit_length(&self) -> u32 {
        1 + groups_bit_length(self.0.unsigned_abs(), BITS)
    }
}
