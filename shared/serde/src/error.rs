use thiserror::Error;

/// Errors raised while reading a bit stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of its buffer
    #[error("Attempted to read bit {bit_index} of a {buffer_bits}-bit buffer")]
    UnexpectedEnd { bit_index: usize, buffer_bits: usize },

    /// A decoded value does not fit the type it is being read into
    #[error("Decoded value {value} is out of range for {type_name}")]
    OutOfRange { value: i128, type_name: &'static str },

    /// A collection length prefix exceeds what the reader will accept
    #[error("Collection length {length} exceeds the limit of {limit}")]
    LengthLimitExceeded { length: u64, limit: u64 },
}
