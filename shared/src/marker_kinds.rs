use std::collections::HashMap;

use log::debug;

use crate::{BitReader, BitWrite, ProtocolError, Serde, SerdeErr, UnsignedVariableInteger};

/// Kinds are numbered by a `u16`
pub const MAX_MARKER_KINDS: usize = u16::MAX as usize + 1;

/// Handle to an entry of the marker kind catalog
#[derive(Eq, Hash, Copy, Clone, PartialEq, PartialOrd, Ord, Debug)]
pub struct MarkerKind(u16);

impl MarkerKind {
    pub fn from_u16(value: u16) -> Self {
        Self(value)
    }

    pub fn to_u16(&self) -> u16 {
        self.0
    }
}

impl Serde for MarkerKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<6>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedVariableInteger::<6>::de(reader)?.get();
        u16::try_from(value)
            .map(Self)
            .map_err(|_| SerdeErr::OutOfRange {
                value: value as i128,
                type_name: "MarkerKind",
            })
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<6>::new(self.0).bit_length()
    }
}

/// The catalog of valid marker kinds. Kinds are numbered in registration
/// order, so client & server must register the same names in the same order.
#[derive(Clone, Default)]
pub struct MarkerKinds {
    name_map: HashMap<String, MarkerKind>,
    names: Vec<String>,
}

impl MarkerKinds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind, returning the existing handle if the name is
    /// already known. Panics once the catalog is full.
    pub fn add_kind(&mut self, name: &str) -> MarkerKind {
        match self.try_add_kind(name) {
            Ok(kind) => kind,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_add_kind(&mut self, name: &str) -> Result<MarkerKind, ProtocolError> {
        if let Some(kind) = self.name_map.get(name) {
            debug!("marker kind `{}` already registered as {}", name, kind.0);
            return Ok(*kind);
        }

        let index = u16::try_from(self.names.len()).map_err(|_| ProtocolError::TooManyMarkerKinds {
            max: MAX_MARKER_KINDS,
        })?;
        let kind = MarkerKind(index);
        self.name_map.insert(name.to_string(), kind);
        self.names.push(name.to_string());
        Ok(kind)
    }

    pub fn kind_of(&self, name: &str) -> Option<MarkerKind> {
        self.name_map.get(name).copied()
    }

    pub fn name_of(&self, kind: &MarkerKind) -> Option<&str> {
        self.names.get(kind.0 as usize).map(String::as_str)
    }

    pub fn contains(&self, kind: &MarkerKind) -> bool {
        (kind.0 as usize) < self.names.len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
