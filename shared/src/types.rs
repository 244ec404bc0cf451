use crate::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

/// Incremented once per sync pass on the server
pub type Tick = u32;

// MarkerId
/// Process-unique marker identifier. Allocated in increasing order and
/// never reused.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct MarkerId(u64);

impl MarkerId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl Serde for MarkerId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(UnsignedVariableInteger::<7>::de(reader)?.get()))
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<7>::new(self.0).bit_length()
    }
}

// SurfaceId
/// A tile plane owned by the terrain subsystem
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct SurfaceId(u32);

impl SurfaceId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Serde for SurfaceId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<5>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedVariableInteger::<5>::de(reader)?.get();
        u32::try_from(value)
            .map(Self)
            .map_err(|_| SerdeErr::OutOfRange {
                value: value as i128,
                type_name: "SurfaceId",
            })
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<5>::new(self.0).bit_length()
    }
}
