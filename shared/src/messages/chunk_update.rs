use crate::{
    BitReader, BitWrite, BitWriter, ChunkKey, Marker, MarkerId, Serde, SerdeErr, Tick,
};

/// Complete contents of one chunk at the moment it was snapshotted.
/// An empty `markers` list is a valid snapshot: the chunk holds nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkSnapshot {
    pub key: ChunkKey,
    /// Sorted by id
    pub markers: Vec<(MarkerId, Marker)>,
}

impl ChunkSnapshot {
    pub fn new(key: ChunkKey, mut markers: Vec<(MarkerId, Marker)>) -> Self {
        markers.sort_by_key(|(id, _)| *id);
        Self { key, markers }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers
            .binary_search_by_key(id, |(marker_id, _)| *marker_id)
            .ok()
            .map(|index| &self.markers[index].1)
    }
}

impl Serde for ChunkSnapshot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.key.ser(writer);
        self.markers.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let key = ChunkKey::de(reader)?;
        let markers = Vec::<(MarkerId, Marker)>::de(reader)?;
        Ok(Self::new(key, markers))
    }

    fn bit_length(&self) -> u32 {
        self.key.bit_length() + self.markers.bit_length()
    }
}

/// The single message a session receives on a tick in which any chunk in
/// its view needs (re)sending
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ChunkUpdate {
    pub tick: Tick,
    pub chunks: Vec<ChunkSnapshot>,
    /// Chunks which left the session's view since the previous update.
    /// Only populated when the server is configured to send them.
    pub forgotten: Vec<ChunkKey>,
}

impl ChunkUpdate {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.forgotten.is_empty()
    }

    pub fn chunk(&self, key: &ChunkKey) -> Option<&ChunkSnapshot> {
        self.chunks.iter().find(|snapshot| snapshot.key == *key)
    }

    pub fn to_bytes(&self) -> Box<[u8]> {
        let mut writer = BitWriter::with_capacity(self.bit_length().div_ceil(8) as usize);
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader)
    }
}

impl Serde for ChunkUpdate {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.tick.ser(writer);
        self.chunks.ser(writer);
        self.forgotten.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            tick: Tick::de(reader)?,
            chunks: Vec::<ChunkSnapshot>::de(reader)?,
            forgotten: Vec::<ChunkKey>::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.tick.bit_length() + self.chunks.bit_length() + self.forgotten.bit_length()
    }
}
