use crate::{BitReader, BitWrite, Serde, SerdeErr, SignedVariableInteger, SurfaceId};

/// A continuous position in tile units, relative to a surface's origin
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The tile this position sits on
    pub fn tile(&self) -> TileIndices {
        TileIndices::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Serde for Position {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            x: f32::de(reader)?,
            y: f32::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        64
    }
}

/// Integer coordinate of a single tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndices {
    pub x: i32,
    pub y: i32,
}

impl TileIndices {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk owning this tile. Uses floor division, so tile -1 lands in
    /// chunk -1 rather than chunk 0.
    pub fn chunk(&self, chunk_size: u32) -> ChunkIndices {
        let size = chunk_size as i32;
        ChunkIndices::new(self.x.div_euclid(size), self.y.div_euclid(size))
    }
}

/// Integer coordinate of a chunk on its surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndices {
    pub x: i32,
    pub y: i32,
}

impl ChunkIndices {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Lowest tile covered by this chunk
    pub fn origin_tile(&self, chunk_size: u32) -> TileIndices {
        let size = chunk_size as i32;
        TileIndices::new(self.x * size, self.y * size)
    }
}

impl Serde for ChunkIndices {
    fn ser(&self, writer: &mut dyn BitWrite) {
        SignedVariableInteger::<5>::new(self.x).ser(writer);
        SignedVariableInteger::<5>::new(self.y).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let read_axis = |reader: &mut BitReader| -> Result<i32, SerdeErr> {
            let value = SignedVariableInteger::<5>::de(reader)?.get();
            i32::try_from(value).map_err(|_| SerdeErr::OutOfRange {
                value: value as i128,
                type_name: "ChunkIndices",
            })
        };
        let x = read_axis(reader)?;
        let y = read_axis(reader)?;
        Ok(Self { x, y })
    }

    fn bit_length(&self) -> u32 {
        SignedVariableInteger::<5>::new(self.x).bit_length()
            + SignedVariableInteger::<5>::new(self.y).bit_length()
    }
}

/// Globally unique chunk address, the unit of replication
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub surface: SurfaceId,
    pub indices: ChunkIndices,
}

impl ChunkKey {
    pub fn new(surface: SurfaceId, indices: ChunkIndices) -> Self {
        Self { surface, indices }
    }
}

impl Serde for ChunkKey {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.surface.ser(writer);
        self.indices.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            surface: SurfaceId::de(reader)?,
            indices: ChunkIndices::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.surface.bit_length() + self.indices.bit_length()
    }
}

/// Axis-aligned box in tile space. Both edges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileBox {
    pub min: Position,
    pub max: Position,
}

impl TileBox {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }

    /// Every chunk that overlaps this box
    pub fn chunks(&self, chunk_size: u32) -> impl Iterator<Item = ChunkIndices> {
        let low = self.min.tile().chunk(chunk_size);
        let high = self.max.tile().chunk(chunk_size);
        (low.x..=high.x).flat_map(move |x| (low.y..=high.y).map(move |y| ChunkIndices::new(x, y)))
    }
}
