use crate::{
    BitReader, BitWrite, MarkerKind, Position, Serde, SerdeErr, SignedVariableInteger,
};

/// RGBA color override for a marker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Serde for Color {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for channel in [self.r, self.g, self.b, self.a] {
            writer.write_byte(channel);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            r: reader.read_byte()?,
            g: reader.read_byte()?,
            b: reader.read_byte()?,
            a: reader.read_byte()?,
        })
    }

    fn bit_length(&self) -> u32 {
        32
    }
}

/// A visual annotation attached to a point on a surface
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Position,
    pub color: Option<Color>,
    /// Radians
    pub rotation: f32,
    /// Draw order only
    pub z_index: i32,
    /// Whether cleaning a tile is allowed to remove this marker
    pub cleanable: bool,
}

impl Marker {
    pub fn new(kind: MarkerKind, position: Position) -> Self {
        Self {
            kind,
            position,
            color: None,
            rotation: 0.0,
            z_index: 0,
            cleanable: false,
        }
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_cleanable(mut self, cleanable: bool) -> Self {
        self.cleanable = cleanable;
        self
    }
}

impl Serde for Marker {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.kind.ser(writer);
        self.position.ser(writer);
        self.color.ser(writer);
        self.rotation.ser(writer);
        SignedVariableInteger::<4>::new(self.z_index).ser(writer);
        self.cleanable.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let kind = MarkerKind::de(reader)?;
        let position = Position::de(reader)?;
        let color = Option::<Color>::de(reader)?;
        let rotation = f32::de(reader)?;
        let z_index = SignedVariableInteger::<4>::de(reader)?.get();
        let z_index = i32::try_from(z_index).map_err(|_| SerdeErr::OutOfRange {
            value: z_index as i128,
            type_name: "z_index",
        })?;
        let cleanable = bool::de(reader)?;

        Ok(Self {
            kind,
            position,
            color,
            rotation,
            z_index,
            cleanable,
        })
    }
}
