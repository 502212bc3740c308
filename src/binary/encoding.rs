use crate::model::Offsets;
use crate::{
    Bearing, Coordinate, DeserializeError, Fow, Frc, Length, LineAttributes, Offset, SerializeError,
};

/// Attributes of a location reference point as laid out in the two attribute bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EncodedAttributes {
    pub(crate) line: LineAttributes,
    pub(crate) lfrcnp_or_flags: u8,
}

impl From<LineAttributes> for EncodedAttributes {
    fn from(line: LineAttributes) -> Self {
        Self {
            line,
            lfrcnp_or_flags: 0,
        }
    }
}

impl EncodedAttributes {
    pub(crate) const fn with_lfrcnp(mut self, lfrcnp: Frc) -> Self {
        self.lfrcnp_or_flags = lfrcnp.into_byte();
        self
    }

    pub(crate) const fn with_offsets(mut self, offsets: &Offsets) -> Self {
        self.lfrcnp_or_flags = offsets.into_byte();
        self
    }

    pub(crate) const fn lfrcnp(&self) -> Result<Frc, DeserializeError> {
        Frc::try_from_byte(self.lfrcnp_or_flags)
    }

    pub(crate) const fn pos_offset_flag(&self) -> bool {
        self.lfrcnp_or_flags & 0b10 != 0
    }

    pub(crate) const fn neg_offset_flag(&self) -> bool {
        self.lfrcnp_or_flags & 0b01 != 0
    }
}

impl Frc {
    pub(crate) const fn try_from_byte(byte: u8) -> Result<Self, DeserializeError> {
        match byte {
            0 => Ok(Self::Frc0),
            1 => Ok(Self::Frc1),
            2 => Ok(Self::Frc2),
            3 => Ok(Self::Frc3),
            4 => Ok(Self::Frc4),
            5 => Ok(Self::Frc5),
            6 => Ok(Self::Frc6),
            7 => Ok(Self::Frc7),
            _ => Err(DeserializeError::InvalidFrc(byte)),
        }
    }

    pub(crate) const fn into_byte(self) -> u8 {
        self as u8
    }
}

impl Fow {
    pub(crate) const fn try_from_byte(byte: u8) -> Result<Self, DeserializeError> {
        match byte {
            0 => Ok(Self::Undefined),
            1 => Ok(Self::Motorway),
            2 => Ok(Self::MultipleCarriageway),
            3 => Ok(Self::SingleCarriageway),
            4 => Ok(Self::Roundabout),
            5 => Ok(Self::TrafficSquare),
            6 => Ok(Self::SlipRoad),
            7 => Ok(Self::Other),
            _ => Err(DeserializeError::InvalidFow(byte)),
        }
    }

    pub(crate) const fn into_byte(self) -> u8 {
        self as u8
    }
}

impl Coordinate {
    const RESOLUTION: usize = 24;
    const DECA_MICRO_DEG_FACTOR: f64 = 100000.0;

    /// Returns degrees from a big-endian degrees representation in a 24-bit resolution.
    pub(crate) fn degrees_from_be_bytes(bytes: [u8; 3]) -> f64 {
        let is_negative = bytes[0] & 0x80 != 0;
        let sign = if is_negative { 0xFF } else { 0 };
        let degrees = i32::from_be_bytes([sign, bytes[0], bytes[1], bytes[2]]) as f64;
        ((degrees - signum(degrees) * 0.5) * 360.0) / (1 << Self::RESOLUTION) as f64
    }

    /// Returns the big-endian representation of the given degrees in a 24-bit resolution.
    pub(crate) fn degrees_into_be_bytes(degrees: f64) -> [u8; 3] {
        let degrees = signum(degrees) * 0.5 + degrees * (1 << Self::RESOLUTION) as f64 / 360.0;
        let degrees = (degrees.round() as i32).to_be_bytes();
        [degrees[1], degrees[2], degrees[3]]
    }

    /// Returns degrees from a big-endian relative degrees representation in a 16-bit resolution.
    pub(crate) fn degrees_from_be_bytes_relative(bytes: [u8; 2], previous_degrees: f64) -> f64 {
        let degrees = i16::from_be_bytes(bytes) as f64;
        previous_degrees + degrees / Self::DECA_MICRO_DEG_FACTOR
    }

    /// Returns the big-endian relative degrees representation in a 16-bit resolution.
    /// Fails when the points are too far apart (about 0.327 degrees) to be represented.
    pub(crate) fn degrees_into_be_bytes_relative(
        degrees: f64,
        previous_degrees: f64,
    ) -> Result<[u8; 2], SerializeError> {
        let delta = degrees - previous_degrees;
        let relative = (Self::DECA_MICRO_DEG_FACTOR * delta).round();
        if !(i16::MIN as f64..=i16::MAX as f64).contains(&relative) {
            return Err(SerializeError::RelativeCoordinateOutOfRange(delta));
        }
        Ok(i16::to_be_bytes(relative as i16))
    }
}

impl Length {
    /// This representation defines 256 intervals and each interval has a length of approximately 58.6 meters.
    const DISTANCE_PER_INTERVAL: f64 = 58.6;

    /// Returns the distance to next LR-point in meters from a byte.
    pub(crate) fn dnp_from_byte(byte: u8) -> Self {
        let meters = ((byte as f64 + 0.5) * Self::DISTANCE_PER_INTERVAL).round();
        Self::from_meters(meters)
    }

    /// Returns the distance to next LR-point interval.
    /// Distances beyond the last interval saturate into it.
    pub(crate) fn dnp_into_byte(self) -> u8 {
        let meters = self.min(Self::MAX_BINARY_LRP_DISTANCE).meters();
        (meters / Self::DISTANCE_PER_INTERVAL - 0.5).round() as u8
    }
}

impl Bearing {
    /// The data format defines 32 sectors whereby each sector covers 11.25° of the circle.
    pub const SECTOR: f64 = 11.25;

    pub(crate) fn from_byte(byte: u8) -> Self {
        let degrees = (byte as f64 * Self::SECTOR + Self::SECTOR / 2.0).round() as u16;
        Self::from_degrees(degrees)
    }

    pub(crate) fn try_into_byte(self) -> Result<u8, SerializeError> {
        let degrees = self.degrees();
        if !(0..360).contains(&degrees) {
            return Err(SerializeError::InvalidBearing(degrees));
        }

        let bear = (degrees as f64 - Self::SECTOR / 2.0) / Self::SECTOR;
        Ok(bear.round() as u8)
    }
}

impl Offset {
    /// Every one of the 256 buckets covers 0.390625% of the LRP length.
    /// Returns the offset in [0, 1] range.
    pub(crate) fn from_byte(bucket: u8) -> Self {
        Self::from_range((bucket as f64 + 0.5) / 256.0)
    }

    /// Returns the bucket index corresponding to the given offset.
    pub(crate) fn try_into_byte(self) -> Result<u8, SerializeError> {
        let range = self.range();
        if !(0.0..1.0).contains(&range) {
            return Err(SerializeError::InvalidOffset(range));
        }

        let bucket = if range == 0.0 {
            0
        } else {
            (range * 256.0 - 0.5).round() as u8
        };

        Ok(bucket)
    }
}

impl Offsets {
    pub(crate) const fn into_byte(self) -> u8 {
        let pos = ((self.pos.range() > 0.0) as u8) << 1;
        let neg = (self.neg.range() > 0.0) as u8;
        pos + neg
    }
}

const fn signum(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value.signum() }
}
