use std::io::{Cursor, Read};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::binary::encoding::EncodedAttributes;
use crate::binary::{LINE_LOCATION_TYPE, VERSION};
use crate::{
    Bearing, Coordinate, DeserializeError, Fow, Frc, Length, Line, LineAttributes, Offset,
    PathAttributes, Point,
};

/// Deserializes an OpenLR Line Location Reference encoded in Base64.
pub fn deserialize_base64_openlr(data: impl AsRef<[u8]>) -> Result<Line, DeserializeError> {
    let data = BASE64_STANDARD.decode(data)?;
    deserialize_binary_openlr(&data)
}

/// Deserializes a binary representation of an OpenLR Line Location Reference.
pub fn deserialize_binary_openlr(data: &[u8]) -> Result<Line, DeserializeError> {
    let mut reader = OpenLrBinaryReader::new(data);
    reader.read_header()?;
    reader.read_line()
}

#[derive(Debug)]
struct OpenLrBinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> OpenLrBinaryReader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    const fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    fn read_header(&mut self) -> Result<(), DeserializeError> {
        let mut header = [0u8; 1];
        self.cursor.read_exact(&mut header)?;
        let header = header[0];

        let version = header & 0b111;
        if version != VERSION {
            return Err(DeserializeError::VersionNotSupported(version));
        }

        let location_type = (header >> 3) & 0b1111;
        if location_type != LINE_LOCATION_TYPE {
            return Err(DeserializeError::LocationTypeNotSupported(location_type));
        }

        Ok(())
    }

    fn read_line(&mut self) -> Result<Line, DeserializeError> {
        // header (1) + first LRP (9) + last LRP (6) at least
        if self.len() < 16 {
            return Err(DeserializeError::InvalidLine(self.len()));
        }

        let relative_points_count = (self.len() - 9) / 7;
        let mut line = Line::with_capacity(1 + relative_points_count);

        let mut coordinate = self.read_coordinate()?;
        let mut attributes = self.read_attributes()?;

        for _ in 0..relative_points_count {
            let dnp = self.read_dnp()?;

            line.points.push(Point {
                coordinate,
                line: attributes.line,
                path: Some(PathAttributes {
                    lfrcnp: attributes.lfrcnp()?,
                    dnp,
                }),
            });

            coordinate = self.read_relative_coordinate(coordinate)?;
            attributes = self.read_attributes()?;
        }

        line.points.push(Point {
            coordinate,
            line: attributes.line,
            path: None,
        });

        let mut read_offset = |offset_flag| {
            if offset_flag {
                self.read_offset()
            } else {
                Ok(Offset::default())
            }
        };

        line.offsets.pos = read_offset(attributes.pos_offset_flag())?;
        line.offsets.neg = read_offset(attributes.neg_offset_flag())?;

        Ok(line)
    }

    fn read_coordinate(&mut self) -> Result<Coordinate, DeserializeError> {
        let mut read_degrees = || -> Result<f64, DeserializeError> {
            let mut bytes = [0u8; 3];
            self.cursor.read_exact(&mut bytes)?;
            Ok(Coordinate::degrees_from_be_bytes(bytes))
        };

        let lon = read_degrees()?;
        let lat = read_degrees()?;
        Ok(Coordinate { lon, lat })
    }

    fn read_relative_coordinate(
        &mut self,
        previous: Coordinate,
    ) -> Result<Coordinate, DeserializeError> {
        let mut read_degrees = |previous| -> Result<f64, DeserializeError> {
            let mut bytes = [0u8; 2];
            self.cursor.read_exact(&mut bytes)?;
            Ok(Coordinate::degrees_from_be_bytes_relative(bytes, previous))
        };

        let lon = read_degrees(previous.lon)?;
        let lat = read_degrees(previous.lat)?;
        Ok(Coordinate { lon, lat })
    }

    fn read_attributes(&mut self) -> Result<EncodedAttributes, DeserializeError> {
        let mut bytes = [0u8; 2];
        self.cursor.read_exact(&mut bytes)?;
        let [first_byte, second_byte] = bytes;

        let line = LineAttributes {
            fow: Fow::try_from_byte(first_byte & 0b111)?,
            frc: Frc::try_from_byte((first_byte >> 3) & 0b111)?,
            bear: Bearing::from_byte(second_byte & 0b11111),
        };

        Ok(EncodedAttributes {
            line,
            lfrcnp_or_flags: (second_byte >> 5) & 0b111,
        })
    }

    fn read_dnp(&mut self) -> Result<Length, DeserializeError> {
        let mut dnp = [0u8; 1];
        self.cursor.read_exact(&mut dnp)?;
        Ok(Length::dnp_from_byte(dnp[0]))
    }

    fn read_offset(&mut self) -> Result<Offset, DeserializeError> {
        let mut offset = [0u8; 1];
        self.cursor.read_exact(&mut offset)?;
        Ok(Offset::from_byte(offset[0]))
    }
}
