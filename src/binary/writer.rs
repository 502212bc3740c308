use std::io::{Cursor, Write};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::binary::encoding::EncodedAttributes;
use crate::binary::{LINE_LOCATION_TYPE, VERSION};
use crate::{Coordinate, Length, Line, Offset, SerializeError};

/// Serializes an OpenLR Line Location Reference into Base64.
pub fn serialize_base64_openlr(line: &Line) -> Result<String, SerializeError> {
    let data = serialize_binary_openlr(line)?;
    Ok(BASE64_STANDARD.encode(data))
}

/// Serializes an OpenLR Line Location Reference into binary.
pub fn serialize_binary_openlr(line: &Line) -> Result<Vec<u8>, SerializeError> {
    let mut writer = OpenLrBinaryWriter::default();
    writer.write_header()?;
    writer.write_line(line)?;
    Ok(writer.cursor.into_inner())
}

#[derive(Debug, Default)]
struct OpenLrBinaryWriter {
    cursor: Cursor<Vec<u8>>,
}

impl OpenLrBinaryWriter {
    fn write_header(&mut self) -> Result<(), SerializeError> {
        let header = VERSION + (LINE_LOCATION_TYPE << 3);
        self.cursor.write_all(&[header])?;
        Ok(())
    }

    fn write_line(&mut self, line: &Line) -> Result<(), SerializeError> {
        let Line { points, offsets } = line;
        if points.len() < 2 {
            return Err(SerializeError::InvalidLine);
        }

        let first_point = points.first().ok_or(SerializeError::InvalidLine)?;
        let mut coordinate = first_point.coordinate;
        self.write_coordinate(&coordinate)?;

        let path = first_point.path.unwrap_or_default();
        let attributes = EncodedAttributes::from(first_point.line).with_lfrcnp(path.lfrcnp);
        self.write_attributes(attributes)?;
        self.write_dnp(&path.dnp)?;

        let relative_points = points.get(1..points.len() - 1).into_iter().flatten();
        for point in relative_points {
            coordinate = self.write_relative_coordinate(point.coordinate, coordinate)?;
            let path = point.path.unwrap_or_default();
            let attributes = EncodedAttributes::from(point.line).with_lfrcnp(path.lfrcnp);
            self.write_attributes(attributes)?;
            self.write_dnp(&path.dnp)?;
        }

        let last_point = points.last().ok_or(SerializeError::InvalidLine)?;
        self.write_relative_coordinate(last_point.coordinate, coordinate)?;
        let attributes = EncodedAttributes::from(last_point.line).with_offsets(offsets);
        self.write_attributes(attributes)?;

        if attributes.pos_offset_flag() {
            self.write_offset(offsets.pos)?;
        }
        if attributes.neg_offset_flag() {
            self.write_offset(offsets.neg)?;
        }

        Ok(())
    }

    fn write_coordinate(&mut self, coordinate: &Coordinate) -> Result<(), SerializeError> {
        let mut write_degrees = |degrees| -> Result<(), SerializeError> {
            let bytes = Coordinate::degrees_into_be_bytes(degrees);
            self.cursor.write_all(&bytes)?;
            Ok(())
        };

        write_degrees(coordinate.lon)?;
        write_degrees(coordinate.lat)
    }

    fn write_relative_coordinate(
        &mut self,
        coordinate: Coordinate,
        previous: Coordinate,
    ) -> Result<Coordinate, SerializeError> {
        let mut write_degrees = |degrees, previous| -> Result<(), SerializeError> {
            let bytes = Coordinate::degrees_into_be_bytes_relative(degrees, previous)?;
            self.cursor.write_all(&bytes)?;
            Ok(())
        };

        write_degrees(coordinate.lon, previous.lon)?;
        write_degrees(coordinate.lat, previous.lat)?;
        Ok(coordinate)
    }

    fn write_attributes(&mut self, attributes: EncodedAttributes) -> Result<(), SerializeError> {
        let fow = attributes.line.fow.into_byte();
        let frc = attributes.line.frc.into_byte();
        let bear = attributes.line.bear.try_into_byte()?;

        let first_byte = fow + (frc << 3);
        let second_byte = bear + (attributes.lfrcnp_or_flags << 5);
        self.cursor.write_all(&[first_byte, second_byte])?;

        Ok(())
    }

    fn write_dnp(&mut self, dnp: &Length) -> Result<(), SerializeError> {
        let dnp = dnp.dnp_into_byte();
        self.cursor.write_all(&[dnp])?;
        Ok(())
    }

    fn write_offset(&mut self, offset: Offset) -> Result<(), SerializeError> {
        let offset = offset.try_into_byte()?;
        self.cursor.write_all(&[offset])?;
        Ok(())
    }
}
