#![doc = include_str!("../README.md")]

mod binary;
mod encoder;
mod error;
mod geometry;
mod model;
pub mod proto;
mod serializer;

pub use binary::{
    deserialize_base64_openlr, deserialize_binary_openlr, serialize_base64_openlr,
    serialize_binary_openlr,
};
pub use encoder::{
    EncoderConfig, classify, edge_line, encode_leg, encode_route, form_of_way,
    functional_road_class,
};
pub use error::{DeserializeError, EncoderError, SerializeError, SerializerError, ShapeError};
pub use geometry::{decode_shape, encode_shape, tangent_heading};
pub use model::{
    Bearing, Coordinate, Fow, Frc, Length, Line, LineAttributes, Offset, Offsets, PathAttributes,
    Point,
};
pub use serializer::{
    Serialized, apply_field_selection, default_field_selection, geojson_shape, osrm,
    route_references, serialize, serialize_pbf, serialize_status, serialize_warnings,
    wants_linear_references,
};
