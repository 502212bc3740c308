use std::io::ErrorKind;

use thiserror::Error;

use crate::proto::{Action, Format};

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum DeserializeError {
    #[error("OpenLR invalid Base 64")]
    InvalidBase64,
    #[error("OpenLR buffer I/O error: {0:?}")]
    IO(ErrorKind),
    #[error("OpenLR version {0} not supported")]
    VersionNotSupported(u8),
    #[error("OpenLR location type {0} not supported")]
    LocationTypeNotSupported(u8),
    #[error("OpenLR Line of {0} bytes is too short")]
    InvalidLine(usize),
    #[error("OpenLR FRC is not valid: {0}")]
    InvalidFrc(u8),
    #[error("OpenLR FOW is not valid: {0}")]
    InvalidFow(u8),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum SerializeError {
    #[error("OpenLR buffer I/O error: {0:?}")]
    IO(ErrorKind),
    #[error("OpenLR Bearing is not valid, expected [0, 360): {0}")]
    InvalidBearing(u16),
    #[error("OpenLR Offset is not valid, expected [0, 1): {0}")]
    InvalidOffset(f64),
    #[error("OpenLR Line consists of at least 2 LR-points")]
    InvalidLine,
    #[error("OpenLR relative coordinate is out of the 16-bit range: {0} degrees")]
    RelativeCoordinateOutOfRange(f64),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ShapeError {
    #[error("Encoded shape is truncated at byte {0}")]
    Truncated(usize),
    #[error("Encoded shape value overflows at byte {0}")]
    Overflow(usize),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum EncoderError {
    #[error("Cannot decode leg shape: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("Edge shape index {index} is out of bounds for a shape of {len} points")]
    ShapeIndexOutOfBounds { index: u32, len: usize },
    #[error("Cannot encode location: {0}")]
    SerializeError(#[from] SerializeError),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum SerializerError {
    #[error("Requested action {action} is not yet serializable as {format}")]
    UnsupportedAction { action: Action, format: Format },
    #[error("Cannot encode linear references: {0}")]
    Encoder(#[from] EncoderError),
    #[error("Status bounding box is not valid JSON")]
    InvalidBbox,
}

impl From<base64::DecodeError> for DeserializeError {
    fn from(_: base64::DecodeError) -> Self {
        Self::InvalidBase64
    }
}

impl From<std::io::Error> for DeserializeError {
    fn from(error: std::io::Error) -> Self {
        Self::IO(error.kind())
    }
}

impl From<std::io::Error> for SerializeError {
    fn from(error: std::io::Error) -> Self {
        Self::IO(error.kind())
    }
}
