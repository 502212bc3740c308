//! OpenLR physical data format (binary version 3) for line location references.

mod encoding;
mod reader;
mod writer;

pub use reader::{deserialize_base64_openlr, deserialize_binary_openlr};
pub use writer::{serialize_base64_openlr, serialize_binary_openlr};

const VERSION: u8 = 3;
const LINE_LOCATION_TYPE: u8 = 1;
