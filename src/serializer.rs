//! Turns a completed [`Api`] response into the requested output format.

mod json;
pub mod osrm;
mod pbf;

use serde_json::{Map, Value};
use tracing::info;

pub use pbf::{apply_field_selection, default_field_selection, serialize_pbf};

use crate::encoder::encode_route;
use crate::proto::{Api, Format, Location, Options, TripRoute};
use crate::{Coordinate, EncoderConfig, SerializerError};

/// A serialized response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serialized {
    Json(String),
    Pbf(Vec<u8>),
}

/// Serializes the response in the format requested by its options.
///
/// The binary format may remove substructures from `api` (see [`serialize_pbf`]); the JSON
/// formats leave it untouched. Actions without a representation in the requested format are
/// rejected with [`SerializerError::UnsupportedAction`].
pub fn serialize(config: &EncoderConfig, api: &mut Api) -> Result<Serialized, SerializerError> {
    let (format, action) = api
        .options
        .as_ref()
        .map(|options| (options.format(), options.action()))
        .unwrap_or_default();

    info!("Serializing {action} response as {format}");

    match format {
        Format::Json => json::serialize(config, api).map(Serialized::Json),
        Format::Osrm => osrm::serialize(config, api).map(Serialized::Json),
        Format::Pbf => serialize_pbf(api).map(Serialized::Pbf),
    }
}

/// Serializes the service status, as JSON unless the binary format was requested.
pub fn serialize_status(api: &mut Api) -> Result<Serialized, SerializerError> {
    let format = api.options.as_ref().map(Options::format).unwrap_or_default();
    if format == Format::Pbf {
        return serialize_pbf(api).map(Serialized::Pbf);
    }

    json::status(api).map(|status| Serialized::Json(status.to_string()))
}

/// True if linear references were requested and the action describes routes.
pub fn wants_linear_references(options: &Options) -> bool {
    options.linear_references && options.action().allows_linear_references()
}

/// Attaches the OpenLR references of every edge of the route, in leg then edge order, under
/// `linear_references`. Nothing is attached unless [`wants_linear_references`].
pub fn route_references(
    config: &EncoderConfig,
    route_json: &mut Map<String, Value>,
    route: &TripRoute,
    options: &Options,
) -> Result<(), SerializerError> {
    if !wants_linear_references(options) {
        return Ok(());
    }

    let references = encode_route(config, route)?;
    route_json.insert("linear_references".to_owned(), Value::from(references));
    Ok(())
}

/// Serializes the response warnings as `[{"code": .., "text": ..}]`.
pub fn serialize_warnings(api: &Api) -> Value {
    let warnings = api.info.iter().flat_map(|info| &info.warnings);

    warnings
        .map(|warning| {
            let mut json = Map::new();
            json.insert("code".to_owned(), Value::from(warning.code));
            json.insert("text".to_owned(), Value::from(warning.description.as_str()));
            Value::Object(json)
        })
        .collect()
}

/// Serializes a shape as a GeoJSON LineString with 6 decimal digits coordinates.
pub fn geojson_shape(shape: &[Coordinate]) -> Value {
    let coordinates = shape
        .iter()
        .map(|c| vec![fixed(c.lon, 6), fixed(c.lat, 6)])
        .collect();

    let geometry = geojson::Geometry::new(geojson::Value::LineString(coordinates));
    Value::Object(geojson::JsonObject::from(&geometry))
}

/// Inserts the warnings under `warnings`, only if there are any.
fn insert_warnings(json: &mut Map<String, Value>, api: &Api) {
    let warnings = serialize_warnings(api);
    if warnings.as_array().is_some_and(|warnings| !warnings.is_empty()) {
        json.insert("warnings".to_owned(), warnings);
    }
}

/// Iterates over the locations of a route. The first location of every leg but the first one
/// is skipped since it is the last location of the previous leg.
fn route_locations(route: &TripRoute) -> impl Iterator<Item = &Location> {
    route
        .legs
        .iter()
        .enumerate()
        .flat_map(|(i, leg)| leg.location.iter().skip(if i == 0 { 0 } else { 1 }))
}

/// Rounds to the given number of decimal digits.
fn fixed(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
