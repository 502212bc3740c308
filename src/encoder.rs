//! The OpenLR encoder generates map-independent location references for the edges traversed
//! by a route, so that they can be re-identified on any other map.

mod classify;
mod lrp;

use tracing::info;

pub use classify::{classify, form_of_way, functional_road_class};
pub use lrp::edge_line;

use crate::geometry::decode_shape;
use crate::proto::{TripLeg, TripRoute};
use crate::{EncoderError, Length, serialize_base64_openlr};

#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    /// The length of the shape section used to compute the bearing at both ends of an edge.
    pub bearing_distance: Length,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            bearing_distance: Length::from_meters(20.0),
        }
    }
}

/// Encodes one OpenLR line location reference (Base64) per edge traversed by the leg, in
/// traversal order. The destination node, which carries no edge, has no reference.
pub fn encode_leg(config: &EncoderConfig, leg: &TripLeg) -> Result<Vec<String>, EncoderError> {
    info!("Encoding {} nodes leg with {config:?}", leg.node.len());

    let shape = decode_shape(&leg.shape)?;

    leg.edges()
        .map(|edge| {
            let line = edge_line(config, &shape, edge)?;
            Ok(serialize_base64_openlr(&line)?)
        })
        .collect()
}

/// Encodes the references of all the legs of a route, in leg then edge order.
pub fn encode_route(
    config: &EncoderConfig,
    route: &TripRoute,
) -> Result<Vec<String>, EncoderError> {
    let mut references = Vec::new();
    for leg in &route.legs {
        references.append(&mut encode_leg(config, leg)?);
    }
    Ok(references)
}
