use tracing::debug;

use crate::encoder::classify::classify;
use crate::geometry::tangent_heading;
use crate::proto::TripEdge;
use crate::{
    Bearing, Coordinate, EncoderConfig, EncoderError, Frc, Length, Line, LineAttributes,
    PathAttributes, Point,
};

/// A location reference point not yet linked to its successor.
#[derive(Debug, Clone, Copy)]
struct ChainNode {
    coordinate: Coordinate,
    line: LineAttributes,
    /// Lowest FRC of the lines between this node and the next one.
    lfrcnp: Frc,
    distance_from_start: Length,
}

/// Builds the line location reference covering exactly one edge of a leg, from its start node
/// to its end node, using the leg shape to compute the bearings at both ends.
pub fn edge_line(
    config: &EncoderConfig,
    shape: &[Coordinate],
    edge: &TripEdge,
) -> Result<Line, EncoderError> {
    let (begin, end) = edge_shape_span(shape, edge)?;
    let (frc, fow) = classify(edge);

    let forward = tangent_heading(shape, begin, config.bearing_distance, true, begin, end);
    let reverse = tangent_heading(shape, end, config.bearing_distance, false, begin, end);

    let start = ChainNode {
        coordinate: shape[begin],
        line: LineAttributes {
            frc,
            fow,
            bear: Bearing::from_heading(forward),
        },
        lfrcnp: frc,
        distance_from_start: Length::ZERO,
    };

    let end = ChainNode {
        coordinate: shape[end],
        line: LineAttributes {
            bear: Bearing::from_heading(reverse),
            ..start.line
        },
        lfrcnp: frc,
        distance_from_start: Length::from_kilometers(edge.length_km as f64).round(),
    };

    let line = link_chain(&[start, end]);
    debug!("Edge {} referenced by {line:?}", edge.way_id);
    Ok(line)
}

/// Validates the edge shape span against the leg shape.
fn edge_shape_span(shape: &[Coordinate], edge: &TripEdge) -> Result<(usize, usize), EncoderError> {
    let out_of_bounds = |index: u32| EncoderError::ShapeIndexOutOfBounds {
        index,
        len: shape.len(),
    };

    let (begin, end) = (edge.begin_shape_index, edge.end_shape_index);
    debug_assert!(begin <= end, "Edge shape span [{begin}, {end}] is reversed");
    debug_assert!((end as usize) < shape.len(), "Edge shape index {end} is out of bounds");

    if begin > end {
        return Err(out_of_bounds(begin));
    }
    if end as usize >= shape.len() {
        return Err(out_of_bounds(end));
    }

    Ok((begin as usize, end as usize))
}

/// Fills in the path attributes of every node from its successor. The last point has none.
fn link_chain(nodes: &[ChainNode]) -> Line {
    let mut line = Line::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        let path = nodes.get(i + 1).map(|next| PathAttributes {
            lfrcnp: node.lfrcnp,
            dnp: next.distance_from_start - node.distance_from_start,
        });

        line.points.push(Point {
            coordinate: node.coordinate,
            line: node.line,
            path,
        });
    }

    line
}
