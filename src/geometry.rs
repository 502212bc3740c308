//! Route shape handling: the compact encoded shape carried by trip legs and the estimation of
//! the road heading at a shape point.

use geo::{Bearing, Distance, Haversine, InterpolatePoint};

use crate::{Coordinate, Length, ShapeError};

/// Number of decimal digits kept by the compact shape encoding.
const SHAPE_PRECISION: f64 = 1e6;

/// Decodes a compact encoded shape (polyline with 6 decimal digits, latitude first).
pub fn decode_shape(encoded: &str) -> Result<Vec<Coordinate>, ShapeError> {
    let bytes = encoded.as_bytes();
    let mut shape = Vec::with_capacity(bytes.len() / 4);

    let mut index = 0;
    let (mut lat, mut lon) = (0i64, 0i64);

    while index < bytes.len() {
        lat = lat
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(ShapeError::Overflow(index))?;
        lon = lon
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(ShapeError::Overflow(index))?;
        shape.push(Coordinate {
            lon: lon as f64 / SHAPE_PRECISION,
            lat: lat as f64 / SHAPE_PRECISION,
        });
    }

    Ok(shape)
}

/// Encodes a shape into its compact representation (polyline with 6 decimal digits).
pub fn encode_shape(shape: &[Coordinate]) -> String {
    let mut encoded = String::with_capacity(shape.len() * 8);
    let (mut previous_lat, mut previous_lon) = (0i64, 0i64);

    for coordinate in shape {
        let lat = (coordinate.lat * SHAPE_PRECISION).round() as i64;
        let lon = (coordinate.lon * SHAPE_PRECISION).round() as i64;
        encode_value(lat - previous_lat, &mut encoded);
        encode_value(lon - previous_lon, &mut encoded);
        (previous_lat, previous_lon) = (lat, lon);
    }

    encoded
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, ShapeError> {
    let mut value = 0i64;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(ShapeError::Truncated(*index))?;
        if shift > 56 {
            return Err(ShapeError::Overflow(*index));
        }

        let chunk = byte.wrapping_sub(63) as i64;
        *index += 1;
        value |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if value & 1 == 1 { !(value >> 1) } else { value >> 1 })
}

fn encode_value(value: i64, encoded: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };

    while value >= 0x20 {
        encoded.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    encoded.push(char::from(value as u8 + 63));
}

/// Estimates the heading (degrees clockwise from North in [0, 360)) of the shape at `index`.
///
/// Walks the shape from `index` forward (or backward) until `window` meters have been covered
/// or the `[lower_bound, upper_bound]` span is exhausted, and returns the bearing from the
/// shape point at `index` towards the farthest point reached. When the span does not allow
/// walking in the requested direction the bearing of the only available segment, oriented in
/// the requested direction, is returned instead.
///
/// A span collapsed onto a single location has no heading: 0 is returned.
pub fn tangent_heading(
    shape: &[Coordinate],
    index: usize,
    window: Length,
    forward: bool,
    lower_bound: usize,
    upper_bound: usize,
) -> f64 {
    debug_assert!(lower_bound <= index && index <= upper_bound);
    debug_assert!(upper_bound < shape.len());

    let origin: geo::Point = shape[index].into();

    let reached = walk_shape(shape, index, window, forward, lower_bound, upper_bound)
        .or_else(|| {
            let neighbour = step(index, !forward, lower_bound, upper_bound)?;
            let neighbour: geo::Point = shape[neighbour].into();
            // Mirror the only segment available so it points in the requested direction.
            Some(geo::Point::new(
                2.0 * origin.x() - neighbour.x(),
                2.0 * origin.y() - neighbour.y(),
            ))
        });

    match reached {
        Some(reached) if Haversine.distance(origin, reached) > 0.0 => {
            Haversine.bearing(origin, reached).rem_euclid(360.0)
        }
        _ => 0.0,
    }
}

/// Returns the point at `window` meters from `index` along the shape, or the last point of the
/// span when the span is shorter than the window. Returns `None` if the walk cannot start.
fn walk_shape(
    shape: &[Coordinate],
    index: usize,
    window: Length,
    forward: bool,
    lower_bound: usize,
    upper_bound: usize,
) -> Option<geo::Point> {
    let mut remaining = window.meters();
    let mut current = index;
    let mut reached = None;

    while let Some(next) = step(current, forward, lower_bound, upper_bound) {
        let from: geo::Point = shape[current].into();
        let to: geo::Point = shape[next].into();
        let distance = Haversine.distance(from, to);

        if distance >= remaining && distance > 0.0 {
            return Some(Haversine.point_at_ratio_between(from, to, remaining / distance));
        }

        remaining -= distance;
        reached = Some(to);
        current = next;
    }

    reached
}

const fn step(
    index: usize,
    forward: bool,
    lower_bound: usize,
    upper_bound: usize,
) -> Option<usize> {
    if forward && index < upper_bound {
        Some(index + 1)
    } else if !forward && index > lower_bound {
        Some(index - 1)
    } else {
        None
    }
}
