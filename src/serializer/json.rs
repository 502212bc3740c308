use serde_json::{Map, Value, json};
use tracing::warn;

use crate::proto::{
    Action, Api, DirectionsLeg, DirectionsRoute, Format, Location, Maneuver, Matrix, Options,
    Summary, TripLeg, TripRoute, Units,
};
use crate::serializer::{fixed, insert_warnings, route_locations, route_references};
use crate::{EncoderConfig, SerializerError};

/// Serializes the response in the native JSON format.
pub(crate) fn serialize(config: &EncoderConfig, api: &Api) -> Result<String, SerializerError> {
    let default_options = Options::default();
    let options = api.options.as_ref().unwrap_or(&default_options);

    let json = match options.action() {
        Action::Route | Action::OptimizedRoute | Action::TraceRoute | Action::Centroid => {
            routes(config, api, options)?
        }
        Action::TraceAttributes => trace_attributes(api, options),
        Action::SourcesToTargets => sources_to_targets(api, options),
        Action::Status => status(api)?,
        action @ (Action::NoAction
        | Action::Locate
        | Action::Isochrone
        | Action::Height
        | Action::TransitAvailable
        | Action::Expansion) => {
            warn!("Requested action {action} is not serializable as json");
            return Err(SerializerError::UnsupportedAction {
                action,
                format: Format::Json,
            });
        }
    };

    Ok(json.to_string())
}

/// The first route under `trip`, every other one under `alternates`.
fn routes(config: &EncoderConfig, api: &Api, options: &Options) -> Result<Value, SerializerError> {
    let trip_routes = api.trip.iter().flat_map(|trip| &trip.routes);
    let directions_routes = api.directions.iter().flat_map(|d| &d.routes);
    let count = trip_routes.clone().count().max(directions_routes.clone().count());

    let mut trips = Vec::with_capacity(count);
    for i in 0..count {
        let trip_route = trip_routes.clone().nth(i);
        let directions_route = directions_routes.clone().nth(i);
        trips.push(trip(config, api, options, trip_route, directions_route)?);
    }

    let mut json = Map::new();
    let mut trips = trips.into_iter();
    if let Some(trip) = trips.next() {
        json.insert("trip".to_owned(), trip);
    }

    let alternates: Vec<Value> = trips.map(|trip| json!({ "trip": trip })).collect();
    if !alternates.is_empty() {
        json.insert("alternates".to_owned(), Value::from(alternates));
    }

    if let Some(id) = &options.id {
        json.insert("id".to_owned(), Value::from(id.as_str()));
    }

    Ok(Value::Object(json))
}

fn trip(
    config: &EncoderConfig,
    api: &Api,
    options: &Options,
    trip_route: Option<&TripRoute>,
    directions_route: Option<&DirectionsRoute>,
) -> Result<Value, SerializerError> {
    let units = options.units();
    let mut json = Map::new();

    let locations: Vec<Value> = trip_route
        .into_iter()
        .flat_map(route_locations)
        .map(location)
        .collect();
    json.insert("locations".to_owned(), Value::from(locations));

    if let Some(route) = directions_route {
        let legs: Vec<Value> = route.legs.iter().map(|leg| directions_leg(leg, units)).collect();
        json.insert("legs".to_owned(), Value::from(legs));

        let (length, time) = route.totals();
        json.insert(
            "summary".to_owned(),
            json!({
                "length": fixed(units.from_kilometers(length), 3),
                "time": fixed(time, 3),
            }),
        );
    }

    json.insert(
        "status_message".to_owned(),
        Value::from("Found route between points"),
    );
    json.insert("status".to_owned(), Value::from(0));
    json.insert("units".to_owned(), Value::from(units.to_string()));
    json.insert("language".to_owned(), Value::from(options.language.as_str()));
    insert_warnings(&mut json, api);

    if let Some(route) = trip_route {
        route_references(config, &mut json, route, options)?;
    }

    Ok(Value::Object(json))
}

fn location(location: &Location) -> Value {
    let mut json = Map::new();
    json.insert(
        "type".to_owned(),
        Value::from(location.location_type().to_string()),
    );

    if let Some(ll) = &location.ll {
        json.insert("lat".to_owned(), Value::from(fixed(ll.lat, 6)));
        json.insert("lon".to_owned(), Value::from(fixed(ll.lng, 6)));
    }
    if !location.name.is_empty() {
        json.insert("name".to_owned(), Value::from(location.name.as_str()));
    }
    if let Some(correlation) = &location.correlation {
        json.insert(
            "original_index".to_owned(),
            Value::from(correlation.original_index),
        );
    }

    Value::Object(json)
}

fn directions_leg(leg: &DirectionsLeg, units: Units) -> Value {
    let maneuvers: Vec<Value> = leg.maneuvers.iter().map(|m| maneuver(m, units)).collect();
    let summary = leg.summary.unwrap_or_default();

    json!({
        "maneuvers": maneuvers,
        "summary": summary_json(&summary, units),
        "shape": leg.shape,
    })
}

fn summary_json(summary: &Summary, units: Units) -> Value {
    json!({
        "length": fixed(units.from_kilometers(summary.length as f64), 3),
        "time": fixed(summary.time, 3),
        "has_toll": summary.has_toll,
        "has_highway": summary.has_highway,
        "has_ferry": summary.has_ferry,
    })
}

fn maneuver(maneuver: &Maneuver, units: Units) -> Value {
    let mut json = Map::new();
    json.insert("type".to_owned(), Value::from(maneuver.maneuver_type));
    json.insert(
        "instruction".to_owned(),
        Value::from(maneuver.text_instruction.as_str()),
    );
    if !maneuver.street_name.is_empty() {
        json.insert(
            "street_names".to_owned(),
            Value::from(maneuver.street_name.clone()),
        );
    }
    json.insert(
        "length".to_owned(),
        Value::from(fixed(units.from_kilometers(maneuver.length as f64), 3)),
    );
    json.insert("time".to_owned(), Value::from(fixed(maneuver.time, 3)));
    json.insert(
        "begin_shape_index".to_owned(),
        Value::from(maneuver.begin_shape_index),
    );
    json.insert(
        "end_shape_index".to_owned(),
        Value::from(maneuver.end_shape_index),
    );
    Value::Object(json)
}

/// The edges matched by the trace and the matched shape, of the first leg of the first route.
/// Linear references are never attached to this action.
fn trace_attributes(api: &Api, options: &Options) -> Value {
    let units = options.units();
    let leg = api
        .trip
        .as_ref()
        .and_then(|trip| trip.routes.first())
        .and_then(|route| route.legs.first());

    let edges: Vec<Value> = leg
        .into_iter()
        .flat_map(TripLeg::edges)
        .map(|edge| {
            let mut json = json!({
                "names": edge.names,
                "length": fixed(units.from_kilometers(edge.length_km as f64), 3),
                "speed": fixed(edge.speed as f64, 3),
                "road_class": edge.road_class().to_string(),
                "use": edge.edge_use().to_string(),
                "traversability": edge.traversability().to_string(),
                "begin_shape_index": edge.begin_shape_index,
                "end_shape_index": edge.end_shape_index,
                "way_id": edge.way_id,
            });
            if edge.roundabout {
                json["roundabout"] = Value::from(true);
            }
            json
        })
        .collect();

    let mut json = Map::new();
    json.insert("edges".to_owned(), Value::from(edges));
    if let Some(leg) = leg {
        json.insert("shape".to_owned(), Value::from(leg.shape.as_str()));
    }
    json.insert("units".to_owned(), Value::from(units.to_string()));
    insert_warnings(&mut json, api);

    Value::Object(json)
}

/// One row per source, one cell per target. Unreachable cells have null distance and time.
fn sources_to_targets(api: &Api, options: &Options) -> Value {
    const UNREACHABLE: u32 = u32::MAX;

    let units = options.units();
    let default_matrix = Matrix::default();
    let matrix = api.matrix.as_ref().unwrap_or(&default_matrix);

    let cells: Vec<(u32, Value)> = matrix
        .from_indices
        .iter()
        .zip(&matrix.to_indices)
        .zip(matrix.distances.iter().zip(&matrix.times))
        .map(|((&from, &to), (&distance, &time))| {
            let (distance, time) = if distance == UNREACHABLE {
                (Value::Null, Value::Null)
            } else {
                let kilometers = distance as f64 / 1000.0;
                (
                    Value::from(fixed(units.from_kilometers(kilometers), 3)),
                    Value::from(fixed(time as f64, 3)),
                )
            };

            let cell = json!({
                "from_index": from,
                "to_index": to,
                "distance": distance,
                "time": time,
            });
            (from, cell)
        })
        .collect();

    let rows: Vec<Value> = cells
        .chunk_by(|(a, _), (b, _)| a == b)
        .map(|row| row.iter().map(|(_, cell)| cell.clone()).collect())
        .collect();

    let mut json = Map::new();
    json.insert("sources_to_targets".to_owned(), Value::from(rows));
    json.insert("units".to_owned(), Value::from(units.to_string()));
    insert_warnings(&mut json, api);
    Value::Object(json)
}

/// Service status. Optional flags are only present when known and a zero changeset means
/// there is none.
pub(crate) fn status(api: &Api) -> Result<Value, SerializerError> {
    let default_status = Default::default();
    let status = api.status.as_ref().unwrap_or(&default_status);

    let mut json = Map::new();
    json.insert("version".to_owned(), Value::from(status.version.as_str()));
    json.insert(
        "tileset_last_modified".to_owned(),
        Value::from(status.tileset_last_modified),
    );
    json.insert(
        "available_actions".to_owned(),
        Value::from(status.available_actions.clone()),
    );

    for (key, flag) in [
        ("has_tiles", status.has_tiles),
        ("has_admins", status.has_admins),
        ("has_timezones", status.has_timezones),
        ("has_live_traffic", status.has_live_traffic),
        ("has_transit_tiles", status.has_transit_tiles),
    ] {
        if let Some(flag) = flag {
            json.insert(key.to_owned(), Value::from(flag));
        }
    }

    if let Some(changeset) = status.osm_changeset.filter(|&changeset| changeset != 0) {
        json.insert("osm_changeset".to_owned(), Value::from(changeset));
    }

    if let Some(bbox) = &status.bbox {
        let bbox: Value = serde_json::from_str(bbox).map_err(|_| SerializerError::InvalidBbox)?;
        json.insert("bbox".to_owned(), bbox);
    }

    Ok(Value::Object(json))
}
