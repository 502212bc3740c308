//! OSRM compatible bodies: routes, matchings and trips along with their waypoints.

use chrono::DateTime;
use geo::{Distance, Haversine};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::geometry::{decode_shape, encode_shape};
use crate::proto::{
    Action, Api, DirectionsLeg, DirectionsRoute, Format, IncidentMetadata, Location, LocationType,
    Options, Trip, TripLeg, TripRoute,
};
use crate::serializer::{fixed, insert_warnings, json, route_locations, route_references};
use crate::{Coordinate, EncoderConfig, EncoderError, SerializerError};

const NOT_A_WAYPOINT: u32 = u32::MAX;

/// An input location snapped onto the road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    /// Longitude and latitude of the snapped location.
    pub location: [f64; 2],
    pub name: String,
    /// Meters between the input and the snapped location.
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives_count: Option<u32>,
    /// Null for a trace point that neither breaks the route nor starts or ends a leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint_index: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchings_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trips_index: Option<u32>,
}

/// A location the route passes through without ending its leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViaWaypoint {
    pub geometry_index: u32,
    pub distance_from_start: f64,
    pub waypoint_index: u32,
}

/// Builds the waypoint of a location, `None` if it wasn't correlated to any edge.
///
/// Trace points get their alternatives count, matching index and waypoint index; the
/// locations of an optimized route get their trip index.
pub fn waypoint(location: &Location, is_tracepoint: bool, is_optimized: bool) -> Option<Waypoint> {
    let correlation = location.correlation.as_ref()?;
    let edge = correlation.edges.first()?;

    let snapped = edge.ll.unwrap_or_default();
    let input = location.ll.unwrap_or_default();
    let distance = Haversine.distance(
        geo::Point::new(input.lng, input.lat),
        geo::Point::new(snapped.lng, snapped.lat),
    );

    let mut waypoint = Waypoint {
        location: [fixed(snapped.lng, 6), fixed(snapped.lat, 6)],
        name: edge.names.first().cloned().unwrap_or_default(),
        distance: fixed(distance, 3),
        alternatives_count: None,
        waypoint_index: None,
        matchings_index: None,
        trips_index: None,
    };

    if is_tracepoint {
        waypoint.alternatives_count = Some(correlation.edges.len() as u32 - 1);
        waypoint.waypoint_index = Some(
            Some(correlation.waypoint_index).filter(|&index| index != NOT_A_WAYPOINT),
        );
        waypoint.matchings_index = Some(correlation.route_index);
    }

    if is_optimized {
        // an optimized route is a single trip
        waypoint.trips_index = Some(0);
        if waypoint.waypoint_index.is_none() {
            waypoint.waypoint_index = Some(Some(correlation.waypoint_index));
        }
    }

    Some(waypoint)
}

/// One waypoint per location, `None` where the location wasn't correlated.
pub fn waypoints(locations: &[Location], is_tracepoint: bool) -> Vec<Option<Waypoint>> {
    locations
        .iter()
        .map(|location| waypoint(location, is_tracepoint, false))
        .collect()
}

/// The waypoints shared by every route of the trip, taken from the legs of the first one.
pub fn trip_waypoints(trip: &Trip, is_optimized: bool) -> Vec<Option<Waypoint>> {
    trip.routes
        .first()
        .into_iter()
        .flat_map(route_locations)
        .map(|location| waypoint(location, false, is_optimized))
        .collect()
}

/// The via and through locations of a leg, located along the leg's geometry.
pub fn intermediate_waypoints(leg: &TripLeg) -> Vec<ViaWaypoint> {
    leg.location
        .iter()
        .filter(|location| {
            matches!(
                location.location_type(),
                LocationType::Via | LocationType::Through
            )
        })
        .map(|location| {
            let correlation = location.correlation.clone().unwrap_or_default();
            ViaWaypoint {
                geometry_index: correlation.leg_shape_index,
                distance_from_start: fixed(correlation.distance_from_leg_origin, 3),
                waypoint_index: correlation.original_index,
            }
        })
        .collect()
}

/// Writes the properties of an incident into `json`, every key prefixed with `key_prefix`.
/// Negative shape indices are left out.
pub fn incident_properties(
    json: &mut Map<String, Value>,
    metadata: &IncidentMetadata,
    begin_shape_index: i64,
    end_shape_index: i64,
    road_class: &str,
    key_prefix: &str,
) {
    let mut insert = |key: &str, value: Value| {
        json.insert(format!("{key_prefix}{key}"), value);
    };

    insert("id", Value::from(metadata.id.to_string()));
    insert("type", Value::from(metadata.incident_type().to_string()));

    for (key, text) in [
        ("iso_3166_1_alpha2", &metadata.iso_3166_1_alpha2),
        ("iso_3166_1_alpha3", &metadata.iso_3166_1_alpha3),
        ("description", &metadata.description),
        ("long_description", &metadata.long_description),
    ] {
        if !text.is_empty() {
            insert(key, Value::from(text.as_str()));
        }
    }

    for (key, seconds) in [
        ("creation_time", metadata.creation_time),
        ("start_time", metadata.start_time),
        ("end_time", metadata.end_time),
    ] {
        if let Some(date) = utc_date(seconds) {
            insert(key, Value::from(date));
        }
    }

    if metadata.impact != 0 {
        insert("impact", Value::from(metadata.impact().to_string()));
    }
    if !metadata.sub_type.is_empty() {
        insert("sub_type", Value::from(metadata.sub_type.as_str()));
    }
    if !metadata.sub_type_description.is_empty() {
        insert(
            "sub_type_description",
            Value::from(metadata.sub_type_description.as_str()),
        );
    }
    if !metadata.alertc_codes.is_empty() {
        insert("alertc_codes", Value::from(metadata.alertc_codes.clone()));
    }
    insert("lanes_blocked", Value::from(metadata.lanes_blocked.clone()));
    if metadata.num_lanes_blocked != 0 {
        insert("num_lanes_blocked", Value::from(metadata.num_lanes_blocked));
    }
    if !metadata.clear_lanes.is_empty() {
        insert("clear_lanes", Value::from(metadata.clear_lanes.as_str()));
    }
    if metadata.length > 0 {
        insert("length", Value::from(metadata.length));
    }
    if metadata.road_closed {
        insert("closed", Value::from(true));
    }
    if !road_class.is_empty() {
        insert("class", Value::from(road_class));
    }
    if let Some(congestion) = metadata.congestion {
        insert("congestion", json!({ "value": congestion.value }));
    }
    if begin_shape_index >= 0 {
        insert("geometry_index_start", Value::from(begin_shape_index));
    }
    if end_shape_index >= 0 {
        insert("geometry_index_end", Value::from(end_shape_index));
    }
}

/// Formats seconds since the epoch as `YYYY-MM-DDTHH:MM:SSZ`, `None` for zero.
fn utc_date(seconds: u64) -> Option<String> {
    if seconds == 0 {
        return None;
    }
    let seconds = i64::try_from(seconds).ok()?;
    let date = DateTime::from_timestamp(seconds, 0)?;
    Some(date.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Serializes the response in the OSRM compatible format.
pub(crate) fn serialize(config: &EncoderConfig, api: &Api) -> Result<String, SerializerError> {
    let default_options = Options::default();
    let options = api.options.as_ref().unwrap_or(&default_options);
    let default_trip = Trip::default();
    let trip = api.trip.as_ref().unwrap_or(&default_trip);

    let mut json = Map::new();
    json.insert("code".to_owned(), Value::from("Ok"));

    match options.action() {
        Action::Route | Action::Centroid => {
            json.insert("routes".to_owned(), routes(config, api, options)?);
            json.insert("waypoints".to_owned(), json!(trip_waypoints(trip, false)));
        }
        Action::TraceRoute => {
            json.insert("matchings".to_owned(), routes(config, api, options)?);
            json.insert(
                "tracepoints".to_owned(),
                json!(waypoints(&options.shape, true)),
            );
        }
        Action::OptimizedRoute => {
            json.insert("trips".to_owned(), routes(config, api, options)?);
            json.insert("waypoints".to_owned(), json!(trip_waypoints(trip, true)));
        }
        Action::Status => return json::status(api).map(|status| status.to_string()),
        action @ (Action::NoAction
        | Action::Locate
        | Action::SourcesToTargets
        | Action::Isochrone
        | Action::TraceAttributes
        | Action::Height
        | Action::TransitAvailable
        | Action::Expansion) => {
            warn!("Requested action {action} is not serializable as osrm");
            return Err(SerializerError::UnsupportedAction {
                action,
                format: Format::Osrm,
            });
        }
    }

    if let Some(id) = &options.id {
        json.insert("id".to_owned(), Value::from(id.as_str()));
    }
    insert_warnings(&mut json, api);

    Ok(Value::Object(json).to_string())
}

fn routes(config: &EncoderConfig, api: &Api, options: &Options) -> Result<Value, SerializerError> {
    let trip_routes = api.trip.iter().flat_map(|trip| &trip.routes);
    let directions_routes = api.directions.iter().flat_map(|d| &d.routes);
    let count = trip_routes.clone().count().max(directions_routes.clone().count());

    (0..count)
        .map(|i| {
            route(
                config,
                options,
                trip_routes.clone().nth(i),
                directions_routes.clone().nth(i),
            )
        })
        .collect()
}

fn route(
    config: &EncoderConfig,
    options: &Options,
    trip_route: Option<&TripRoute>,
    directions_route: Option<&DirectionsRoute>,
) -> Result<Value, SerializerError> {
    let mut json = Map::new();

    let (length, time) = directions_route
        .map(DirectionsRoute::totals)
        .unwrap_or_default();
    json.insert("distance".to_owned(), Value::from(fixed(length * 1000.0, 1)));
    json.insert("duration".to_owned(), Value::from(fixed(time, 3)));

    if let Some(route) = trip_route {
        json.insert("geometry".to_owned(), Value::from(route_geometry(route)?));
    }

    let trip_legs = trip_route.map(|route| route.legs.as_slice()).unwrap_or_default();
    let directions_legs = directions_route
        .map(|route| route.legs.as_slice())
        .unwrap_or_default();
    let legs: Vec<Value> = (0..trip_legs.len().max(directions_legs.len()))
        .map(|i| leg(trip_legs.get(i), directions_legs.get(i)))
        .collect();
    json.insert("legs".to_owned(), Value::from(legs));

    if let Some(route) = trip_route {
        route_references(config, &mut json, route, options)?;
    }

    Ok(Value::Object(json))
}

/// The shape of the whole route, the legs joined on their shared end points.
fn route_geometry(route: &TripRoute) -> Result<String, SerializerError> {
    let mut shape: Vec<Coordinate> = Vec::new();
    for leg in &route.legs {
        let leg_shape = decode_shape(&leg.shape).map_err(EncoderError::from)?;
        let joint = usize::from(!shape.is_empty());
        shape.extend(leg_shape.into_iter().skip(joint));
    }
    Ok(encode_shape(&shape))
}

fn leg(trip_leg: Option<&TripLeg>, directions_leg: Option<&DirectionsLeg>) -> Value {
    let mut json = Map::new();

    let summary = directions_leg
        .and_then(|leg| leg.summary)
        .unwrap_or_default();
    json.insert(
        "distance".to_owned(),
        Value::from(fixed(summary.length as f64 * 1000.0, 1)),
    );
    json.insert("duration".to_owned(), Value::from(fixed(summary.time, 3)));

    let Some(leg) = trip_leg else {
        return Value::Object(json);
    };

    json.insert(
        "via_waypoints".to_owned(),
        json!(intermediate_waypoints(leg)),
    );

    if !leg.incidents.is_empty() {
        let incidents: Vec<Value> = leg
            .incidents
            .iter()
            .filter_map(|incident| {
                let metadata = incident.metadata.as_ref()?;
                let road_class = leg
                    .edges()
                    .find(|edge| {
                        edge.begin_shape_index <= incident.begin_shape_index
                            && incident.begin_shape_index < edge.end_shape_index
                    })
                    .map(|edge| edge.road_class().to_string())
                    .unwrap_or_default();

                let mut json = Map::new();
                incident_properties(
                    &mut json,
                    metadata,
                    incident.begin_shape_index as i64,
                    incident.end_shape_index as i64,
                    &road_class,
                    "",
                );
                Some(Value::Object(json))
            })
            .collect();
        json.insert("incidents".to_owned(), Value::from(incidents));
    }

    Value::Object(json)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use test_log::test;

    use super::*;
    use crate::proto::{Congestion, Correlation, IncidentImpact, IncidentType, LatLng, PathEdge};

    fn correlated(lng: f64, lat: f64, waypoint_index: u32) -> Location {
        Location {
            ll: Some(LatLng { lat, lng }),
            correlation: Some(Correlation {
                edges: vec![
                    PathEdge {
                        ll: Some(LatLng { lat, lng }),
                        names: vec!["Unter den Linden".to_owned()],
                    },
                    PathEdge::default(),
                ],
                waypoint_index,
                route_index: 2,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn waypoint_uncorrelated_is_none() {
        let located = Location {
            ll: Some(LatLng {
                lat: 52.5,
                lng: 13.4,
            }),
            ..Default::default()
        };
        assert_eq!(waypoint(&located, false, false), None);

        let serialized = json!(waypoints(&[located, correlated(13.4, 52.5, 0)], false));
        assert_eq!(serialized[0], Value::Null);
        assert_eq!(serialized[1]["name"], json!("Unter den Linden"));
    }

    #[test]
    fn waypoint_plain() {
        let mut location = correlated(13.461117, 52.517105, 0);
        if let Some(ll) = location.ll.as_mut() {
            ll.lat += 0.0001;
        }

        let waypoint = waypoint(&location, false, false).unwrap();
        assert_eq!(waypoint.location, [13.461117, 52.517105]);
        assert_abs_diff_eq!(waypoint.distance, 11.119, epsilon = 0.01);

        let serialized = json!(waypoint);
        let keys: Vec<_> = serialized.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3, "{keys:?}");
    }

    #[test]
    fn waypoint_tracepoint() {
        let waypoint = waypoint(&correlated(13.4, 52.5, NOT_A_WAYPOINT), true, false).unwrap();
        assert_eq!(
            json!(waypoint),
            json!({
                "location": [13.4, 52.5],
                "name": "Unter den Linden",
                "distance": 0.0,
                "alternatives_count": 1,
                "waypoint_index": null,
                "matchings_index": 2,
            })
        );

        let waypoint = super::waypoint(&correlated(13.4, 52.5, 3), true, false).unwrap();
        assert_eq!(waypoint.waypoint_index, Some(Some(3)));
    }

    #[test]
    fn trip_waypoints_skip_leg_joints() {
        let trip = Trip {
            routes: vec![TripRoute {
                legs: vec![
                    TripLeg {
                        location: vec![correlated(13.0, 52.0, 0), correlated(13.1, 52.1, 1)],
                        ..Default::default()
                    },
                    TripLeg {
                        location: vec![correlated(13.1, 52.1, 1), correlated(13.2, 52.2, 2)],
                        ..Default::default()
                    },
                ],
            }],
        };

        let waypoints = trip_waypoints(&trip, true);
        let indices: Vec<_> = waypoints
            .iter()
            .flatten()
            .map(|w| (w.trips_index, w.waypoint_index))
            .collect();
        assert_eq!(
            indices,
            [
                (Some(0), Some(Some(0))),
                (Some(0), Some(Some(1))),
                (Some(0), Some(Some(2))),
            ]
        );

        assert!(trip_waypoints(&Trip::default(), false).is_empty());
    }

    #[test]
    fn intermediate_waypoints_via_and_through() {
        let location = |location_type: LocationType, original_index| {
            let mut location = Location {
                correlation: Some(Correlation {
                    original_index,
                    leg_shape_index: original_index * 10,
                    distance_from_leg_origin: original_index as f64 * 100.12345,
                    ..Default::default()
                }),
                ..Default::default()
            };
            location.set_location_type(location_type);
            location
        };

        let leg = TripLeg {
            location: vec![
                location(LocationType::Break, 0),
                location(LocationType::Via, 1),
                location(LocationType::Through, 2),
                location(LocationType::BreakThrough, 3),
            ],
            ..Default::default()
        };

        assert_eq!(
            intermediate_waypoints(&leg),
            [
                ViaWaypoint {
                    geometry_index: 10,
                    distance_from_start: 100.123,
                    waypoint_index: 1,
                },
                ViaWaypoint {
                    geometry_index: 20,
                    distance_from_start: 200.247,
                    waypoint_index: 2,
                },
            ]
        );
    }

    #[test]
    fn incident_properties_prefixed() {
        let mut metadata = IncidentMetadata {
            id: 5_937_295_491_543_091_004,
            iso_3166_1_alpha2: "DE".to_owned(),
            description: "Closed due to roadworks".to_owned(),
            start_time: 1_600_000_000,
            lanes_blocked: vec![],
            road_closed: true,
            congestion: Some(Congestion { value: 33 }),
            ..Default::default()
        };
        metadata.set_incident_type(IncidentType::Construction);
        metadata.set_impact(IncidentImpact::Major);

        let mut json = Map::new();
        incident_properties(&mut json, &metadata, 4, -1, "primary", "incident_");

        assert_eq!(
            Value::Object(json),
            json!({
                "incident_id": "5937295491543091004",
                "incident_type": "construction",
                "incident_iso_3166_1_alpha2": "DE",
                "incident_description": "Closed due to roadworks",
                "incident_start_time": "2020-09-13T12:26:40Z",
                "incident_impact": "major",
                "incident_lanes_blocked": [],
                "incident_closed": true,
                "incident_class": "primary",
                "incident_congestion": {"value": 33},
                "incident_geometry_index_start": 4,
            })
        );
    }

    #[test]
    fn utc_date_zero_is_none() {
        assert_eq!(utc_date(0), None);
        assert_eq!(utc_date(86_400).as_deref(), Some("1970-01-02T00:00:00Z"));
    }
}
