mod fixtures;

use prost::Message;
use routeref::proto::{Action, Api, Format, Info, LatLng, Location, LocationType, TripRoute};
use routeref::{
    EncoderConfig, Serialized, SerializerError, encode_leg, encode_shape, serialize,
    serialize_status,
};
use serde_json::{Value, json};
use test_log::test;

use crate::fixtures::{LEG_SHAPE, full_api, location, trip_leg};

fn serialize_json(api: &mut Api) -> Value {
    match serialize(&EncoderConfig::default(), api).unwrap() {
        Serialized::Json(json) => serde_json::from_str(&json).unwrap(),
        Serialized::Pbf(_) => panic!("expected a json body"),
    }
}

fn serialize_bytes(api: &mut Api) -> Api {
    match serialize(&EncoderConfig::default(), api).unwrap() {
        Serialized::Pbf(bytes) => Api::decode(bytes.as_slice()).unwrap(),
        Serialized::Json(json) => panic!("expected a pbf body, got {json}"),
    }
}

fn leg_references() -> Value {
    json!(encode_leg(&EncoderConfig::default(), &trip_leg()).unwrap())
}

#[test]
fn serializer_json_route_linear_references() {
    let mut api = full_api(Action::Route, Format::Json, true);
    let json = serialize_json(&mut api);

    let references = &json["trip"]["linear_references"];
    assert_eq!(references.as_array().map(Vec::len), Some(3));
    assert_eq!(*references, leg_references());

    assert_eq!(json["trip"]["status"], json!(0));
    assert_eq!(json["trip"]["units"], json!("kilometers"));
    assert_eq!(json["trip"]["language"], json!("en-US"));
    assert_eq!(json["trip"]["summary"]["length"], json!(2.226));
    assert_eq!(json["trip"]["locations"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["trip"]["locations"][1]["type"], json!("break"));
    assert!(json.get("alternates").is_none());
}

#[test]
fn serializer_json_alternates_get_their_own_references() {
    let mut api = full_api(Action::Route, Format::Json, true);
    if let Some(trip) = api.trip.as_mut() {
        trip.routes.push(TripRoute {
            legs: vec![trip_leg(), trip_leg()],
        });
    }

    let json = serialize_json(&mut api);
    assert_eq!(json["trip"]["linear_references"].as_array().map(Vec::len), Some(3));

    let alternate = &json["alternates"][0]["trip"];
    assert_eq!(alternate["linear_references"].as_array().map(Vec::len), Some(6));
    assert_eq!(alternate["locations"].as_array().map(Vec::len), Some(3));
}

#[test]
fn serializer_json_route_without_request() {
    let mut api = full_api(Action::Route, Format::Json, false);
    let json = serialize_json(&mut api);

    assert!(json["trip"].get("linear_references").is_none());
    assert!(json["trip"].get("warnings").is_none());
}

#[test]
fn serializer_json_trace_attributes_never_referenced() {
    let mut api = full_api(Action::TraceAttributes, Format::Json, true);
    let json = serialize_json(&mut api);

    assert!(!json.to_string().contains("linear_references"));
    assert_eq!(json["edges"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["edges"][1]["road_class"], json!("secondary"));
    assert_eq!(json["edges"][1]["traversability"], json!("forward"));
    assert_eq!(json["shape"], json!(encode_shape(&LEG_SHAPE)));
}

#[test]
fn serializer_json_optimized_route_never_referenced() {
    let mut api = full_api(Action::OptimizedRoute, Format::Json, true);
    let json = serialize_json(&mut api);

    assert!(json["trip"].is_object());
    assert!(json["trip"].get("linear_references").is_none());
}

#[test]
fn serializer_json_warnings() {
    let mut api = full_api(Action::Route, Format::Json, false);
    api.info = Some(Info {
        is_service: false,
        warnings: vec![routeref::proto::Warning {
            code: 200,
            description: "ignoring unknown costing option".to_owned(),
        }],
    });

    let json = serialize_json(&mut api);
    assert_eq!(
        json["trip"]["warnings"],
        json!([{"code": 200, "text": "ignoring unknown costing option"}])
    );
}

#[test]
fn serializer_json_unsupported_action() {
    let mut api = full_api(Action::Isochrone, Format::Json, true);
    assert_eq!(
        serialize(&EncoderConfig::default(), &mut api),
        Err(SerializerError::UnsupportedAction {
            action: Action::Isochrone,
            format: Format::Json,
        })
    );
}

#[test]
fn serializer_osrm_route() {
    let mut api = full_api(Action::Route, Format::Osrm, true);
    let json = serialize_json(&mut api);

    assert_eq!(json["code"], json!("Ok"));
    let route = &json["routes"][0];
    assert_eq!(route["linear_references"], leg_references());
    assert_eq!(route["geometry"], json!(encode_shape(&LEG_SHAPE)));
    assert_eq!(route["distance"], json!(2226.0));
    assert_eq!(route["duration"], json!(160.0));
    assert_eq!(route["legs"][0]["via_waypoints"], json!([]));

    assert_eq!(
        json["waypoints"],
        json!([
            {"location": [13.4, 52.5], "name": "Street 0", "distance": 0.0},
            {"location": [13.43, 52.505], "name": "Street 1", "distance": 0.0},
        ])
    );
}

#[test]
fn serializer_osrm_trace_route_tracepoints() {
    let mut api = full_api(Action::TraceRoute, Format::Osrm, true);
    if let Some(options) = api.options.as_mut() {
        options.shape = vec![
            location(13.40, 52.50, LocationType::Break, 0),
            Location {
                ll: Some(LatLng {
                    lat: 52.6,
                    lng: 13.5,
                }),
                ..Default::default()
            },
            location(13.43, 52.505, LocationType::Break, 1),
        ];
    }

    let json = serialize_json(&mut api);
    assert_eq!(json["matchings"][0]["linear_references"], leg_references());
    assert_eq!(json["tracepoints"][1], Value::Null);
    assert_eq!(json["tracepoints"][2]["waypoint_index"], json!(1));
    assert_eq!(json["tracepoints"][2]["alternatives_count"], json!(0));
    assert_eq!(json["tracepoints"][2]["matchings_index"], json!(0));
}

#[test]
fn serializer_osrm_optimized_route_trips() {
    let mut api = full_api(Action::OptimizedRoute, Format::Osrm, true);
    let json = serialize_json(&mut api);

    assert!(json["trips"][0].get("linear_references").is_none());
    assert_eq!(json["waypoints"][1]["trips_index"], json!(0));
    assert_eq!(json["waypoints"][1]["waypoint_index"], json!(1));
}

#[test]
fn serializer_pbf_status_only() {
    let mut api = full_api(Action::Status, Format::Pbf, false);
    let decoded = serialize_bytes(&mut api);

    assert_eq!(decoded.status, api.status);
    assert!(decoded.status.is_some());
    assert!(decoded.options.is_none());
    assert!(decoded.trip.is_none());
    assert!(decoded.directions.is_none());
    assert!(decoded.matrix.is_none());
}

#[test]
fn serializer_pbf_matrix_only() {
    let mut api = full_api(Action::SourcesToTargets, Format::Pbf, false);
    let decoded = serialize_bytes(&mut api);

    assert_eq!(decoded.matrix, api.matrix);
    assert!(decoded.matrix.is_some());
    assert!(decoded.options.is_none());
    assert!(decoded.trip.is_none());
    assert!(decoded.directions.is_none());
    assert!(decoded.status.is_none());
}

#[test]
fn serializer_pbf_service_keeps_options() {
    let mut api = full_api(Action::Route, Format::Pbf, true);
    api.info = Some(Info {
        is_service: true,
        warnings: vec![],
    });
    let options = api.options.clone();

    let decoded = serialize_bytes(&mut api);
    assert!(decoded.options.is_none());
    assert!(decoded.directions.is_some());
    assert_eq!(api.options, options);
    assert!(api.trip.is_none());
}

#[test]
fn serializer_pbf_end_user_loses_options() {
    let mut api = full_api(Action::Route, Format::Pbf, true);
    let decoded = serialize_bytes(&mut api);

    assert!(decoded.options.is_none());
    assert!(api.options.is_none());
    assert_eq!(decoded, api);
}

#[test]
fn serializer_pbf_unsupported_action() {
    let mut api = full_api(Action::Expansion, Format::Pbf, false);
    let expected = api.clone();

    assert_eq!(
        serialize(&EncoderConfig::default(), &mut api),
        Err(SerializerError::UnsupportedAction {
            action: Action::Expansion,
            format: Format::Pbf,
        })
    );
    assert_eq!(api, expected);
}

#[test]
fn serializer_status_formats() {
    let mut api = full_api(Action::Status, Format::Json, false);
    let Serialized::Json(json) = serialize_status(&mut api).unwrap() else {
        panic!("expected a json body");
    };
    let json: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(json["version"], json!("3.5.0"));
    assert_eq!(json["has_tiles"], json!(true));
    assert!(json.get("has_admins").is_none());

    let mut api = full_api(Action::Status, Format::Pbf, false);
    assert!(matches!(serialize_status(&mut api), Ok(Serialized::Pbf(_))));
}
