#![allow(dead_code)]

use routeref::proto::{
    Action, Api, Correlation, Directions, DirectionsLeg, DirectionsRoute, EdgeUse, Format, Info,
    LatLng, Location, LocationType, Matrix, Options, PathEdge, RoadClass, Status, Summary,
    Traversability, Trip, TripEdge, TripLeg, TripNode, TripRoute,
};
use routeref::{Coordinate, encode_shape};

/// Shape of a leg heading east, then north-east, then east again.
pub const LEG_SHAPE: [Coordinate; 4] = [
    Coordinate {
        lon: 13.40,
        lat: 52.50,
    },
    Coordinate {
        lon: 13.41,
        lat: 52.50,
    },
    Coordinate {
        lon: 13.42,
        lat: 52.505,
    },
    Coordinate {
        lon: 13.43,
        lat: 52.505,
    },
];

pub fn trip_edge(
    road_class: RoadClass,
    traversability: Traversability,
    begin_shape_index: u32,
    end_shape_index: u32,
    length_km: f32,
) -> TripEdge {
    let mut edge = TripEdge {
        names: vec![format!("Street {begin_shape_index}")],
        length_km,
        speed: 50.0,
        begin_shape_index,
        end_shape_index,
        way_id: 1000 + begin_shape_index as u64,
        ..Default::default()
    };
    edge.set_road_class(road_class);
    edge.set_edge_use(EdgeUse::Road);
    edge.set_traversability(traversability);
    edge
}

pub fn location(lon: f64, lat: f64, location_type: LocationType, original_index: u32) -> Location {
    let ll = LatLng { lat, lng: lon };
    let mut location = Location {
        ll: Some(ll),
        correlation: Some(Correlation {
            edges: vec![PathEdge {
                ll: Some(ll),
                names: vec![format!("Street {original_index}")],
            }],
            original_index,
            waypoint_index: original_index,
            ..Default::default()
        }),
        ..Default::default()
    };
    location.set_location_type(location_type);
    location
}

/// A leg of three edges over [`LEG_SHAPE`] followed by the destination node.
pub fn trip_leg() -> TripLeg {
    let edges = [
        trip_edge(RoadClass::Primary, Traversability::Both, 0, 1, 0.677),
        trip_edge(RoadClass::Secondary, Traversability::Forward, 1, 2, 0.872),
        trip_edge(RoadClass::Residential, Traversability::Both, 2, 3, 0.677),
    ];

    let mut node: Vec<TripNode> = edges
        .into_iter()
        .map(|edge| TripNode { edge: Some(edge) })
        .collect();
    node.push(TripNode::default());

    TripLeg {
        shape: encode_shape(&LEG_SHAPE),
        node,
        location: vec![
            location(13.40, 52.50, LocationType::Break, 0),
            location(13.43, 52.505, LocationType::Break, 1),
        ],
        incidents: vec![],
    }
}

pub fn directions_leg() -> DirectionsLeg {
    DirectionsLeg {
        summary: Some(Summary {
            length: 2.226,
            time: 160.0,
            ..Default::default()
        }),
        maneuvers: vec![],
        shape: encode_shape(&LEG_SHAPE),
    }
}

pub fn options(action: Action, format: Format, linear_references: bool) -> Options {
    let mut options = Options {
        language: "en-US".to_owned(),
        linear_references,
        ..Default::default()
    };
    options.set_action(action);
    options.set_format(format);
    options
}

/// A response carrying every substructure.
pub fn full_api(action: Action, format: Format, linear_references: bool) -> Api {
    Api {
        options: Some(options(action, format, linear_references)),
        trip: Some(Trip {
            routes: vec![TripRoute {
                legs: vec![trip_leg()],
            }],
        }),
        directions: Some(Directions {
            routes: vec![DirectionsRoute {
                legs: vec![directions_leg()],
            }],
        }),
        status: Some(Status {
            version: "3.5.0".to_owned(),
            available_actions: vec!["status".to_owned(), "route".to_owned()],
            has_tiles: Some(true),
            ..Default::default()
        }),
        info: Some(Info::default()),
        matrix: Some(Matrix {
            from_indices: vec![0, 0],
            to_indices: vec![0, 1],
            distances: vec![0, 2226],
            times: vec![0.0, 160.0],
        }),
    }
}
