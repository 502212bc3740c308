//! The composite response object and its substructures, as typed protobuf messages.

mod directions;
mod trip;

pub use directions::{Directions, DirectionsLeg, DirectionsRoute, Maneuver, Summary};
pub use trip::{
    Congestion, Correlation, EdgeUse, Incident, IncidentImpact, IncidentMetadata, IncidentType,
    LatLng, Location, LocationType, PathEdge, RoadClass, Traversability, Trip, TripEdge, TripLeg,
    TripNode, TripRoute,
};

/// The API object: request echo plus every response substructure produced while handling it.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Api {
    #[prost(message, optional, tag = "1")]
    pub options: Option<Options>,
    #[prost(message, optional, tag = "2")]
    pub trip: Option<Trip>,
    #[prost(message, optional, tag = "3")]
    pub directions: Option<Directions>,
    #[prost(message, optional, tag = "4")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "5")]
    pub info: Option<Info>,
    #[prost(message, optional, tag = "6")]
    pub matrix: Option<Matrix>,
}

impl Api {
    /// True when the request was issued by an internal service rather than an end user.
    pub fn is_service(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.is_service)
    }
}

/// Request echo: the options the response was computed with.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Options {
    #[prost(enumeration = "Units", tag = "1")]
    pub units: i32,
    #[prost(string, tag = "2")]
    pub language: String,
    #[prost(enumeration = "Format", tag = "3")]
    pub format: i32,
    #[prost(enumeration = "Action", tag = "4")]
    pub action: i32,
    #[prost(bool, tag = "5")]
    pub linear_references: bool,
    #[prost(message, optional, tag = "6")]
    pub pbf_field_selector: Option<PbfFieldSelector>,
    /// Trace points of map-matching requests.
    #[prost(message, repeated, tag = "7")]
    pub shape: Vec<Location>,
    #[prost(message, repeated, tag = "8")]
    pub locations: Vec<Location>,
    #[prost(string, optional, tag = "9")]
    pub id: Option<String>,
}

/// Which top-level substructures of [`Api`] survive into a binary serialization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, prost::Message)]
pub struct PbfFieldSelector {
    #[prost(bool, tag = "1")]
    pub options: bool,
    #[prost(bool, tag = "2")]
    pub trip: bool,
    #[prost(bool, tag = "3")]
    pub directions: bool,
    #[prost(bool, tag = "4")]
    pub status: bool,
    #[prost(bool, tag = "5")]
    pub matrix: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Info {
    #[prost(bool, tag = "1")]
    pub is_service: bool,
    #[prost(message, repeated, tag = "2")]
    pub warnings: Vec<Warning>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Warning {
    #[prost(uint64, tag = "1")]
    pub code: u64,
    #[prost(string, tag = "2")]
    pub description: String,
}

/// Service status.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Status {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(uint32, tag = "2")]
    pub tileset_last_modified: u32,
    #[prost(string, repeated, tag = "3")]
    pub available_actions: Vec<String>,
    #[prost(bool, optional, tag = "4")]
    pub has_tiles: Option<bool>,
    #[prost(bool, optional, tag = "5")]
    pub has_admins: Option<bool>,
    #[prost(bool, optional, tag = "6")]
    pub has_timezones: Option<bool>,
    #[prost(bool, optional, tag = "7")]
    pub has_live_traffic: Option<bool>,
    /// GeoJSON of the tileset coverage.
    #[prost(string, optional, tag = "8")]
    pub bbox: Option<String>,
    #[prost(bool, optional, tag = "9")]
    pub has_transit_tiles: Option<bool>,
    #[prost(uint64, optional, tag = "10")]
    pub osm_changeset: Option<u64>,
}

/// Sources to targets matrix, stored row-major (one row per source).
#[derive(Clone, PartialEq, prost::Message)]
pub struct Matrix {
    #[prost(uint32, repeated, tag = "1")]
    pub from_indices: Vec<u32>,
    #[prost(uint32, repeated, tag = "2")]
    pub to_indices: Vec<u32>,
    /// Meters.
    #[prost(uint32, repeated, tag = "3")]
    pub distances: Vec<u32>,
    /// Seconds.
    #[prost(float, repeated, tag = "4")]
    pub times: Vec<f32>,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum Action {
    NoAction = 0,
    Route = 1,
    Locate = 2,
    SourcesToTargets = 3,
    OptimizedRoute = 4,
    Isochrone = 5,
    TraceRoute = 6,
    TraceAttributes = 7,
    Height = 8,
    TransitAvailable = 9,
    Expansion = 10,
    Centroid = 11,
    Status = 12,
}

impl Action {
    /// Actions whose responses describe routes and may carry linear references.
    pub const fn allows_linear_references(self) -> bool {
        matches!(self, Self::Route | Self::TraceRoute)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum Format {
    Json = 0,
    Osrm = 1,
    Pbf = 2,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum Units {
    Kilometers = 0,
    Miles = 1,
}

impl Units {
    const KILOMETERS_PER_MILE: f64 = 1.609344;

    /// Converts kilometers into these units.
    pub fn from_kilometers(self, kilometers: f64) -> f64 {
        match self {
            Self::Kilometers => kilometers,
            Self::Miles => kilometers / Self::KILOMETERS_PER_MILE,
        }
    }
}
