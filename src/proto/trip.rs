/// Trip: the edge level description of every computed route.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Trip {
    #[prost(message, repeated, tag = "1")]
    pub routes: Vec<TripRoute>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TripRoute {
    #[prost(message, repeated, tag = "1")]
    pub legs: Vec<TripLeg>,
}

/// One continuous traversal between two break locations.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TripLeg {
    /// Compact encoded shape of the whole leg.
    #[prost(string, tag = "1")]
    pub shape: String,
    /// Traversed nodes; every node but the last carries the edge leaving it.
    #[prost(message, repeated, tag = "2")]
    pub node: Vec<TripNode>,
    #[prost(message, repeated, tag = "3")]
    pub location: Vec<Location>,
    #[prost(message, repeated, tag = "4")]
    pub incidents: Vec<Incident>,
}

impl TripLeg {
    /// Iterates over the traversed edges, stopping at the destination node.
    pub fn edges(&self) -> impl Iterator<Item = &TripEdge> {
        self.node.iter().map_while(|node| node.edge.as_ref())
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TripNode {
    #[prost(message, optional, tag = "1")]
    pub edge: Option<TripEdge>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TripEdge {
    #[prost(string, repeated, tag = "1")]
    pub names: Vec<String>,
    #[prost(float, tag = "2")]
    pub length_km: f32,
    /// Km/h.
    #[prost(float, tag = "3")]
    pub speed: f32,
    #[prost(enumeration = "RoadClass", tag = "4")]
    pub road_class: i32,
    #[prost(enumeration = "EdgeUse", tag = "5")]
    pub edge_use: i32,
    #[prost(enumeration = "Traversability", tag = "6")]
    pub traversability: i32,
    #[prost(bool, tag = "7")]
    pub roundabout: bool,
    #[prost(uint32, tag = "8")]
    pub begin_shape_index: u32,
    #[prost(uint32, tag = "9")]
    pub end_shape_index: u32,
    #[prost(uint64, tag = "10")]
    pub way_id: u64,
}

/// Road classification, from the most important (0) to the least important (7).
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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum RoadClass {
    Motorway = 0,
    Trunk = 1,
    Primary = 2,
    Secondary = 3,
    Tertiary = 4,
    Unclassified = 5,
    Residential = 6,
    ServiceOther = 7,
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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum EdgeUse {
    Road = 0,
    Ramp = 1,
    TurnChannel = 2,
    Track = 3,
    Driveway = 4,
    Alley = 5,
    ParkingAisle = 6,
    EmergencyAccess = 7,
    DriveThru = 8,
    Culdesac = 9,
    LivingStreet = 10,
    ServiceRoad = 11,
    Cycleway = 20,
    MountainBike = 21,
    Sidewalk = 24,
    Footway = 25,
    Steps = 26,
    Path = 27,
    Pedestrian = 28,
    Bridleway = 29,
    Other = 40,
    Ferry = 41,
    RailFerry = 42,
    Construction = 43,
}

/// Directions in which the edge's road may be traversed.
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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum Traversability {
    None = 0,
    Forward = 1,
    Backward = 2,
    Both = 3,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct LatLng {
    #[prost(double, tag = "1")]
    pub lat: f64,
    #[prost(double, tag = "2")]
    pub lng: f64,
}

/// An input location and where it was correlated onto the road network.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Location {
    #[prost(message, optional, tag = "1")]
    pub ll: Option<LatLng>,
    #[prost(enumeration = "LocationType", tag = "2")]
    pub location_type: i32,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub correlation: Option<Correlation>,
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
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum LocationType {
    Break = 0,
    Through = 1,
    Via = 2,
    BreakThrough = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Correlation {
    /// Candidate edges, best first.
    #[prost(message, repeated, tag = "1")]
    pub edges: Vec<PathEdge>,
    #[prost(uint32, tag = "2")]
    pub original_index: u32,
    #[prost(uint32, tag = "3")]
    pub leg_shape_index: u32,
    /// Meters.
    #[prost(double, tag = "4")]
    pub distance_from_leg_origin: f64,
    #[prost(uint32, tag = "5")]
    pub route_index: u32,
    /// `u32::MAX` when the location neither breaks the route nor starts or ends a leg.
    #[prost(uint32, tag = "6")]
    pub waypoint_index: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PathEdge {
    /// Projection of the input location onto the edge.
    #[prost(message, optional, tag = "1")]
    pub ll: Option<LatLng>,
    #[prost(string, repeated, tag = "2")]
    pub names: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Incident {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<IncidentMetadata>,
    #[prost(uint32, tag = "2")]
    pub begin_shape_index: u32,
    #[prost(uint32, tag = "3")]
    pub end_shape_index: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IncidentMetadata {
    #[prost(enumeration = "IncidentType", tag = "1")]
    pub incident_type: i32,
    #[prost(uint64, tag = "2")]
    pub id: u64,
    #[prost(string, tag = "3")]
    pub iso_3166_1_alpha2: String,
    #[prost(string, tag = "4")]
    pub iso_3166_1_alpha3: String,
    #[prost(string, tag = "5")]
    pub description: String,
    #[prost(string, tag = "6")]
    pub long_description: String,
    /// Seconds since the epoch.
    #[prost(uint64, tag = "7")]
    pub creation_time: u64,
    #[prost(uint64, tag = "8")]
    pub start_time: u64,
    #[prost(uint64, tag = "9")]
    pub end_time: u64,
    #[prost(enumeration = "IncidentImpact", tag = "10")]
    pub impact: i32,
    #[prost(string, tag = "11")]
    pub sub_type: String,
    #[prost(string, tag = "12")]
    pub sub_type_description: String,
    #[prost(uint32, repeated, tag = "13")]
    pub alertc_codes: Vec<u32>,
    #[prost(string, repeated, tag = "14")]
    pub lanes_blocked: Vec<String>,
    #[prost(uint32, tag = "15")]
    pub num_lanes_blocked: u32,
    #[prost(string, tag = "16")]
    pub clear_lanes: String,
    /// Meters.
    #[prost(uint32, tag = "17")]
    pub length: u32,
    #[prost(bool, tag = "18")]
    pub road_closed: bool,
    #[prost(message, optional, tag = "19")]
    pub congestion: Option<Congestion>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Congestion {
    #[prost(uint32, tag = "1")]
    pub value: u32,
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
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum IncidentType {
    Accident = 0,
    Congestion = 1,
    Construction = 2,
    DisabledVehicle = 3,
    LaneRestriction = 4,
    MassTransit = 5,
    Miscellaneous = 6,
    OtherNews = 7,
    PlannedEvent = 8,
    RoadClosure = 9,
    RoadHazard = 10,
    Weather = 11,
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
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum IncidentImpact {
    Unknown = 0,
    Critical = 1,
    Major = 2,
    Minor = 3,
    Low = 4,
}
