/// Directions: the maneuver level description of every computed route.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Directions {
    #[prost(message, repeated, tag = "1")]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DirectionsRoute {
    #[prost(message, repeated, tag = "1")]
    pub legs: Vec<DirectionsLeg>,
}

impl DirectionsRoute {
    /// Sums the legs' lengths (kilometers) and times (seconds).
    pub fn totals(&self) -> (f64, f64) {
        self.legs
            .iter()
            .filter_map(|leg| leg.summary.as_ref())
            .fold((0.0, 0.0), |(length, time), summary| {
                (length + summary.length as f64, time + summary.time)
            })
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DirectionsLeg {
    #[prost(message, optional, tag = "1")]
    pub summary: Option<Summary>,
    #[prost(message, repeated, tag = "2")]
    pub maneuvers: Vec<Maneuver>,
    /// Compact encoded shape of the leg.
    #[prost(string, tag = "3")]
    pub shape: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Summary {
    /// Kilometers.
    #[prost(float, tag = "1")]
    pub length: f32,
    /// Seconds.
    #[prost(double, tag = "2")]
    pub time: f64,
    #[prost(bool, tag = "3")]
    pub has_toll: bool,
    #[prost(bool, tag = "4")]
    pub has_highway: bool,
    #[prost(bool, tag = "5")]
    pub has_ferry: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Maneuver {
    #[prost(uint32, tag = "1")]
    pub maneuver_type: u32,
    #[prost(string, tag = "2")]
    pub text_instruction: String,
    #[prost(string, repeated, tag = "3")]
    pub street_name: Vec<String>,
    /// Kilometers.
    #[prost(float, tag = "4")]
    pub length: f32,
    /// Seconds.
    #[prost(double, tag = "5")]
    pub time: f64,
    #[prost(uint32, tag = "6")]
    pub begin_shape_index: u32,
    #[prost(uint32, tag = "7")]
    pub end_shape_index: u32,
}
