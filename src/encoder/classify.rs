use crate::proto::{EdgeUse, RoadClass, Traversability, TripEdge};
use crate::{Fow, Frc};

/// Classifies a trip edge into its OpenLR functional road class and form of way.
pub fn classify(edge: &TripEdge) -> (Frc, Fow) {
    (functional_road_class(edge.road_class()), form_of_way(edge))
}

/// The road class ordinal is the functional road class: both rank roads from 0 (most
/// important) to 7 (least important).
pub const fn functional_road_class(road_class: RoadClass) -> Frc {
    match road_class {
        RoadClass::Motorway => Frc::Frc0,
        RoadClass::Trunk => Frc::Frc1,
        RoadClass::Primary => Frc::Frc2,
        RoadClass::Secondary => Frc::Frc3,
        RoadClass::Tertiary => Frc::Frc4,
        RoadClass::Unclassified => Frc::Frc5,
        RoadClass::Residential => Frc::Frc6,
        RoadClass::ServiceOther => Frc::Frc7,
    }
}

/// Derives the form of way of an edge. The first matching rule wins:
/// 1. roundabouts
/// 2. ramps and turn channels are slip roads
/// 3. motorways
/// 4. roads traversable in both directions are multiple carriageways
/// 5. roads traversable in a single direction are single carriageways
/// 6. anything else
pub fn form_of_way(edge: &TripEdge) -> Fow {
    form_of_way_from(
        edge.roundabout,
        edge.edge_use(),
        edge.road_class(),
        edge.traversability(),
    )
}

const fn form_of_way_from(
    roundabout: bool,
    edge_use: EdgeUse,
    road_class: RoadClass,
    traversability: Traversability,
) -> Fow {
    if roundabout {
        Fow::Roundabout
    } else if matches!(edge_use, EdgeUse::Ramp | EdgeUse::TurnChannel) {
        Fow::SlipRoad
    } else if matches!(road_class, RoadClass::Motorway) {
        Fow::Motorway
    } else {
        match traversability {
            Traversability::Both => Fow::MultipleCarriageway,
            Traversability::Forward | Traversability::Backward => Fow::SingleCarriageway,
            Traversability::None => Fow::Other,
        }
    }
}
