use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// types of static and real-time GTFS files published by a transit agency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Static,
    VehiclePosition,
    TripUpdate,
    Alert,
}

impl ResourceCategory {
    /// every category, in the order a collection cycle visits them.
    pub const ALL: [ResourceCategory; 4] = [
        ResourceCategory::Static,
        ResourceCategory::VehiclePosition,
        ResourceCategory::TripUpdate,
        ResourceCategory::Alert,
    ];

    /// name used as the first path segment below the storage root.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Static => "static",
            ResourceCategory::VehiclePosition => "vehicle_position",
            ResourceCategory::TripUpdate => "trip_update",
            ResourceCategory::Alert => "alert",
        }
    }

    /// true for the three GTFS-realtime feeds.
    pub fn is_realtime(&self) -> bool {
        match self {
            ResourceCategory::Static => false,
            ResourceCategory::VehiclePosition
            | ResourceCategory::TripUpdate
            | ResourceCategory::Alert => true,
        }
    }
}

impl Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
