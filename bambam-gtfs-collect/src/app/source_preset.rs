use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::collection::SourceEndpoints;

/// transit agencies with known GTFS publication urls.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePreset {
    /// ZTP Kraków, bus network
    KrakowBus,
    /// ZTP Kraków, tram network
    KrakowTram,
    /// London Transit Commission, Ontario
    London,
}

impl SourcePreset {
    pub fn endpoints(&self) -> SourceEndpoints {
        match self {
            SourcePreset::KrakowBus => SourceEndpoints::new(
                "https://gtfs.ztp.krakow.pl/GTFS_KRK_A.zip",
                "https://gtfs.ztp.krakow.pl/VehiclePositions_A.pb",
                "https://gtfs.ztp.krakow.pl/TripUpdates_A.pb",
                "https://gtfs.ztp.krakow.pl/ServiceAlerts_A.pb",
            ),
            SourcePreset::KrakowTram => SourceEndpoints::new(
                "https://gtfs.ztp.krakow.pl/GTFS_KRK_T.zip",
                "https://gtfs.ztp.krakow.pl/VehiclePositions_T.pb",
                "https://gtfs.ztp.krakow.pl/TripUpdates_T.pb",
                "https://gtfs.ztp.krakow.pl/ServiceAlerts_T.pb",
            ),
            SourcePreset::London => SourceEndpoints::new(
                "https://www.londontransit.ca/gtfsfeed/google_transit.zip",
                "http://gtfs.ltconline.ca/Vehicle/VehiclePositions.pb",
                "http://gtfs.ltconline.ca/TripUpdate/TripUpdates.pb",
                "http://gtfs.ltconline.ca/Alert/Alerts.pb",
            ),
        }
    }
}

impl Display for SourcePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        write!(f, "{name}")
    }
}
