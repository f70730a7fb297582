use serde::{Deserialize, Serialize};

use super::ResourceCategory;

/// urls from which the static and real-time GTFS files of one source can be downloaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEndpoints {
    #[serde(rename = "static")]
    pub static_bundle: String,
    pub vehicle_positions: String,
    pub trip_updates: String,
    pub alerts: String,
}

impl SourceEndpoints {
    pub fn new(
        static_bundle: &str,
        vehicle_positions: &str,
        trip_updates: &str,
        alerts: &str,
    ) -> Self {
        Self {
            static_bundle: String::from(static_bundle),
            vehicle_positions: String::from(vehicle_positions),
            trip_updates: String::from(trip_updates),
            alerts: String::from(alerts),
        }
    }

    pub fn get(&self, category: &ResourceCategory) -> &str {
        match category {
            ResourceCategory::Static => &self.static_bundle,
            ResourceCategory::VehiclePosition => &self.vehicle_positions,
            ResourceCategory::TripUpdate => &self.trip_updates,
            ResourceCategory::Alert => &self.alerts,
        }
    }

    /// categories whose url is blank.
    pub fn missing_categories(&self) -> Vec<ResourceCategory> {
        ResourceCategory::ALL
            .into_iter()
            .filter(|c| self.get(c).trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::SourceEndpoints;
    use crate::collection::ResourceCategory;

    #[test]
    fn test_lookup_by_category() {
        let endpoints = SourceEndpoints::new("static.zip", "positions.pb", "updates.pb", "alerts.pb");
        assert_eq!(endpoints.get(&ResourceCategory::Static), "static.zip");
        assert_eq!(endpoints.get(&ResourceCategory::VehiclePosition), "positions.pb");
        assert_eq!(endpoints.get(&ResourceCategory::TripUpdate), "updates.pb");
        assert_eq!(endpoints.get(&ResourceCategory::Alert), "alerts.pb");
        assert!(endpoints.missing_categories().is_empty());
    }

    #[test]
    fn test_missing_categories() {
        let endpoints = SourceEndpoints::new("static.zip", "", "updates.pb", "  ");
        assert_eq!(
            endpoints.missing_categories(),
            vec![ResourceCategory::VehiclePosition, ResourceCategory::Alert]
        );
    }
}
