//! Booking service response DTOs.
//!
//! These types map directly to the trains-between-stations JSON response.
//! Field names keep the service's own spelling (including `availablity`).
//! Values that the extractor validates itself are kept as raw JSON.

use serde::Deserialize;
use serde_json::Value;

/// Response from `tbsWithAvailabilityAndRecommendation`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainsBetweenStations {
    /// Trains running between the two stations. Absent when none were found.
    #[serde(default)]
    pub train_btwn_stns_list: Option<Vec<RawTrainEntry>>,
}

/// One train between the queried stations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrainEntry {
    pub train_name: String,

    pub train_number: String,

    /// Boarding station code.
    pub frm_stn_code: String,

    /// Alighting station code.
    pub to_stn_code: String,

    /// Scheduled arrival at the alighting station (HH:MM).
    pub arrival_time: String,

    /// Scheduled departure from the boarding station (HH:MM).
    pub departure_time: String,

    /// Weekly running flags, `"Y"` when the train runs that day.
    pub running_mon: String,
    pub running_tue: String,
    pub running_wed: String,
    pub running_thu: String,
    pub running_fri: String,
    pub running_sat: String,
    pub running_sun: String,

    /// One entry per fare class per queried date.
    pub tbs_availability: Vec<RawAvailabilityEntry>,
}

/// Availability of one fare class on one date.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAvailabilityEntry {
    #[serde(rename = "availablityDate")]
    pub availability_date: String,

    /// Epoch milliseconds. Validated during extraction.
    #[serde(rename = "lastUpdatedOnRaw", default)]
    pub last_updated_on_raw: Value,

    /// Human-readable status, e.g. "Available-0042". Null when unknown.
    #[serde(rename = "prettyPrintingAvailablityStatus", default)]
    pub pretty_status: Option<String>,

    /// Raw status code, e.g. "GNWL12/WL5".
    #[serde(rename = "availablityStatus", default)]
    pub status_code: Option<String>,

    /// Confirmation chance in percent; number or numeric string.
    #[serde(rename = "predictionPercentage", default)]
    pub prediction_percentage: Option<Value>,

    #[serde(rename = "classType", default)]
    pub class_type: Option<String>,

    /// Fare in rupees; usually a number, sometimes a numeric string.
    #[serde(rename = "totalFare", default)]
    pub total_fare: Option<Value>,

    #[serde(default)]
    pub quota: Option<String>,
}
