//! Column names of the smart-logistics dataset.
//!
//! Only the group columns and the two hash columns are required to be present;
//! every other column is carried through untouched.

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const INVENTORY_LEVEL: &str = "Inventory_Level";
pub const SHIPMENT_STATUS: &str = "Shipment_Status";
pub const TEMPERATURE: &str = "Temperature";
pub const HUMIDITY: &str = "Humidity";
pub const WAITING_TIME: &str = "Waiting_Time";

/// Hash over Latitude, Longitude, Inventory_Level and Shipment_Status.
pub const LOCATION_STATUS_HASH: &str = "Location_Status_Hash";
/// Hash over Temperature, Humidity and Waiting_Time.
pub const ENV_TIME_HASH: &str = "Env_Time_Hash";
/// Hash over the whole row. Never touched, never required.
pub const ALL_DATA_HASH: &str = "All_Data_Hash";

/// Header of the published dataset, in file order.
pub const REFERENCE_HEADER: [&str; 19] = [
    "Timestamp",
    "Asset_ID",
    LATITUDE,
    LONGITUDE,
    INVENTORY_LEVEL,
    SHIPMENT_STATUS,
    TEMPERATURE,
    HUMIDITY,
    "Traffic_Status",
    WAITING_TIME,
    "User_Transaction_Amount",
    "User_Purchase_Frequency",
    "Logistics_Delay_Reason",
    "Asset_Utilization",
    "Demand_Forecast",
    "Logistics_Delay",
    ALL_DATA_HASH,
    LOCATION_STATUS_HASH,
    ENV_TIME_HASH,
];

/// Returns true if the column carries a precomputed hash.
pub fn is_hash_column(column: &str) -> bool {
    column.ends_with("_Hash")
}
