use serde::{Deserialize, Serialize};

/// Administrative-boundary names captured by a location field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationValue {
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub postal_code: String,
}

/// Which parts of a [`LocationValue`] are emitted, in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationOutputFormat {
    #[default]
    Full,
    SubdistrictDistrictProvince,
    DistrictProvince,
    Province,
    Subdistrict,
    District,
}
