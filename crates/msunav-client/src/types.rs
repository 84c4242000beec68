//! Navigator API response types.
//!
//! Raw search records are kept separate from the normalized [`SearchRecord`]
//! because the API omits fields freely. Item metadata and pricing history are
//! decoded as-is.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Length of the pricing-history lookback window.
pub const LOOKBACK_SECS: i64 = 7 * 24 * 60 * 60;

/// Opaque item identifier.
///
/// The API sends item IDs as JSON numbers in some payloads and strings in
/// others; both deserialize into the same string-backed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemIdVisitor;

        impl serde::de::Visitor<'_> for ItemIdVisitor {
            type Value = ItemId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an item id as a string or integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId(value.to_string()))
            }
        }

        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Item category as reported by the API. Only `label` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

/// Envelope for the `search` endpoint: `{ "records": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<RawSearchRecord>,
}

/// One search hit before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchRecord {
    #[serde(default)]
    pub plain_item: Option<RawPlainItem>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The `plainItem` object embedded in a search hit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlainItem {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub token_type: Option<serde_json::Value>,
}

/// A search hit with both an ID and a name, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub item_id: ItemId,
    pub item_name: String,
    pub image_url: Option<String>,
    pub category: Option<Category>,
    pub token_type: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// metadata/items/{id}/info
// ---------------------------------------------------------------------------

/// Body of the item info endpoint. The live API wraps the document in a
/// `metadata` field; a bare document is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemInfoBody {
    Wrapped { metadata: ItemMetadata },
    Bare(ItemMetadata),
}

impl ItemInfoBody {
    pub(crate) fn into_metadata(self) -> ItemMetadata {
        match self {
            Self::Wrapped { metadata } | Self::Bare(metadata) => metadata,
        }
    }
}

/// Full metadata for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub common: ItemCommon,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: ItemStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: ItemImage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: ItemRequirements,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Identity and enhancement flags; the pricing fan-out is planned from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCommon {
    pub item_id: ItemId,
    pub item_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_cash_item: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_starforce: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_starforce: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub block_upgrade_potential: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    #[serde(default)]
    pub str: Option<i64>,
    #[serde(default)]
    pub dex: Option<i64>,
    #[serde(default)]
    pub int: Option<i64>,
    #[serde(default)]
    pub luk: Option<i64>,
    #[serde(default)]
    pub pad: Option<i64>,
    #[serde(default)]
    pub mad: Option<i64>,
    #[serde(default)]
    pub max_hp: Option<i64>,
    #[serde(default)]
    pub max_mp: Option<i64>,
}

impl ItemStats {
    /// Display label and value for every stat that is present and nonzero,
    /// in the order STR, DEX, INT, LUK, ATT, M.ATT, HP, MP.
    #[must_use]
    pub fn nonzero(&self) -> Vec<(&'static str, i64)> {
        [
            ("STR", self.str),
            ("DEX", self.dex),
            ("INT", self.int),
            ("LUK", self.luk),
            ("ATT", self.pad),
            ("M.ATT", self.mad),
            ("HP", self.max_hp),
            ("MP", self.max_mp),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| *v != 0).map(|v| (label, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImage {
    #[serde(default)]
    pub icon_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirements {
    #[serde(default)]
    pub level: Option<u32>,
}

// ---------------------------------------------------------------------------
// msu-stats/dynamic-pricing/enhance-price/history
// ---------------------------------------------------------------------------

/// One pricing sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPoint {
    #[serde(default)]
    pub end_price: f64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub sum_enhance_cnt: u64,
}

/// Time-ordered (ascending) pricing samples for one enhancement query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingHistory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<PricingPoint>,
}

impl PricingHistory {
    /// The most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&PricingPoint> {
        self.points.last()
    }
}

/// Enhancement filter for one pricing-history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementQuery {
    /// `itemUpgrade=<tier>`.
    Starforce { tier: u32 },
    /// `itemUpgradeType=1&itemUpgradeSubType=<sub_type>`; `sub_type` is a
    /// cube catalog ID.
    Potential { sub_type: u32 },
}

/// Inclusive `[min_timestamp, max_timestamp]` range in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    pub min_timestamp: i64,
    pub max_timestamp: i64,
}

impl LookbackWindow {
    /// The seven days ending at `now`.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let max_timestamp = now.timestamp();
        Self {
            min_timestamp: max_timestamp - LOOKBACK_SECS,
            max_timestamp,
        }
    }

    /// The seven days ending at the current wall-clock time.
    #[must_use]
    pub fn ending_now() -> Self {
        Self::ending_at(Utc::now())
    }
}
