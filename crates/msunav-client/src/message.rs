//! Host message contract.
//!
//! A host (browser extension bridge, CLI, or anything else that speaks JSON)
//! sends `{"action": ..., ...}` requests and receives the fetch result as
//! JSON. Failures never cross this boundary: they are logged and answered
//! with `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::NavigatorClient;
use crate::pricing::Cube;
use crate::types::{EnhancementQuery, ItemId, LookbackWindow};

/// Which enhancement a pricing request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeType {
    Starforce,
    Potential,
}

/// A request from the host, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostRequest {
    #[serde(rename_all = "camelCase")]
    GetItemMetadata {
        item_id: ItemId,
    },
    #[serde(rename_all = "camelCase")]
    GetEnhancementPricing {
        item_id: ItemId,
        upgrade_type: UpgradeType,
        #[serde(default)]
        upgrade_sub_type: Option<u32>,
        #[serde(default)]
        item_upgrade: Option<u32>,
    },
    SearchItem {
        keyword: String,
    },
}

impl HostRequest {
    /// The history filter for a pricing request, or `None` when the field
    /// its upgrade type needs is missing.
    fn enhancement_query(
        upgrade_type: UpgradeType,
        upgrade_sub_type: Option<u32>,
        item_upgrade: Option<u32>,
    ) -> Option<EnhancementQuery> {
        match upgrade_type {
            UpgradeType::Starforce => item_upgrade.map(|tier| EnhancementQuery::Starforce { tier }),
            UpgradeType::Potential => {
                upgrade_sub_type.map(|sub_type| EnhancementQuery::Potential { sub_type })
            }
        }
    }
}

#[derive(Serialize)]
struct MetadataReply<'a> {
    metadata: &'a crate::types::ItemMetadata,
}

#[derive(Serialize)]
struct SearchReply<'a> {
    items: &'a [crate::types::SearchRecord],
}

/// Serializes a reply, degrading to `null` if that is impossible.
fn to_reply<T: Serialize>(value: &T, action: &str) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(action, error = %e, "could not serialize reply");
        Value::Null
    })
}

/// Answers one host request.
///
/// - `getItemMetadata` -> `{"metadata": {...}}`
/// - `getEnhancementPricing` -> `{"points": [...]}`
/// - `searchItem` -> `{"items": [...]}`
///
/// Any failure is logged and answered with `null`.
pub async fn dispatch(client: &NavigatorClient, request: HostRequest) -> Value {
    match request {
        HostRequest::GetItemMetadata { item_id } => {
            match client.fetch_item_details(&item_id).await {
                Ok(metadata) => {
                    let reply = MetadataReply {
                        metadata: &metadata,
                    };
                    to_reply(&reply, "getItemMetadata")
                }
                Err(e) => {
                    tracing::warn!(
                        item_id = %item_id,
                        error = %e,
                        "error fetching item metadata"
                    );
                    Value::Null
                }
            }
        }
        HostRequest::GetEnhancementPricing {
            item_id,
            upgrade_type,
            upgrade_sub_type,
            item_upgrade,
        } => {
            let Some(query) =
                HostRequest::enhancement_query(upgrade_type, upgrade_sub_type, item_upgrade)
            else {
                tracing::warn!(
                    item_id = %item_id,
                    ?upgrade_type,
                    "pricing request is missing its upgrade parameter"
                );
                return Value::Null;
            };
            if let EnhancementQuery::Potential { sub_type } = query {
                if Cube::from_catalog_id(sub_type).is_none() {
                    tracing::debug!(sub_type, "pricing request for an untracked cube");
                }
            }

            match client
                .fetch_enhancement_pricing(&item_id, query, LookbackWindow::ending_now())
                .await
            {
                Ok(history) => to_reply(&history, "getEnhancementPricing"),
                Err(e) => {
                    tracing::warn!(
                        item_id = %item_id,
                        error = %e,
                        "error fetching enhancement pricing"
                    );
                    Value::Null
                }
            }
        }
        HostRequest::SearchItem { keyword } => match client.search(&keyword).await {
            Ok(items) => to_reply(&SearchReply { items: &items }, "searchItem"),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "error searching items");
                Value::Null
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_item_metadata_with_numeric_id() {
        let request: HostRequest =
            serde_json::from_str(r#"{"action":"getItemMetadata","itemId":1102000}"#).unwrap();
        assert_eq!(
            request,
            HostRequest::GetItemMetadata {
                item_id: ItemId::new("1102000")
            }
        );
    }

    #[test]
    fn parses_potential_pricing_request() {
        let request: HostRequest = serde_json::from_str(
            r#"{"action":"getEnhancementPricing","itemId":"1102000","upgradeType":"potential","upgradeSubType":5062010}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            HostRequest::GetEnhancementPricing {
                item_id: ItemId::new("1102000"),
                upgrade_type: UpgradeType::Potential,
                upgrade_sub_type: Some(5_062_010),
                item_upgrade: None,
            }
        );
    }

    #[test]
    fn parses_search_item() {
        let request: HostRequest =
            serde_json::from_str(r#"{"action":"searchItem","keyword":"Red Cape"}"#).unwrap();
        assert_eq!(
            request,
            HostRequest::SearchItem {
                keyword: "Red Cape".to_owned()
            }
        );
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(serde_json::from_str::<HostRequest>(r#"{"action":"openPopup"}"#).is_err());
    }

    #[test]
    fn enhancement_query_requires_matching_parameter() {
        assert_eq!(
            HostRequest::enhancement_query(UpgradeType::Starforce, None, Some(4)),
            Some(EnhancementQuery::Starforce { tier: 4 })
        );
        assert_eq!(
            HostRequest::enhancement_query(UpgradeType::Starforce, Some(5_062_010), None),
            None
        );
        assert_eq!(
            HostRequest::enhancement_query(UpgradeType::Potential, None, Some(4)),
            None
        );
    }
}
