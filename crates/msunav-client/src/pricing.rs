//! Enhancement pricing fan-out.
//!
//! For one item, [`plan_pricing_queries`] decides which price histories to
//! request: one per starforce tier up to the item's cap and one per cube. The
//! client fires them all at once, waits for every one to settle, and
//! [`merge_pricing_results`] folds the outcomes into two keyed tables. A
//! failed or empty request becomes an explicit [`PriceCell::NoData`] entry
//! and never fails the whole view.

use std::collections::BTreeMap;
use std::fmt;

use futures::future::join_all;

use crate::client::NavigatorClient;
use crate::error::NavigatorError;
use crate::types::{
    EnhancementQuery, ItemCommon, ItemId, LookbackWindow, PricingHistory, PricingPoint,
};

/// Highest starforce tier that is ever priced.
pub const MAX_PRICED_TIER: u32 = 10;

/// Potential cubes with a tracked price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cube {
    Black,
    Occult,
    BonusOccult,
}

impl Cube {
    /// Every cube, in display order.
    pub const ALL: [Cube; 3] = [Cube::Black, Cube::Occult, Cube::BonusOccult];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Cube::Black => "Black Cube",
            Cube::Occult => "Occult Cube",
            Cube::BonusOccult => "Bonus Occult Cube",
        }
    }

    /// Catalog ID sent as `itemUpgradeSubType`.
    #[must_use]
    pub fn catalog_id(self) -> u32 {
        match self {
            Cube::Black => 5_062_010,
            Cube::Occult => 2_711_000,
            Cube::BonusOccult => 2_730_000,
        }
    }

    #[must_use]
    pub fn from_catalog_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|cube| cube.catalog_id() == id)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies which table cell a pricing request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingTag {
    Starforce { tier: u32 },
    Potential { cube: Cube },
}

impl PricingTag {
    #[must_use]
    pub fn query(self) -> EnhancementQuery {
        match self {
            PricingTag::Starforce { tier } => EnhancementQuery::Starforce { tier },
            PricingTag::Potential { cube } => EnhancementQuery::Potential {
                sub_type: cube.catalog_id(),
            },
        }
    }
}

/// Lists the pricing requests for an item.
///
/// Starforce tiers `0..=min(10, max_starforce)` are planned when starforce is
/// enabled and capped above zero; every cube is planned unless potential
/// upgrades are blocked.
#[must_use]
pub fn plan_pricing_queries(common: &ItemCommon) -> Vec<PricingTag> {
    let mut tags = Vec::new();

    if common.enable_starforce && common.max_starforce > 0 {
        let top = common.max_starforce.min(MAX_PRICED_TIER);
        tags.extend((0..=top).map(|tier| PricingTag::Starforce { tier }));
    }

    if !common.block_upgrade_potential {
        tags.extend(Cube::ALL.into_iter().map(|cube| PricingTag::Potential { cube }));
    }

    tags
}

/// One table cell: the latest price sample, or an explicit gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceCell {
    Available(PricingPoint),
    NoData,
}

impl PriceCell {
    /// Uses the most recent point of `history`; no points means no data.
    #[must_use]
    pub fn from_history(history: &PricingHistory) -> Self {
        history
            .latest()
            .copied()
            .map_or(PriceCell::NoData, PriceCell::Available)
    }

    #[must_use]
    pub fn point(&self) -> Option<&PricingPoint> {
        match self {
            PriceCell::Available(point) => Some(point),
            PriceCell::NoData => None,
        }
    }
}

/// Price cells keyed by starforce tier or cube.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable<K: Ord> {
    entries: BTreeMap<K, PriceCell>,
}

impl<K: Ord> Default for PricingTable<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> PricingTable<K> {
    pub fn insert(&mut self, key: K, cell: PriceCell) {
        self.entries.insert(key, cell);
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&PriceCell> {
        self.entries.get(key)
    }

    /// Cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &PriceCell)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when at least one cell has a price.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.entries
            .values()
            .any(|cell| matches!(cell, PriceCell::Available(_)))
    }
}

/// The two pricing tables for one item view.
///
/// A table is `None` when its category was not requested at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTables {
    pub starforce: Option<PricingTable<u32>>,
    pub potential: Option<PricingTable<Cube>>,
}

/// Folds settled pricing requests into [`PricingTables`].
///
/// Every outcome produces a cell; failures are logged and recorded as
/// [`PriceCell::NoData`].
#[must_use]
pub fn merge_pricing_results<I>(item_id: &ItemId, outcomes: I) -> PricingTables
where
    I: IntoIterator<Item = (PricingTag, Result<PricingHistory, NavigatorError>)>,
{
    outcomes
        .into_iter()
        .fold(PricingTables::default(), |mut tables, (tag, outcome)| {
            let cell = match outcome {
                Ok(history) => PriceCell::from_history(&history),
                Err(e) => {
                    tracing::warn!(
                        item_id = %item_id,
                        tag = ?tag,
                        error = %e,
                        "pricing request failed; marking as no data"
                    );
                    PriceCell::NoData
                }
            };

            match tag {
                PricingTag::Starforce { tier } => {
                    tables.starforce.get_or_insert_with(PricingTable::default).insert(tier, cell);
                }
                PricingTag::Potential { cube } => {
                    tables.potential.get_or_insert_with(PricingTable::default).insert(cube, cell);
                }
            }
            tables
        })
}

impl NavigatorClient {
    /// Fetches every planned price history for `common` over the seven days
    /// ending now.
    pub async fn fetch_all_pricing(&self, common: &ItemCommon) -> PricingTables {
        self.fetch_all_pricing_within(common, LookbackWindow::ending_now())
            .await
    }

    /// Fetches every planned price history for `common` within `window`.
    ///
    /// All requests run concurrently on the calling task and are awaited
    /// together; a failed request does not cancel the others.
    pub async fn fetch_all_pricing_within(
        &self,
        common: &ItemCommon,
        window: LookbackWindow,
    ) -> PricingTables {
        let tags = plan_pricing_queries(common);
        let requested = tags.len();

        let outcomes = join_all(tags.into_iter().map(|tag| async move {
            let outcome = self
                .fetch_enhancement_pricing(&common.item_id, tag.query(), window)
                .await;
            (tag, outcome)
        }))
        .await;

        let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
        let tables = merge_pricing_results(&common.item_id, outcomes);

        tracing::info!(
            item_id = %common.item_id,
            requested,
            failed,
            "pricing fan-out settled"
        );
        tables
    }
}
