//! Client for the MapleStory Universe Navigator API: item search, item
//! metadata, and enhancement pricing.

pub mod client;
pub mod error;
pub mod format;
pub mod message;
pub mod normalize;
pub mod pricing;
pub mod state;
pub mod types;

pub use client::NavigatorClient;
pub use error::{NavigatorError, StateError};
pub use format::format_price;
pub use message::{dispatch, HostRequest, UpgradeType};
pub use normalize::{normalize_search_record, normalize_search_records};
pub use pricing::{
    merge_pricing_results, plan_pricing_queries, Cube, PriceCell, PricingTable, PricingTables,
    PricingTag, MAX_PRICED_TIER,
};
pub use state::{load_last_search, save_last_search, Interaction, LastSearch};
pub use types::{
    Category, EnhancementQuery, ItemCommon, ItemId, ItemMetadata, LookbackWindow, PricingHistory,
    PricingPoint, SearchRecord,
};
