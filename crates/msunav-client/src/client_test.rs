use super::*;

fn test_client(base_url: &str) -> NavigatorClient {
    NavigatorClient::with_base_url(30, "msunav-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn window() -> LookbackWindow {
    LookbackWindow {
        min_timestamp: 1_700_000_000,
        max_timestamp: 1_700_604_800,
    }
}

#[test]
fn build_url_appends_segments_to_base_path() {
    let client = test_client("https://msu.io/navigator/api/navigator");
    let url = client
        .build_url(SEARCH_PATH, &[("keyword", "cape")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://msu.io/navigator/api/navigator/search?keyword=cape"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://msu.io/navigator/api/navigator///");
    let url = client
        .build_url(&["metadata", "items", "1102000", "info"], &[])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://msu.io/navigator/api/navigator/metadata/items/1102000/info"
    );
}

#[test]
fn build_url_encodes_keyword() {
    let client = test_client("https://msu.io/navigator/api/navigator");
    let url = client
        .build_url(SEARCH_PATH, &[("keyword", "Red Cape & Co")])
        .unwrap();
    assert!(
        url.as_str().contains("keyword=Red+Cape+%26+Co")
            || url.as_str().contains("keyword=Red%20Cape%20%26%20Co"),
        "keyword should be percent-encoded: {url}"
    );
}

#[test]
fn build_url_encodes_item_id_segment() {
    let client = test_client("https://msu.io/navigator/api/navigator");
    let url = client
        .build_url(&["metadata", "items", "a/b", "info"], &[])
        .unwrap();
    assert!(url.path().contains("a%2Fb"), "slash must be escaped: {url}");
}

#[test]
fn pricing_url_for_starforce_sets_item_upgrade() {
    let client = test_client("https://msu.io/navigator/api/navigator");
    let url = client
        .pricing_url(
            &ItemId::new("1102000"),
            EnhancementQuery::Starforce { tier: 3 },
            window(),
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://msu.io/navigator/api/navigator/msu-stats/dynamic-pricing/enhance-price/history\
         ?itemId=1102000&period=1&minTimestamp=1700000000&maxTimestamp=1700604800&itemUpgrade=3"
    );
}

#[test]
fn pricing_url_for_potential_sets_upgrade_type_and_sub_type() {
    let client = test_client("https://msu.io/navigator/api/navigator");
    let url = client
        .pricing_url(
            &ItemId::new("1102000"),
            EnhancementQuery::Potential {
                sub_type: 5_062_010,
            },
            window(),
        )
        .unwrap();
    let query = url.query().unwrap_or_default();
    assert!(query.ends_with("&itemUpgradeType=1&itemUpgradeSubType=5062010"));
    assert!(!query.contains("itemUpgrade="));
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = NavigatorClient::with_base_url(30, "msunav-test/0.1", "not a url");
    assert!(matches!(result, Err(NavigatorError::InvalidBaseUrl { .. })));
}
