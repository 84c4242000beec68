//! Plain-text rendering of search results, item details, and pricing tables.
//!
//! Every function returns a `String` so output can be asserted in tests.

use msunav_client::{format_price, Cube, ItemMetadata, PriceCell, PricingTable, SearchRecord};

const NO_DATA: &str = "No data";

pub(crate) fn render_search_results(items: &[SearchRecord]) -> String {
    if items.is_empty() {
        return "No items found\n".to_string();
    }

    let mut out = format!("{:<12}{:<36}CATEGORY\n", "ID", "NAME");
    for item in items {
        let category = item
            .category
            .as_ref()
            .and_then(|c| c.label.as_deref())
            .unwrap_or("\u{2014}");
        out.push_str(&format!(
            "{:<12}{:<36}{}\n",
            item.item_id.as_str(),
            item.item_name,
            category
        ));
    }
    out
}

pub(crate) fn render_item_details(metadata: &ItemMetadata) -> String {
    let common = &metadata.common;
    let mut lines = vec![common.item_name.clone(), format!("ID: {}", common.item_id)];

    if let Some(icon) = metadata.image.icon_image_url.as_deref() {
        lines.push(format!("Icon: {icon}"));
    }
    let level = metadata
        .required
        .level
        .map_or_else(|| "\u{2014}".to_string(), |l| l.to_string());
    lines.push(format!("Level Requirement: {level}"));
    let category = metadata
        .category
        .as_ref()
        .and_then(|c| c.label.as_deref())
        .unwrap_or("Unknown");
    lines.push(format!("Category: {category}"));
    if common.is_cash_item {
        lines.push("Cash Item: Yes".to_string());
    }
    if common.enable_starforce {
        lines.push(format!("Max Starforce: {}", common.max_starforce));
    }

    let stats = metadata.stats.nonzero();
    if !stats.is_empty() {
        let line = stats
            .iter()
            .map(|(label, value)| format!("{label}: +{value}"))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One row: label then current / average / count, or a "No data" span.
fn price_row(label: &str, cell: &PriceCell) -> String {
    match cell.point() {
        Some(point) => format!(
            "{:<20}{:>10}{:>10}{:>8}\n",
            label,
            format_price(point.end_price),
            format_price(point.avg_price),
            point.sum_enhance_cnt
        ),
        None => format!("{label:<20}{NO_DATA:>10}\n"),
    }
}

fn table_header(first: &str) -> String {
    format!("{:<20}{:>10}{:>10}{:>8}\n", first, "Current", "Avg", "Count")
}

pub(crate) fn render_starforce_table(table: &PricingTable<u32>) -> String {
    let mut out = String::from("Starforce Enhancement:\n");
    if !table.has_data() {
        out.push_str("No starforce pricing data available\n");
        return out;
    }

    out.push_str(&table_header("Star"));
    for (tier, cell) in table.iter() {
        out.push_str(&price_row(&format!("{tier}\u{2605}"), cell));
    }
    out
}

pub(crate) fn render_potential_table(table: &PricingTable<Cube>) -> String {
    let mut out = String::from("Potential Enhancement:\n");
    if !table.has_data() {
        out.push_str("No potential pricing data available\n");
        return out;
    }

    out.push_str(&table_header("Cube Type"));
    for (cube, cell) in table.iter() {
        out.push_str(&price_row(cube.name(), cell));
    }
    out
}

#[cfg(test)]
mod tests {
    use msunav_client::{ItemCommon, ItemId, PricingPoint};

    use super::*;

    fn point(end_price: f64, avg_price: f64, count: u64) -> PriceCell {
        PriceCell::Available(PricingPoint {
            end_price,
            avg_price,
            sum_enhance_cnt: count,
        })
    }

    fn metadata() -> ItemMetadata {
        serde_json::from_value(serde_json::json!({
            "common": {
                "itemId": 1_102_000,
                "itemName": "Red Cape",
                "isCashItem": true,
                "enableStarforce": true,
                "maxStarforce": 5
            },
            "stats": { "str": 3, "dex": 0, "pad": 2 },
            "required": { "level": 30 },
            "category": { "label": "Cape" }
        }))
        .unwrap()
    }

    #[test]
    fn empty_search_renders_no_items_found() {
        assert_eq!(render_search_results(&[]), "No items found\n");
    }

    #[test]
    fn search_results_list_one_line_per_item() {
        let items = vec![SearchRecord {
            item_id: ItemId::new("1102000"),
            item_name: "Red Cape".to_owned(),
            image_url: None,
            category: None,
            token_type: None,
        }];
        let out = render_search_results(&items);
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().nth(1).unwrap().starts_with("1102000"));
    }

    #[test]
    fn item_details_show_flags_and_nonzero_stats() {
        let out = render_item_details(&metadata());
        assert!(out.contains("Level Requirement: 30"));
        assert!(out.contains("Category: Cape"));
        assert!(out.contains("Cash Item: Yes"));
        assert!(out.contains("Max Starforce: 5"));
        assert!(out.contains("STR: +3"));
        assert!(out.contains("ATT: +2"));
        assert!(!out.contains("DEX"));
    }

    #[test]
    fn item_details_hide_starforce_when_disabled() {
        let mut meta = metadata();
        meta.common = ItemCommon {
            enable_starforce: false,
            is_cash_item: false,
            ..meta.common
        };
        let out = render_item_details(&meta);
        assert!(!out.contains("Max Starforce"));
        assert!(!out.contains("Cash Item"));
    }

    #[test]
    fn starforce_table_formats_prices_and_gaps() {
        let mut table = PricingTable::default();
        table.insert(0, point(1_500_000.0, 2_500.0, 12));
        table.insert(1, PriceCell::NoData);
        let out = render_starforce_table(&table);

        assert!(out.contains("1.50M"));
        assert!(out.contains("2.5K"));
        assert!(out.contains("12"));
        let gap = out
            .lines()
            .find(|l| l.starts_with("1\u{2605}"))
            .expect("row for tier 1");
        assert!(gap.contains(NO_DATA));
    }

    #[test]
    fn table_without_data_renders_category_message() {
        let mut table = PricingTable::default();
        for cube in Cube::ALL {
            table.insert(cube, PriceCell::NoData);
        }
        assert_eq!(
            render_potential_table(&table),
            "Potential Enhancement:\nNo potential pricing data available\n"
        );
    }

    #[test]
    fn potential_table_uses_cube_names() {
        let mut table = PricingTable::default();
        table.insert(Cube::Black, point(999.0, 998.6, 1));
        let out = render_potential_table(&table);
        assert!(out.contains("Black Cube"));
        assert!(out.contains("999"));
    }
}
