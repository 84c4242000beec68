//! Command handlers for item lookup.
//!
//! Fetch failures are reported with a short user-facing message and a
//! non-zero exit; pricing gaps are shown inline and never fail the command.

use chrono::Utc;
use msunav_client::{
    dispatch, load_last_search, save_last_search, HostRequest, Interaction, ItemId,
    NavigatorClient,
};
use msunav_core::AppConfig;

use crate::render;

/// Build a Navigator client from configuration.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// built.
pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<NavigatorClient> {
    NavigatorClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Navigator client: {e}"))
}

/// Search by keyword, print the hits, and store the search for `recent`.
///
/// # Errors
///
/// Returns an error if the search fails. A failure to persist the search is
/// only logged.
pub(crate) async fn run_search(
    client: &NavigatorClient,
    config: &AppConfig,
    interaction: &mut Interaction,
    keyword: &str,
) -> anyhow::Result<()> {
    interaction.select_text(keyword);
    let Some(keyword) = interaction.take_selection() else {
        anyhow::bail!("search keyword is empty");
    };

    let outcome = client.search(&keyword).await;
    interaction.record_search(&keyword, &outcome, Utc::now());
    if let Some(last) = interaction.last_search() {
        if let Err(e) = save_last_search(&config.state_path, last) {
            tracing::warn!(error = %e, "could not store last search");
        }
    }

    match outcome {
        Ok(items) => {
            print!("{}", render::render_search_results(&items));
            Ok(())
        }
        Err(e) => {
            tracing::error!(keyword = %keyword, error = %e, "search failed");
            println!("Failed to search items. Please try again.");
            Err(e.into())
        }
    }
}

/// Print item details and, unless `with_pricing` is false, its pricing tables.
///
/// # Errors
///
/// Returns an error if the item details cannot be fetched. Pricing failures
/// are rendered as "no data".
pub(crate) async fn run_item(
    client: &NavigatorClient,
    item_id: &str,
    with_pricing: bool,
) -> anyhow::Result<()> {
    let item_id = ItemId::new(item_id);
    let metadata = match client.fetch_item_details(&item_id).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::error!(item_id = %item_id, error = %e, "item details failed");
            println!("Failed to load item details.");
            return Err(e.into());
        }
    };

    print!("{}", render::render_item_details(&metadata));

    if !with_pricing {
        return Ok(());
    }

    let tables = client.fetch_all_pricing(&metadata.common).await;
    if tables.starforce.is_some() || tables.potential.is_some() {
        println!();
        println!("Enhancement Pricing");
    }
    if let Some(table) = &tables.starforce {
        println!();
        print!("{}", render::render_starforce_table(table));
    }
    if let Some(table) = &tables.potential {
        println!();
        print!("{}", render::render_potential_table(table));
    }

    Ok(())
}

/// Print the stored search if it is still fresh.
///
/// # Errors
///
/// Returns an error if the state file exists but cannot be read.
pub(crate) fn run_recent(config: &AppConfig) -> anyhow::Result<()> {
    let stored = load_last_search(&config.state_path)?;
    let interaction = Interaction::with_last_search(stored);

    match interaction.restorable_search(Utc::now()) {
        Some(last) => {
            println!("Last search: {}", last.keyword);
            let items = last.items.as_deref().unwrap_or_default();
            print!("{}", render::render_search_results(items));
        }
        None => println!("No recent search"),
    }
    Ok(())
}

/// Answer one JSON host request and print the JSON reply.
///
/// # Errors
///
/// Returns an error if `raw` is not a valid host request.
pub(crate) async fn run_dispatch(client: &NavigatorClient, raw: &str) -> anyhow::Result<()> {
    let request: HostRequest = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("invalid host request: {e}"))?;
    let reply = dispatch(client, request).await;
    println!("{reply}");
    Ok(())
}
