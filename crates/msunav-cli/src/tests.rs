use clap::Parser;

use super::*;

#[test]
fn parses_search_command() {
    let cli =
        Cli::try_parse_from(["msunav", "search", "Red Cape"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref keyword }) if keyword == "Red Cape"
    ));
}

#[test]
fn parses_item_command_with_pricing_by_default() {
    let cli = Cli::try_parse_from(["msunav", "item", "1102000"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Item { ref item_id, no_pricing: false }) if item_id == "1102000"
    ));
}

#[test]
fn parses_item_command_without_pricing() {
    let cli = Cli::try_parse_from(["msunav", "item", "1102000", "--no-pricing"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Item {
            no_pricing: true,
            ..
        })
    ));
}

#[test]
fn parses_recent_command() {
    let cli = Cli::try_parse_from(["msunav", "recent"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Recent)));
}

#[test]
fn parses_dispatch_command() {
    let cli = Cli::try_parse_from([
        "msunav",
        "dispatch",
        r#"{"action":"searchItem","keyword":"cape"}"#,
    ])
    .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Dispatch { .. })));
}

#[test]
fn search_requires_keyword() {
    assert!(Cli::try_parse_from(["msunav", "search"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["msunav"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
