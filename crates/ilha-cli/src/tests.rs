use super::*;

#[test]
fn parses_receitas_with_defaults() {
    let cli = Cli::try_parse_from(["ilha", "receitas", "--year", "2025"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Receitas {
            ref year,
            island: None,
            filter: None,
            ref all_label,
        } if year == "2025" && all_label == "Todas"
    ));
}

#[test]
fn receitas_requires_year() {
    assert!(Cli::try_parse_from(["ilha", "receitas"]).is_err());
}

#[test]
fn parses_transfers_year() {
    let cli = Cli::try_parse_from(["ilha", "transfers", "--year", "2023"]).unwrap();
    assert!(matches!(cli.command, Commands::Transfers { year: 2023 }));
}

#[test]
fn parses_match_identifiers() {
    let cli = Cli::try_parse_from(["ilha", "match", "--osm-id", "node/42", "--name", "Alcatraz"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Match {
            id: None,
            osm_id: Some(ref osm),
            name: Some(ref name),
        } if osm == "node/42" && name == "Alcatraz"
    ));
}

#[test]
fn parses_search_with_lang() {
    let cli = Cli::try_parse_from(["ilha", "search", "santana", "--limit", "3", "--lang", "en"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            ref query,
            limit: 3,
            places: PlacesArgs { lang: Some(Lang::En) },
        } if query == "santana"
    ));
}

#[test]
fn rejects_unknown_lang() {
    assert!(Cli::try_parse_from(["ilha", "search", "x", "--lang", "fr"]).is_err());
}

#[test]
fn parses_plan_weekday() {
    let cli = Cli::try_parse_from(["ilha", "plan", "--weekday", "sun"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Plan {
            weekday: Some(chrono::Weekday::Sun),
            ..
        }
    ));

    let cli = Cli::try_parse_from(["ilha", "plan"]).unwrap();
    assert!(matches!(cli.command, Commands::Plan { weekday: None, .. }));
}

#[test]
fn parses_repeated_positions() {
    let cli = Cli::try_parse_from([
        "ilha", "nearby", "--at", "-23.15,15.30", "--at", "-23.12, 15.35", "--radius", "800",
    ])
    .unwrap();
    let Commands::Nearby { positions, radius, .. } = cli.command else {
        panic!("expected nearby command");
    };
    assert_eq!(positions, vec![[-23.15, 15.30], [-23.12, 15.35]]);
    assert!((radius - 800.0).abs() < f64::EPSILON);
}

#[test]
fn nearby_requires_a_position() {
    assert!(Cli::try_parse_from(["ilha", "nearby"]).is_err());
}

#[test]
fn position_parser_rejects_garbage() {
    assert!(parse_position("15.3").is_err());
    assert!(parse_position("abc,15.3").is_err());
    assert!(parse_position("-23.1,95").is_err());
    assert_eq!(parse_position(" -23.1 , 15.3 ").unwrap(), [-23.1, 15.3]);
}
