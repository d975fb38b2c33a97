use std::collections::HashSet;

use chrono::Weekday;
use ilha_core::{Lang, LocalizedText, MarineConditions, Place};

use super::*;

fn place(id: &str, category: &str, tags: &[&str]) -> Place {
    Place {
        id: id.to_string(),
        name: LocalizedText::Plain(id.to_string()),
        category: Some(category.to_string()),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        ..Place::default()
    }
}

fn catalog() -> Vec<Place> {
    vec![
        place("praia-de-santana", "beach", &["beach"]),
        place("praia-do-morro", "beach", &["beach", "turtles"]),
        place("praia-de-pau-seco", "beach", &["dunes"]),
        place("vila-do-maio", "settlement", &["village"]),
        place("igreja-nossa-senhora-da-luz", "church", &["heritage"]),
        place("terras-salgadas", "protected", &["dunes", "reserve"]),
        place("salinas-porto-ingles", "protected", &["salt"]),
    ]
}

const CALM: MarineConditions = MarineConditions {
    wave_height: Some(0.8),
    wind_speed: Some(6.0),
};
const WINDY: MarineConditions = MarineConditions {
    wave_height: Some(2.4),
    wind_speed: Some(20.0),
};

#[test]
fn fills_three_slots_in_order_with_localized_labels() {
    let places = catalog();
    let plan = build_today_plan(&places, &CALM, Lang::Pt, Weekday::Tue, &PlanWeights::default());
    let slots: Vec<_> = plan.iter().map(|s| s.slot).collect();
    assert_eq!(slots, vec![Slot::Morning, Slot::Midday, Slot::Late]);
    assert_eq!(plan[0].label, "Manhã");
    assert_eq!(plan[2].label, "Fim da tarde");

    let en = build_today_plan(&places, &CALM, Lang::En, Weekday::Tue, &PlanWeights::default());
    assert_eq!(en[1].label, "Midday");
}

#[test]
fn never_repeats_a_place_id() {
    let mut places = catalog();
    // Same id listed twice, as happens when catalogs are concatenated.
    places.push(place("praia-de-santana", "beach", &["beach"]));
    for conditions in [CALM, WINDY, MarineConditions::default()] {
        for weekday in [Weekday::Mon, Weekday::Sat, Weekday::Sun] {
            let plan =
                build_today_plan(&places, &conditions, Lang::Pt, weekday, &PlanWeights::default());
            let ids: HashSet<_> = plan.iter().map(|s| s.spot.id.as_str()).collect();
            assert_eq!(ids.len(), plan.len());
        }
    }
}

#[test]
fn windy_day_allows_one_beach() {
    let beaches_only: Vec<Place> = (0..5)
        .map(|i| place(&format!("praia-{i}"), "beach", &["beach"]))
        .collect();
    let plan = build_today_plan(
        &beaches_only,
        &WINDY,
        Lang::En,
        Weekday::Sun,
        &PlanWeights::default(),
    );
    assert_eq!(plan.len(), 1, "later slots have no eligible place");
    assert_eq!(plan[0].slot, Slot::Morning);
}

#[test]
fn calm_day_allows_at_most_two_beaches() {
    let places = catalog();
    for weekday in [Weekday::Sat, Weekday::Sun, Weekday::Wed] {
        let plan = build_today_plan(&places, &CALM, Lang::Pt, weekday, &PlanWeights::default());
        let beaches = plan.iter().filter(|s| s.bucket == Bucket::Beach).count();
        assert!(beaches <= 2, "{weekday}: {beaches} beaches");
    }
}

#[test]
fn missing_readings_count_as_calm_and_still() {
    let signals = PlanSignals::from(&MarineConditions::default());
    assert!(signals.sea_calm);
    assert!(!signals.windy);
    assert_eq!(signals.max_beach, 2);
}

#[test]
fn wind_pushes_beach_out_of_first_slot() {
    let places = catalog();
    let plan = build_today_plan(&places, &WINDY, Lang::Pt, Weekday::Tue, &PlanWeights::default());
    assert_ne!(plan[0].bucket, Bucket::Beach);
    let beaches = plan.iter().filter(|s| s.bucket == Bucket::Beach).count();
    assert!(beaches <= 1);
}

#[test]
fn equal_scores_keep_input_order() {
    let places = vec![
        place("first", "restaurant", &[]),
        place("second", "restaurant", &[]),
        place("third", "restaurant", &[]),
    ];
    let weights = PlanWeights {
        repeat_penalty: 0.0,
        ..PlanWeights::default()
    };
    let plan = build_today_plan(&places, &CALM, Lang::En, Weekday::Tue, &weights);
    let ids: Vec<_> = plan.iter().map(|s| s.spot.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn repeat_penalty_spreads_buckets() {
    let places = vec![
        place("forte-1", "fort", &[]),
        place("forte-2", "fort", &[]),
        place("mercado", "market", &[]),
    ];
    let weights = PlanWeights {
        repeat_penalty: 10.0,
        ..PlanWeights::default()
    };
    let plan = build_today_plan(&places, &CALM, Lang::En, Weekday::Tue, &weights);
    assert_eq!(plan[0].spot.id, "forte-1");
    assert_eq!(plan[1].spot.id, "mercado");
    assert_eq!(plan[2].spot.id, "forte-2");
}

#[test]
fn blank_ids_and_empty_input_yield_nothing() {
    let places = vec![place("  ", "beach", &["beach"])];
    assert!(build_today_plan(&places, &CALM, Lang::Pt, Weekday::Tue, &PlanWeights::default()).is_empty());
    assert!(build_today_plan(&[], &CALM, Lang::Pt, Weekday::Tue, &PlanWeights::default()).is_empty());
}

#[test]
fn output_is_deterministic() {
    let places = catalog();
    let a = build_today_plan(&places, &CALM, Lang::Pt, Weekday::Fri, &PlanWeights::default());
    let b = build_today_plan(&places, &CALM, Lang::Pt, Weekday::Fri, &PlanWeights::default());
    let ids = |plan: &[PlanSlot<'_>]| plan.iter().map(|s| s.spot.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn plan_serializes_with_lowercase_slot_names() {
    let places = catalog();
    let plan = build_today_plan(&places, &CALM, Lang::En, Weekday::Tue, &PlanWeights::default());
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json[0]["slot"], "morning");
    assert!(json[0]["spot"]["id"].is_string());
}
