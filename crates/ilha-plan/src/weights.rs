//! Hand-tuned scoring tables for the day plan.
//!
//! Kept apart from the selection loop so the numbers can be tuned and tested
//! on their own. [`PlanWeights::default`] carries the shipped values.

use chrono::Weekday;

use crate::bucket::{has_keyword, Bucket};
use crate::plan::{PlanSignals, Slot};

/// Base appeal of a bucket and how the weather shifts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketWeight {
    pub base: f64,
    /// Added when the sea is calm.
    pub calm_sea: f64,
    /// Added when it is windy.
    pub windy: f64,
}

/// Bonus for places whose category or tags carry `keyword`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNudge {
    pub keyword: String,
    pub bonus: f64,
    /// Only applies in this slot when set.
    pub slot: Option<Slot>,
    pub needs_calm_sea: bool,
}

/// Fixed bonus for a curated place in a given slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritePick {
    pub place_id: String,
    pub slot: Slot,
    /// Empty means every day.
    pub weekdays: Vec<Weekday>,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanWeights {
    pub buckets: Vec<(Bucket, BucketWeight)>,
    pub weekday_boosts: Vec<(Weekday, Bucket, f64)>,
    pub slot_boosts: Vec<(Slot, Bucket, f64)>,
    pub tag_nudges: Vec<TagNudge>,
    pub favorites: Vec<FavoritePick>,
    /// Subtracted once per earlier slot already using the same bucket.
    pub repeat_penalty: f64,
}

const BUCKET_WEIGHTS: &[(Bucket, f64, f64, f64)] = &[
    // (bucket, base, calm sea, windy)
    (Bucket::Beach, 3.0, 2.0, -2.5),
    (Bucket::Settlement, 2.0, 0.0, 0.5),
    (Bucket::Heritage, 2.0, 0.0, 1.0),
    (Bucket::Nature, 2.5, 0.5, -0.5),
    (Bucket::Other, 0.5, 0.0, 0.0),
];

const WEEKDAY_BOOSTS: &[(Weekday, Bucket, f64)] = &[
    (Weekday::Mon, Bucket::Nature, 0.5),
    (Weekday::Wed, Bucket::Settlement, 0.5),
    (Weekday::Fri, Bucket::Settlement, 1.0),
    (Weekday::Sat, Bucket::Beach, 1.0),
    (Weekday::Sun, Bucket::Beach, 1.5),
    (Weekday::Sun, Bucket::Heritage, 1.0),
];

const SLOT_BOOSTS: &[(Slot, Bucket, f64)] = &[
    (Slot::Morning, Bucket::Beach, 1.5),
    (Slot::Morning, Bucket::Nature, 1.0),
    (Slot::Midday, Bucket::Settlement, 1.5),
    (Slot::Midday, Bucket::Heritage, 1.0),
    (Slot::Late, Bucket::Beach, 1.0),
    (Slot::Late, Bucket::Nature, 0.5),
];

const TAG_NUDGES: &[(&str, f64, Option<Slot>, bool)] = &[
    ("beach", 0.5, None, true),
    ("praia", 0.5, None, true),
    ("dune", 1.0, Some(Slot::Morning), false),
    ("duna", 1.0, Some(Slot::Morning), false),
    ("turtle", 1.5, Some(Slot::Late), false),
    ("tartaruga", 1.5, Some(Slot::Late), false),
    ("heritage", 0.75, Some(Slot::Midday), false),
    ("patrimonio", 0.75, Some(Slot::Midday), false),
];

const FAVORITES: &[(&str, Slot, &[Weekday], f64)] = &[
    ("praia-de-santana", Slot::Morning, &[Weekday::Sat, Weekday::Sun], 2.0),
    ("salinas-porto-ingles", Slot::Late, &[], 1.5),
    ("vila-do-maio", Slot::Midday, &[], 1.0),
    ("igreja-nossa-senhora-da-luz", Slot::Midday, &[Weekday::Sun], 1.5),
];

impl Default for PlanWeights {
    fn default() -> Self {
        Self {
            buckets: BUCKET_WEIGHTS
                .iter()
                .map(|&(bucket, base, calm_sea, windy)| {
                    (
                        bucket,
                        BucketWeight {
                            base,
                            calm_sea,
                            windy,
                        },
                    )
                })
                .collect(),
            weekday_boosts: WEEKDAY_BOOSTS.to_vec(),
            slot_boosts: SLOT_BOOSTS.to_vec(),
            tag_nudges: TAG_NUDGES
                .iter()
                .map(|&(keyword, bonus, slot, needs_calm_sea)| TagNudge {
                    keyword: keyword.to_owned(),
                    bonus,
                    slot,
                    needs_calm_sea,
                })
                .collect(),
            favorites: FAVORITES
                .iter()
                .map(|&(id, slot, weekdays, bonus)| FavoritePick {
                    place_id: id.to_owned(),
                    slot,
                    weekdays: weekdays.to_vec(),
                    bonus,
                })
                .collect(),
            repeat_penalty: 2.0,
        }
    }
}

impl PlanWeights {
    /// Bucket weight under the given weather. Unlisted buckets weigh 0.
    #[must_use]
    pub fn bucket_weight(&self, bucket: Bucket, signals: &PlanSignals) -> f64 {
        self.buckets
            .iter()
            .find(|(b, _)| *b == bucket)
            .map_or(0.0, |(_, w)| {
                let mut weight = w.base;
                if signals.sea_calm {
                    weight += w.calm_sea;
                }
                if signals.windy {
                    weight += w.windy;
                }
                weight
            })
    }

    #[must_use]
    pub fn weekday_boost(&self, weekday: Weekday, bucket: Bucket) -> f64 {
        self.weekday_boosts
            .iter()
            .filter(|(d, b, _)| *d == weekday && *b == bucket)
            .map(|(_, _, boost)| boost)
            .sum()
    }

    #[must_use]
    pub fn slot_boost(&self, slot: Slot, bucket: Bucket) -> f64 {
        self.slot_boosts
            .iter()
            .filter(|(s, b, _)| *s == slot && *b == bucket)
            .map(|(_, _, boost)| boost)
            .sum()
    }

    /// Sum of the nudges whose keyword hits `words` and whose slot and sea
    /// conditions hold.
    #[must_use]
    pub fn tag_nudge(&self, words: &[String], slot: Slot, signals: &PlanSignals) -> f64 {
        self.tag_nudges
            .iter()
            .filter(|n| n.slot.is_none_or(|s| s == slot))
            .filter(|n| !n.needs_calm_sea || signals.sea_calm)
            .filter(|n| has_keyword(words, &n.keyword))
            .map(|n| n.bonus)
            .sum()
    }

    #[must_use]
    pub fn favorite_bonus(&self, place_id: &str, slot: Slot, weekday: Weekday) -> f64 {
        self.favorites
            .iter()
            .filter(|f| f.place_id == place_id && f.slot == slot)
            .filter(|f| f.weekdays.is_empty() || f.weekdays.contains(&weekday))
            .map(|f| f.bonus)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALM: PlanSignals = PlanSignals {
        sea_calm: true,
        windy: false,
        max_beach: 2,
    };
    const ROUGH: PlanSignals = PlanSignals {
        sea_calm: false,
        windy: true,
        max_beach: 1,
    };

    #[test]
    fn wind_makes_beaches_less_attractive_than_heritage() {
        let w = PlanWeights::default();
        assert!(w.bucket_weight(Bucket::Beach, &CALM) > w.bucket_weight(Bucket::Heritage, &CALM));
        assert!(w.bucket_weight(Bucket::Beach, &ROUGH) < w.bucket_weight(Bucket::Heritage, &ROUGH));
    }

    #[test]
    fn unlisted_bucket_weighs_zero() {
        let w = PlanWeights {
            buckets: Vec::new(),
            ..PlanWeights::default()
        };
        assert!(w.bucket_weight(Bucket::Beach, &CALM).abs() < f64::EPSILON);
    }

    #[test]
    fn slot_and_weekday_boosts_look_up_pairs() {
        let w = PlanWeights::default();
        assert!((w.slot_boost(Slot::Midday, Bucket::Settlement) - 1.5).abs() < 1e-9);
        assert!(w.slot_boost(Slot::Midday, Bucket::Beach).abs() < f64::EPSILON);
        assert!((w.weekday_boost(Weekday::Sun, Bucket::Beach) - 1.5).abs() < 1e-9);
        assert!(w.weekday_boost(Weekday::Tue, Bucket::Beach).abs() < f64::EPSILON);
    }

    #[test]
    fn tag_nudges_respect_slot_and_sea() {
        let w = PlanWeights::default();
        let turtles = vec!["turtles".to_owned()];
        assert!((w.tag_nudge(&turtles, Slot::Late, &CALM) - 1.5).abs() < 1e-9);
        assert!(w.tag_nudge(&turtles, Slot::Morning, &CALM).abs() < f64::EPSILON);

        let beach = vec!["beach".to_owned()];
        assert!((w.tag_nudge(&beach, Slot::Midday, &CALM) - 0.5).abs() < 1e-9);
        assert!(w.tag_nudge(&beach, Slot::Midday, &ROUGH).abs() < f64::EPSILON);
    }

    #[test]
    fn favorites_match_slot_and_day() {
        let w = PlanWeights::default();
        assert!((w.favorite_bonus("praia-de-santana", Slot::Morning, Weekday::Sun) - 2.0).abs() < 1e-9);
        assert!(w.favorite_bonus("praia-de-santana", Slot::Morning, Weekday::Tue).abs() < f64::EPSILON);
        assert!((w.favorite_bonus("vila-do-maio", Slot::Midday, Weekday::Tue) - 1.0).abs() < 1e-9);
        assert!(w.favorite_bonus("vila-do-maio", Slot::Late, Weekday::Tue).abs() < f64::EPSILON);
    }
}
