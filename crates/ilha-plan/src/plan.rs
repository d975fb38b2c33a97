//! Greedy three-slot day plan.

use chrono::Weekday;
use ilha_core::{Lang, MarineConditions, Place};
use serde::Serialize;

use crate::bucket::{classify, keywords, Bucket};
use crate::weights::PlanWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Midday,
    Late,
}

impl Slot {
    /// Fill order.
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Midday, Slot::Late];

    #[must_use]
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Slot::Morning, Lang::Pt) => "Manhã",
            (Slot::Midday, Lang::Pt) => "Meio-dia",
            (Slot::Late, Lang::Pt) => "Fim da tarde",
            (Slot::Morning, Lang::En) => "Morning",
            (Slot::Midday, Lang::En) => "Midday",
            (Slot::Late, Lang::En) => "Late afternoon",
        }
    }
}

/// Weather signals the scoring reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSignals {
    pub sea_calm: bool,
    pub windy: bool,
    /// Most beach picks allowed in one plan.
    pub max_beach: usize,
}

impl From<&MarineConditions> for PlanSignals {
    fn from(conditions: &MarineConditions) -> Self {
        let windy = conditions.windy();
        Self {
            sea_calm: conditions.sea_calm(),
            windy,
            max_beach: if windy { 1 } else { 2 },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanSlot<'p> {
    pub slot: Slot,
    pub label: &'static str,
    pub bucket: Bucket,
    pub score: f64,
    pub spot: &'p Place,
}

struct Candidate<'p> {
    place: &'p Place,
    bucket: Bucket,
    words: Vec<String>,
}

/// Picks one place per slot, morning first.
///
/// Each slot takes the highest-scoring place not used yet. A place loses
/// `repeat_penalty` for every earlier pick in its bucket, and beaches stop
/// being eligible once `max_beach` of them are in the plan. Equal scores keep
/// input order. Slots with no eligible place are left out, and places with an
/// empty id are never picked.
#[must_use]
pub fn build_today_plan<'p>(
    places: &'p [Place],
    conditions: &MarineConditions,
    lang: Lang,
    weekday: Weekday,
    weights: &PlanWeights,
) -> Vec<PlanSlot<'p>> {
    let signals = PlanSignals::from(conditions);
    let candidates: Vec<Candidate<'p>> = places
        .iter()
        .filter(|p| !p.id.trim().is_empty())
        .map(|place| Candidate {
            place,
            bucket: classify(place),
            words: keywords(place),
        })
        .collect();

    let mut used = vec![false; candidates.len()];
    let mut plan: Vec<PlanSlot<'p>> = Vec::with_capacity(Slot::ALL.len());

    for slot in Slot::ALL {
        let beaches = plan.iter().filter(|s| s.bucket == Bucket::Beach).count();
        let mut winner: Option<(usize, f64)> = None;

        for (idx, candidate) in candidates.iter().enumerate() {
            if used[idx] || plan.iter().any(|s| s.spot.id == candidate.place.id) {
                continue;
            }
            if candidate.bucket == Bucket::Beach && beaches >= signals.max_beach {
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let repeats = plan.iter().filter(|s| s.bucket == candidate.bucket).count() as f64;
            let score = weights.bucket_weight(candidate.bucket, &signals)
                + weights.weekday_boost(weekday, candidate.bucket)
                + weights.slot_boost(slot, candidate.bucket)
                + weights.tag_nudge(&candidate.words, slot, &signals)
                + weights.favorite_bonus(&candidate.place.id, slot, weekday)
                - weights.repeat_penalty * repeats;

            if winner.is_none_or(|(_, best)| score > best) {
                winner = Some((idx, score));
            }
        }

        let Some((idx, score)) = winner else {
            tracing::debug!(slot = ?slot, "no eligible place for slot");
            continue;
        };
        used[idx] = true;
        let candidate = &candidates[idx];
        plan.push(PlanSlot {
            slot,
            label: slot.label(lang),
            bucket: candidate.bucket,
            score,
            spot: candidate.place,
        });
    }

    tracing::debug!(
        picks = plan.len(),
        sea_calm = signals.sea_calm,
        windy = signals.windy,
        "built today plan"
    );
    plan
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
