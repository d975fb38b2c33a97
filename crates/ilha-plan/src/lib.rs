//! Today-plan recommender: ranks places into a morning, midday and late-day
//! itinerary from the current sea and wind readings.

pub mod bucket;
pub mod plan;
pub mod weights;

pub use bucket::{classify, Bucket};
pub use plan::{build_today_plan, PlanSignals, PlanSlot, Slot};
pub use weights::{BucketWeight, FavoritePick, PlanWeights, TagNudge};
