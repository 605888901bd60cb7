mod groups;
mod stats;

pub use groups::{GroupMember, KeywordGroup, aggregate};
pub use stats::{Stats, Weighted, weight_or_zero};
