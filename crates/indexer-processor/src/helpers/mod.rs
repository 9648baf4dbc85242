//! Pure derivations shared by the reducers. Functions here compute new
//! entity values from old ones; the few that touch the store only read,
//! or write the single row they are named after.

pub mod correlation;
pub mod global_stats;
pub mod holdings;
pub mod monster;
pub mod trader;
