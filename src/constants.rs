use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Upper bound on the asset-tree walk. Post assets live in shallow
/// directories, so reaching this depth indicates a malformed tree upstream
/// rather than legitimate content.
pub const MAX_ASSET_TREE_DEPTH: usize = 16;
