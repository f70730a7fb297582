use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a static bundle whose path from the
/// previous ISO week already exists.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStaticPolicy {
    /// stop saving, leaving the remaining files of the batch unprocessed
    #[default]
    AbortBatch,
    /// skip only the static bundle and keep saving the rest of the batch
    SkipStatic,
}
