//! Resume verdicts.

use serde::{Deserialize, Serialize};

/// What a re-run on an existing item directory should do.
///
/// Derived fresh from on-disk state on every run; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeVerdict {
    /// Existing tracks are valid; skip all work.
    Skip,
    /// Raw sources are present but tracks are missing or invalid;
    /// re-run segmentation only.
    NeedsSplitOnly,
    /// No raw sources on disk; everything has to be fetched and processed.
    NeedsFullProcessing,
}
