/// Crate-wide result type.
///
/// Domain failures are raised as [`crate::shared::error::AnalysisError`] and
/// carried through `anyhow` so callers can attach context with `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
