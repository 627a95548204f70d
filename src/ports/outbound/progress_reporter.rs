/// ProgressReporter port for user-facing diagnostics
///
/// This is the only logging channel of the application. Informational
/// messages go through `report`, warnings and errors through `report_error`.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports progress of a long-running scan
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total expected items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports successful completion of an operation
    fn report_completion(&self, message: &str);
}
