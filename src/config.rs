#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    /// Trace verbosity: 0 = silent, 1 = request lines, 2+ = full bodies.
    pub verbose: u8,
}
