// src/progress.rs
/// Progress reporting for a run. The CLI prints lines; library callers can
/// pass `None` or `NullProgress`.
pub trait Progress {
    /// Called once the table is parsed, with the number of codes to render.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One code's sheet is rendered.
    fn item_done(&mut self, _code: &str, _rows: usize) {}

    /// Called at the end of the per-code loop.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
