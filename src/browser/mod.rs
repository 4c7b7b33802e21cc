//! # Browser-session seam
//!
//! The extraction core never talks to Chrome directly. It works against two
//! traits:
//!
//! - [`Document`]: a live, possibly framed page that can be searched for a
//!   marker-classed `<table>`. This is all the locator needs.
//! - [`Session`]: a `Document` that can also navigate, fill the search form
//!   and be torn down. This is what the runner drives.
//!
//! [`chrome::ChromeSession`] is the headless Chrome implementation. Tests plug
//! in scripted fakes.
//!
//! ## Search contexts
//! Like a WebDriver session, a `Document` has one *current context*: the
//! top-level document or one frame directly below it. `find_marked` searches
//! the current context only; callers switch explicitly and are expected to
//! switch back to the top when done.

use std::time::Duration;

use crate::error::Result;

pub mod chrome;

pub use chrome::ChromeSession;

/// Current search context of a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    Top,
    Frame(usize),
}

pub trait Document {
    /// Handle to a frame embedded directly in the top-level document.
    type Frame;

    fn switch_to_top(&mut self) -> Result<()>;

    /// Frames one level below the top, `iframe`s first, then `frame`s, each in document order.
    fn frames(&mut self) -> Result<Vec<Self::Frame>>;

    fn switch_to_frame(&mut self, frame: &Self::Frame) -> Result<()>;

    /// Outer markup of the first `<table>` in the current context whose class
    /// attribute contains `marker`.
    fn find_marked(&mut self, marker: &str) -> Result<Option<String>>;
}

pub trait Session: Document {
    /// Load `url` and wait for navigation to settle.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Wait for the input named `name`, clear it and type `value`.
    fn fill_input(&mut self, name: &str, value: &str, timeout: Duration) -> Result<()>;

    /// Wait for a clickable control whose caption contains `label` and click it.
    fn click_submit(&mut self, label: &str, timeout: Duration) -> Result<()>;

    /// Tear the session down. Safe to call more than once.
    fn close(&mut self);
}
