//! Frame-aware table locator.
//!
//! Polls a [`Document`] until a `<table>` whose class contains the marker
//! shows up, or the deadline passes. One polling cycle:
//!
//! 1. reset to the top-level document and search it; a hit there wins outright,
//! 2. otherwise probe each frame one level down, in order, switching back to
//!    the top after every probe,
//! 3. otherwise sleep one poll interval (capped at the time left) and go again.
//!
//! A probe that fails with a transient error (stale frame, unreadable
//! cross-origin document) is logged and skipped. The deadline is checked after
//! each cycle, so a zero timeout still gets one full scan. Running out of time
//! is the only way the locator gives up; it restores the top-level context
//! before reporting the timeout.

use std::time::Duration;

use crate::browser::Document;
use crate::core::Clock;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct LocateOptions<'a> {
    pub marker: &'a str,
    pub timeout: Duration,
    pub poll: Duration,
}

/// Where the table was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    TopLevel,
    Frame(usize),
}

/// A located table: its outer markup, captured inside the context it lives in.
#[derive(Clone, Debug)]
pub struct TableElement {
    pub markup: String,
    pub origin: Origin,
}

pub fn locate<D, C>(doc: &mut D, clock: &C, opts: &LocateOptions<'_>) -> Result<TableElement>
where
    D: Document + ?Sized,
    C: Clock + ?Sized,
{
    let started = clock.now();
    // A timeout too large to represent never expires.
    let deadline = started.checked_add(opts.timeout);
    let mut cycles = 0u32;

    loop {
        cycles += 1;
        if let Some(found) = scan(doc, opts.marker)? {
            logd!("Table '{}' found after {cycles} poll(s) at {:?}", opts.marker, found.origin);
            return Ok(found);
        }

        match deadline {
            Some(deadline) => {
                let now = clock.now();
                if now >= deadline {
                    break;
                }
                clock.sleep(opts.poll.min(deadline - now));
            }
            None => clock.sleep(opts.poll),
        }
    }

    restore_top(doc);
    Err(Error::LocatorTimeout {
        marker: s!(opts.marker),
        waited: clock.now() - started,
        cycles,
    })
}

/// One polling cycle. `Ok(None)` means "nothing yet, poll again".
fn scan<D: Document + ?Sized>(doc: &mut D, marker: &str) -> Result<Option<TableElement>> {
    match top_level(doc, marker) {
        Ok(Some(markup)) => return Ok(Some(TableElement { markup, origin: Origin::TopLevel })),
        Ok(None) => {}
        Err(e) if e.is_transient() => logw!("Top-level search failed: {e}"),
        Err(e) => return Err(e),
    }

    let frames = match doc.frames() {
        Ok(frames) => frames,
        Err(e) if e.is_transient() => {
            logw!("Could not list frames: {e}");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    for (idx, frame) in frames.iter().enumerate() {
        let probe = probe_frame(doc, frame, marker);
        restore_top(doc);
        match probe {
            Ok(Some(markup)) => {
                logf!("[*] Found {marker} table inside frame {idx}.");
                return Ok(Some(TableElement { markup, origin: Origin::Frame(idx) }));
            }
            Ok(None) => {}
            Err(e) if e.is_transient() => logw!("    Frame {idx} error: {e}"),
            Err(e) => return Err(e),
        }
    }

    Ok(None)
}

fn top_level<D: Document + ?Sized>(doc: &mut D, marker: &str) -> Result<Option<String>> {
    doc.switch_to_top()?;
    doc.find_marked(marker)
}

fn probe_frame<D: Document + ?Sized>(doc: &mut D, frame: &D::Frame, marker: &str) -> Result<Option<String>> {
    doc.switch_to_top()?;
    doc.switch_to_frame(frame)?;
    doc.find_marked(marker)
}

fn restore_top<D: Document + ?Sized>(doc: &mut D) {
    if let Err(e) = doc.switch_to_top() {
        logw!("Could not switch back to the top-level document: {e}");
    }
}
