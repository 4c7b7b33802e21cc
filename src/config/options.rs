// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::core::sanitize::normalize_key;
use crate::error::{Error, Result};

/// One text input on the portal's search form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(label: &str, name: &str, value: &str) -> Self {
        Self { label: s!(label), name: s!(name), value: s!(value) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    pub sandbox: bool,
    pub window: (u32, u32),
    pub user_agent: String,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            window: WINDOW_SIZE,
            user_agent: s!(USER_AGENT),
        }
    }
}

/// Everything one extraction run needs. Defaults mirror `consts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    /// Station From codes; order is sheet order.
    pub codes: Vec<String>,
    pub out_path: PathBuf,
    /// `None` → `DEFAULT_DEBUG_FILE` next to the workbook.
    pub debug_html_path: Option<PathBuf>,
    pub marker: String,
    pub key_hint: String,
    pub locate_timeout: Duration,
    pub poll_interval: Duration,
    /// Presence/clickability waits on the search form.
    pub wait_timeout: Duration,
    pub nav_settle: Duration,
    pub form_settle: Duration,
    pub form: Vec<FormField>,
    pub submit_label: String,
    pub browser: BrowserOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: s!(FOIS_URL),
            codes: STATION_FROM_CODES.iter().map(|c| s!(*c)).collect(),
            out_path: PathBuf::from(DEFAULT_OUT_FILE),
            debug_html_path: None,
            marker: s!(TABLE_MARKER),
            key_hint: s!(KEY_HINT),
            locate_timeout: Duration::from_secs(LOCATE_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            wait_timeout: Duration::from_secs(WAIT_TIMEOUT_SECS),
            nav_settle: Duration::from_millis(NAV_SETTLE_MS),
            form_settle: Duration::from_millis(FORM_SETTLE_MS),
            form: FORM_FIELDS
                .iter()
                .map(|(label, name, value)| FormField::new(label, name, value))
                .collect(),
            submit_label: s!(SUBMIT_LABEL),
            browser: BrowserOptions::default(),
        }
    }
}

impl RunConfig {
    /// Replace the code list. Codes are normalized (uppercase, trimmed);
    /// empties and repeats are dropped, first occurrence keeps its slot.
    pub fn set_codes<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = normalize_key(code.as_ref());
            if !code.is_empty() && !out.contains(&code) {
                out.push(code);
            }
        }
        self.codes = out;
    }

    /// Set a form input's value by input name or label (case-insensitive on the label).
    pub fn set_form_value(&mut self, key: &str, value: &str) -> bool {
        match self
            .form
            .iter_mut()
            .find(|f| f.name == key || f.label.eq_ignore_ascii_case(key))
        {
            Some(field) => {
                field.value = s!(value);
                true
            }
            None => false,
        }
    }

    pub fn debug_path(&self) -> PathBuf {
        match &self.debug_html_path {
            Some(p) => p.clone(),
            None => sibling(&self.out_path, DEFAULT_DEBUG_FILE),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.codes.is_empty() {
            return Err(Error::Config(s!("no Station From codes configured")));
        }
        if self.marker.trim().is_empty() {
            return Err(Error::Config(s!("table marker is empty")));
        }
        if self.key_hint.trim().is_empty() {
            return Err(Error::Config(s!("key column hint is empty")));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::Config(s!("poll interval must be above zero")));
        }
        Ok(())
    }
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
