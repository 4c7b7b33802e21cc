// src/browser/chrome.rs
// Headless Chrome behind the Document/Session traits.
//
// headless_chrome has no WebDriver-style frame switching, so the frame
// context is ours: searches run as page scripts against either `document`
// or `frames[i].contentDocument`. Cross-origin frames have no readable
// contentDocument and surface as FrameAccess errors.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;

use super::{Context, Document, Session};
use crate::config::BrowserOptions;
use crate::error::{Error, Result};

const FRAMES_EXPR: &str =
    "[...document.getElementsByTagName('iframe'), ...document.getElementsByTagName('frame')]";

// Idle transport timeout; the locator can sit between calls for a whole poll interval.
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

pub struct ChromeSession {
    // Dropping the Browser kills the Chrome process.
    browser: Option<Browser>,
    tab: Arc<Tab>,
    context: Context,
}

impl ChromeSession {
    pub fn launch(opts: &BrowserOptions) -> Result<Self> {
        let ua_arg = format!("--user-agent={}", opts.user_agent);
        let args: Vec<&OsStr> = vec![
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new(&ua_arg),
        ];

        let launch = LaunchOptions::default_builder()
            .headless(opts.headless)
            .sandbox(opts.sandbox)
            .window_size(Some(opts.window))
            .idle_browser_timeout(IDLE_TIMEOUT)
            .args(args)
            .build()
            .map_err(Error::browser)?;

        let browser = Browser::new(launch).map_err(Error::browser)?;
        let tab = browser.new_tab().map_err(Error::browser)?;
        logd!("Chrome launched (headless={}, window={:?})", opts.headless, opts.window);

        Ok(Self { browser: Some(browser), tab, context: Context::Top })
    }

    fn eval(&self, expr: &str) -> Result<Option<Value>> {
        let remote = self.tab.evaluate(expr, false).map_err(Error::browser)?;
        Ok(remote.value)
    }

    fn frame_count(&self) -> Result<usize> {
        let expr = format!("{FRAMES_EXPR}.length");
        let n = self.eval(&expr)?.and_then(|v| v.as_u64()).unwrap_or(0);
        Ok(n as usize)
    }
}

/// Page script returning `{"html": <outerHTML|null>}` or `{"error": <message>}` as a JSON string.
fn probe_script(context: Context, marker: &str) -> String {
    let selector = format!("table[class*={}]", Value::from(marker));
    let selector = Value::from(selector);
    let root = match context {
        Context::Top => s!("document"),
        Context::Frame(i) => format!(
            "(() => {{ const f = {FRAMES_EXPR}[{i}]; \
               if (!f) throw new Error('frame {i} is gone'); \
               if (!f.contentDocument) throw new Error('frame {i} is not readable'); \
               return f.contentDocument; }})()"
        ),
    };
    format!(
        "(() => {{ try {{ const el = {root}.querySelector({selector}); \
           return JSON.stringify({{ html: el ? el.outerHTML : null }}); }} \
         catch (e) {{ return JSON.stringify({{ error: String(e) }}); }} }})()"
    )
}

// XPath 1.0 has no upper-case().
fn xpath_upper(expr: &str) -> String {
    format!("translate({expr}, 'abcdefghijklmnopqrstuvwxyz', 'ABCDEFGHIJKLMNOPQRSTUVWXYZ')")
}

fn decode_probe(raw: Option<Value>, context: Context) -> Result<Option<String>> {
    let fail = |reason: String| match context {
        Context::Top => Error::Browser(reason),
        Context::Frame(index) => Error::FrameAccess { index, reason },
    };

    let text = match raw {
        Some(Value::String(s)) => s,
        other => return Err(fail(format!("unexpected probe result: {other:?}"))),
    };
    let parsed: Value = serde_json::from_str(&text).map_err(|e| fail(e.to_string()))?;
    if let Some(err) = parsed.get("error").and_then(Value::as_str) {
        return Err(fail(s!(err)));
    }
    Ok(parsed.get("html").and_then(Value::as_str).map(str::to_owned))
}

impl Document for ChromeSession {
    type Frame = usize;

    fn switch_to_top(&mut self) -> Result<()> {
        self.context = Context::Top;
        Ok(())
    }

    fn frames(&mut self) -> Result<Vec<usize>> {
        Ok((0..self.frame_count()?).collect())
    }

    fn switch_to_frame(&mut self, frame: &usize) -> Result<()> {
        self.context = Context::Frame(*frame);
        Ok(())
    }

    fn find_marked(&mut self, marker: &str) -> Result<Option<String>> {
        let context = self.context;
        let raw = self.eval(&probe_script(context, marker)).map_err(|e| match context {
            Context::Top => e,
            Context::Frame(index) => Error::FrameAccess { index, reason: e.to_string() },
        })?;
        decode_probe(raw, context)
    }
}

impl Session for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        logd!("Navigating to {url}");
        self.tab
            .navigate_to(url)
            .map_err(Error::browser)?
            .wait_until_navigated()
            .map_err(Error::browser)?;
        self.context = Context::Top;
        Ok(())
    }

    fn fill_input(&mut self, name: &str, value: &str, timeout: Duration) -> Result<()> {
        let by_name = format!("[name='{name}']");
        let element = match self.tab.wait_for_element_with_custom_timeout(&by_name, timeout) {
            Ok(el) => el,
            Err(_) => {
                let xpath = format!("//input[@name='{name}' or @id='{name}']");
                self.tab
                    .wait_for_xpath_with_custom_timeout(&xpath, timeout)
                    .map_err(|e| Error::Browser(format!("input '{name}' not found: {e}")))?
            }
        };

        // Some inputs refuse scripted clears; typing still works.
        if let Err(e) = element.call_js_fn("function() { this.value = ''; }", vec![], false) {
            logd!("Could not clear '{name}': {e}");
        }
        element.type_into(value).map_err(Error::browser)?;
        Ok(())
    }

    fn click_submit(&mut self, label: &str, timeout: Duration) -> Result<()> {
        let label = label.to_ascii_uppercase();
        let button = format!("//button[contains({}, '{label}')]", xpath_upper("normalize-space()"));
        match self.tab.wait_for_xpath_with_custom_timeout(&button, timeout) {
            Ok(el) => {
                el.click().map_err(Error::browser)?;
                return Ok(());
            }
            Err(e) => {
                loge!("Error: UI changes or page not loaded ({e}). Trying input controls.");
            }
        }

        let input = format!(
            "//input[(@type='button' or @type='submit') and contains({}, '{label}')]",
            xpath_upper("@value")
        );
        let el = self
            .tab
            .wait_for_xpath_with_custom_timeout(&input, timeout)
            .map_err(|e| Error::Browser(format!("no '{label}' control found: {e}")))?;
        el.click().map_err(Error::browser)?;
        Ok(())
    }

    fn close(&mut self) {
        if self.browser.is_none() {
            return;
        }
        if let Err(e) = self.tab.close(false) {
            logd!("Tab close failed: {e}");
        }
        self.browser = None;
        logd!("Chrome session closed");
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.close();
    }
}
