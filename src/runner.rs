// src/runner.rs
use std::path::PathBuf;

use crate::{
    browser::{ChromeSession, Session},
    config::RunConfig,
    core::{Clock, SystemClock},
    data::DataSet,
    error::Result,
    file,
    locate::{self, LocateOptions, Origin},
    partition,
    progress::Progress,
    table::{self, TableChoice},
    workbook::WorkbookWriter,
};

/// One rendered sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSummary {
    pub code: String,
    pub sheet: String,
    pub rows: usize,
}

/// What a run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub workbook: PathBuf,
    pub debug_markup: PathBuf,
    pub origin: Origin,
    pub choice: TableChoice,
    /// Rows in the full parsed table.
    pub total_rows: usize,
    pub sheets: Vec<SheetSummary>,
}

/// Top-level runner: launch headless Chrome, run, always tear the browser down.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(cfg: &RunConfig, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    cfg.validate()?;
    let mut session = ChromeSession::launch(&cfg.browser)?;
    let result = run_with(&mut session, &SystemClock, cfg, progress);
    session.close();
    result
}

/// The whole pipeline against any session and clock:
/// navigate → submit form → locate → dump markup → parse → per code: filter → render → save.
pub fn run_with<S, C>(
    session: &mut S,
    clock: &C,
    cfg: &RunConfig,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary>
where
    S: Session + ?Sized,
    C: Clock + ?Sized,
{
    cfg.validate()?;

    say(&mut progress, &format!("Opening {}", cfg.url));
    session.navigate(&cfg.url)?;
    clock.sleep(cfg.nav_settle);

    submit_search(session, clock, cfg)?;

    say(&mut progress, &format!("Waiting for the '{}' table…", cfg.marker));
    let opts = LocateOptions {
        marker: &cfg.marker,
        timeout: cfg.locate_timeout,
        poll: cfg.poll_interval,
    };
    let found = locate::locate(session, clock, &opts)?;

    let debug_markup = file::write_debug_markup(&cfg.debug_path(), &found.markup)?;

    let parsed = table::parse(&found.markup, &cfg.key_hint)?;
    if parsed.choice == TableChoice::Fallback {
        say(&mut progress, &format!("Warning: no '{}' column found; using the first table", cfg.key_hint));
    }
    let total_rows = parsed.dataset.len();
    logf!("Parsed table: {} columns, {} rows", parsed.dataset.width(), total_rows);

    let (workbook, sheets) = export_partitions(&parsed.dataset, cfg, progress)?;

    Ok(RunSummary {
        workbook,
        debug_markup,
        origin: found.origin,
        choice: parsed.choice,
        total_rows,
        sheets,
    })
}

/// Filter `ds` per configured code (in order), render one sheet each, save the workbook.
/// A missing key column fails before anything is written.
pub fn export_partitions(
    ds: &DataSet,
    cfg: &RunConfig,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(PathBuf, Vec<SheetSummary>)> {
    partition::key_column(ds, &cfg.key_hint)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(cfg.codes.len());
    }

    let mut book = WorkbookWriter::new();
    let mut sheets = Vec::with_capacity(cfg.codes.len());
    for code in &cfg.codes {
        let part = partition::filter(ds, &cfg.key_hint, code)?;
        let sheet = book.render(code, &part)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(code, part.len());
        }
        sheets.push(SheetSummary { code: code.clone(), sheet, rows: part.len() });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let path = book.save(&cfg.out_path)?;
    logf!("Wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok((path, sheets))
}

fn submit_search<S, C>(session: &mut S, clock: &C, cfg: &RunConfig) -> Result<()>
where
    S: Session + ?Sized,
    C: Clock + ?Sized,
{
    for field in &cfg.form {
        session.fill_input(&field.name, &field.value, cfg.wait_timeout)?;
        logd!("{} ({}) = {}", field.label, field.name, field.value);
    }
    clock.sleep(cfg.form_settle);
    session.click_submit(&cfg.submit_label, cfg.wait_timeout)
}

fn say(progress: &mut Option<&mut dyn Progress>, msg: &str) {
    logd!("{msg}");
    if let Some(p) = progress.as_deref_mut() {
        p.log(msg);
    }
}
