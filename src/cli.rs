// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};

use crate::config::RunConfig;
use crate::config::consts::DEFAULT_OUT_FILE;
use crate::file::resolve_out_path;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "railgazer")]
#[command(version)]
#[command(about = "Pull the FOIS station-wise outstanding demand table into one xlsx sheet per Station From code", long_about = None)]
pub struct Args {
    /// Portal page to open
    #[arg(long)]
    pub url: Option<String>,

    /// Comma-separated Station From codes, in sheet order
    #[arg(short, long, value_name = "CODES", value_delimiter = ',')]
    pub codes: Option<Vec<String>>,

    /// Output workbook (a directory gets the default file name)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    /// Where to save the located table markup
    #[arg(long, value_name = "FILE")]
    pub debug_html: Option<PathBuf>,

    /// Division code typed into the search form
    #[arg(long)]
    pub division: Option<String>,

    /// Cluster typed into the search form
    #[arg(long)]
    pub cluster: Option<String>,

    /// Station typed into the search form
    #[arg(long)]
    pub station: Option<String>,

    /// Class substring identifying the data table
    #[arg(long)]
    pub marker: Option<String>,

    /// Seconds to keep looking for the table
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Milliseconds between table searches
    #[arg(long, value_name = "MS")]
    pub poll_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

impl Args {
    /// Defaults from `consts`, overridden by whatever was passed.
    pub fn into_config(self) -> color_eyre::Result<RunConfig> {
        let mut cfg = RunConfig::default();

        if let Some(url) = self.url { cfg.url = url; }
        if let Some(codes) = self.codes { cfg.set_codes(codes); }
        if let Some(out) = self.out {
            cfg.out_path = resolve_out_path(&out, DEFAULT_OUT_FILE).wrap_err("resolving --out")?;
        }
        if let Some(p) = self.debug_html { cfg.debug_html_path = Some(p); }
        for (label, value) in [("Division", self.division), ("Cluster", self.cluster), ("Station", self.station)] {
            if let Some(v) = value {
                cfg.set_form_value(label, &v);
            }
        }
        if let Some(m) = self.marker { cfg.marker = m; }
        if let Some(secs) = self.timeout { cfg.locate_timeout = Duration::from_secs(secs); }
        if let Some(ms) = self.poll_ms { cfg.poll_interval = Duration::from_millis(ms); }
        if self.headful { cfg.browser.headless = false; }

        cfg.validate().map_err(|e| eyre!(e))?;
        Ok(cfg)
    }
}

/// Prints per-code lines to stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, code: &str, rows: usize) {
        self.done += 1;
        println!("[{}/{}] {code}: {rows} row(s)", self.done, self.total);
    }
}

/// Parse args, run, print the outcome once. The caller only sets the exit status.
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    crate::log::init();

    let result = Args::parse().into_config().and_then(|cfg| {
        println!("SDTD welcomes you to RailGazer!\n");
        let mut progress = ConsoleProgress::default();
        runner::run(&cfg, Some(&mut progress)).map_err(|e| eyre!(e))
    });

    write_outcome(&mut io::stdout().lock(), &result).wrap_err("writing to stdout")?;
    result.map(|_| ())
}

/// Summary lines or a single `ERROR:` line, then the farewell banner.
fn write_outcome<W: Write>(out: &mut W, result: &color_eyre::Result<RunSummary>) -> io::Result<()> {
    match result {
        Ok(summary) => {
            writeln!(
                out,
                "Table: {} row(s), found at {:?} ({:?})",
                summary.total_rows, summary.origin, summary.choice
            )?;
            writeln!(out, "Markup saved to {}", summary.debug_markup.display())?;
            writeln!(out, "Wrote {}", summary.workbook.display())?;
        }
        Err(e) => writeln!(out, "ERROR: {e:?}")?,
    }
    writeln!(out, "Thank you for using RailGazer - Team SDTD")
}
