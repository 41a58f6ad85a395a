//! Interactive session shell.
//!
//! One `Viewer` lives for the whole shell, so the cached series and the SMA
//! toggle persist between commands. Each command runs to completion before
//! the next line is read.

use std::io::{BufRead, Write};

use anyhow::Result;
use pricelens_core::Viewer;

use crate::render;

const HELP: &str = "\
Commands:
  fetch <SYMBOL> [DAYS]   fetch a series (DAYS defaults to the current lookback)
  days <N>                set the lookback used by `fetch`
  sma on|off              show or hide the SMA curve on the chart
  table                   print the cached series as a table
  chart                   print the chart curves
  suggest <NAME>          look up a ticker by company name
  export <PATH>           preview the last rows and write CSV after confirming
  help                    show this help
  quit                    leave the session";

pub struct Shell<'v, 'a> {
    viewer: &'v mut Viewer<'a>,
    lookback_days: i64,
    lookback_choices: Vec<u32>,
}

impl<'v, 'a> Shell<'v, 'a> {
    pub fn new(viewer: &'v mut Viewer<'a>, lookback_days: u32, lookback_choices: Vec<u32>) -> Self {
        Self {
            viewer,
            lookback_days: i64::from(lookback_days),
            lookback_choices,
        }
    }

    /// Read commands from `input` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "PriceLens session. Type `help` for commands.")?;
        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let words: Vec<&str> = line.split_whitespace().collect();
            let Some((&cmd, args)) = words.split_first() else {
                continue;
            };
            match cmd {
                "quit" | "exit" => break,
                "help" => writeln!(out, "{HELP}")?,
                "fetch" => self.fetch(args, out)?,
                "days" => self.days(args, out)?,
                "sma" => self.sma(args, out)?,
                "table" => self.table(out)?,
                "chart" => self.chart(out)?,
                "suggest" => self.suggest(args, out)?,
                "export" => self.export(args, &mut input, out)?,
                other => writeln!(out, "unknown command '{other}' (try `help`)")?,
            }
        }
        Ok(())
    }

    fn fetch<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let Some(symbol) = args.first() else {
            writeln!(out, "usage: fetch <SYMBOL> [DAYS]")?;
            return Ok(());
        };
        let days = match args.get(1) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(d) => d,
                Err(_) => {
                    writeln!(out, "days must be a whole number, got '{raw}'")?;
                    return Ok(());
                }
            },
            None => self.lookback_days,
        };
        let window = self.viewer.sma_window();
        match self.viewer.fetch(symbol, days) {
            Ok(series) => writeln!(
                out,
                "Fetched {} rows for {} ({} with SMA-{window})",
                series.len(),
                series.symbol(),
                series.defined_sma_count(),
            )?,
            Err(e) => {
                writeln!(out, "{}", render::error(&e))?;
                return Ok(());
            }
        }
        self.table(out)?;
        self.chart(out)
    }

    fn days<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        match args.first().and_then(|raw| raw.parse::<i64>().ok()) {
            Some(d) if d > 0 => {
                self.lookback_days = d;
                let offered = u32::try_from(d)
                    .map(|d| self.lookback_choices.contains(&d))
                    .unwrap_or(false);
                if offered {
                    writeln!(out, "Lookback set to {d} days")?;
                } else {
                    writeln!(
                        out,
                        "Lookback set to {d} days (usual choices: {:?})",
                        self.lookback_choices
                    )?;
                }
            }
            _ => writeln!(out, "usage: days <N> with N > 0")?,
        }
        Ok(())
    }

    fn sma<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let visible = match args.first().copied() {
            Some("on") => true,
            Some("off") => false,
            _ => {
                writeln!(out, "usage: sma on|off")?;
                return Ok(());
            }
        };
        self.viewer.set_signal_visible(visible);
        writeln!(
            out,
            "SMA-{} {}",
            self.viewer.sma_window(),
            if visible { "shown" } else { "hidden" }
        )?;
        // redraw from the cached series; never refetch
        if self.viewer.current().is_some() {
            self.chart(out)?;
        }
        Ok(())
    }

    fn table<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.viewer.table() {
            Some(rows) => write!(out, "{}", render::table(&rows))?,
            None => writeln!(out, "Nothing to show yet; fetch a symbol first.")?,
        }
        Ok(())
    }

    fn chart<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.viewer.chart() {
            Some(spec) => write!(out, "{}", render::chart(&spec))?,
            None => writeln!(out, "Nothing to show yet; fetch a symbol first.")?,
        }
        Ok(())
    }

    fn suggest<W: Write>(&self, args: &[&str], out: &mut W) -> Result<()> {
        let query = args.join(" ");
        match self.viewer.suggest(&query) {
            Some(sym) => writeln!(out, "{query} -> {sym}")?,
            None => writeln!(out, "no suggestion for '{query}'")?,
        }
        Ok(())
    }

    fn export<R: BufRead, W: Write>(
        &self,
        args: &[&str],
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        let Some(path) = args.first() else {
            writeln!(out, "usage: export <PATH>")?;
            return Ok(());
        };
        let pending = match self.viewer.prepare_export() {
            Ok(p) => p,
            Err(e) => {
                writeln!(out, "{}", render::error(&e))?;
                return Ok(());
            }
        };

        writeln!(out, "Export the following data?")?;
        write!(out, "{}", render::preview(pending.preview()))?;
        write!(out, "Write {} rows to {path}? [y/N] ", pending.row_count())?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            writeln!(out, "Export cancelled.")?;
            return Ok(());
        }

        match pending.confirm_to_path(std::path::Path::new(path)) {
            Ok(rows) => writeln!(out, "Exported {rows} rows to {path}")?,
            Err(e) => writeln!(out, "{}", render::error(&e))?,
        }
        Ok(())
    }
}
