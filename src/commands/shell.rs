// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runs address book commands against the data file, either one line at a
//! time from the command line or as an interactive session.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Command, CommandResult, help_text};
use crate::book::Model;
use crate::config::Config;
use crate::parser::parse_command;
use crate::storage;
use crate::utils::person_table;

pub const WELCOME: &str = "Welcome to ClassConnect! Type 'help' for the list of commands.";

/// A loaded address book bound to the file it is saved to.
pub struct Session {
    model: Model,
    path: PathBuf,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        let book = storage::load(path)?;
        Ok(Session {
            model: Model::new(book),
            path: path.to_path_buf(),
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses and runs one line, saving afterwards if it changed the book.
    pub fn execute(&mut self, line: &str) -> Result<CommandResult> {
        let command = parse_command(line)?;
        self.apply(&command)
    }

    fn apply(&mut self, command: &Command) -> Result<CommandResult> {
        let result = command.execute(&mut self.model)?;
        debug!("Feedback: {}", result.feedback);
        if command.mutates() {
            storage::save(&self.path, self.model.book())
                .context("Could not save data to file")?;
        }
        Ok(result)
    }

    fn render<W: Write>(&self, command: &Command, result: &CommandResult, out: &mut W) -> Result<()> {
        writeln!(out, "{}", result.feedback)?;
        if result.show_help {
            writeln!(out, "{}", help_text())?;
        }
        let shown = self.model.displayed();
        if command.shows_list() && !shown.is_empty() {
            writeln!(out, "{}", person_table(self.model.book(), &shown))?;
        }
        Ok(())
    }

    /// Runs one line and writes the reply. Command errors are written too,
    /// leaving the session usable. Returns whether the session should end.
    pub fn respond<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let outcome = parse_command(line)
            .map_err(anyhow::Error::from)
            .and_then(|command| self.apply(&command).map(|r| (command, r)));
        match outcome {
            Ok((command, result)) => {
                self.render(&command, &result, out)?;
                Ok(result.exit)
            }
            Err(e) => {
                warn!("Command failed: {:#}", e);
                writeln!(out, "{:#}", e)?;
                Ok(false)
            }
        }
    }
}

/// Reads commands until `exit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "{}", WELCOME)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if session.respond(&line, out)? {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn interactive(config: &Config) -> Result<()> {
    let mut session = Session::open(&config.data_path)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(&mut session, stdin.lock(), &mut stdout)
}

/// Runs a single command given on the command line.
pub fn exec(config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let line = sub
        .get_many::<String>("line")
        .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let mut session = Session::open(&config.data_path)?;
    let command = parse_command(&line)?;
    let result = session.apply(&command)?;
    session.render(&command, &result, &mut io::stdout())
}
