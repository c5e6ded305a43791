//! Session driver: one pass over the input lines.
//!
//! The session owns the counters, the directive state and the record
//! ordinal. Lines are processed strictly in order and every rendered line is
//! written to the output as soon as it is produced.

use crate::directive::{DirectiveError, DirectiveProcessor};
use crate::line_classifier::{FreeTextKind, LineClassifier, LineKind};
use crate::record_counter::{CounterSeed, CounterSet};
use crate::render::{BattleRecordRenderer, render_date, render_free_text, render_summary};
use crate::resume::ResumeState;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Inputs seeding a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Start in 12-field scoring mode.
    pub scoring_mode: bool,
    /// Echo input lines and dump record tokens.
    pub debug: bool,
    /// Year used to compute weekdays of date markers.
    pub reference_year: i32,
    /// Initial counter values.
    pub seed: CounterSeed,
    /// Where to write resume directives at the end of a scoring-mode run.
    /// `None` disables the sidecar.
    pub sidecar_path: Option<PathBuf>,
}

/// Session errors. All of them end the run.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("line {line_number}: {source}")]
    Directive {
        line_number: u64,
        source: DirectiveError,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),

    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write resume directives to {}: {source}", .path.display())]
    Sidecar { path: PathBuf, source: io::Error },
}

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub lines_read: u64,
    pub records: usize,
    pub scoring_mode: bool,
    /// Resume state, present only for scoring-mode runs.
    pub resume: Option<ResumeState>,
}

/// Stateful formatter for one input stream (possibly many files).
pub struct Session {
    options: SessionOptions,
    scoring_mode: bool,
    counters: CounterSet,
    classifier: LineClassifier,
    renderer: BattleRecordRenderer,
    directives: DirectiveProcessor,
    lines_read: u64,
    records: usize,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self::with_renderer(options, BattleRecordRenderer::default())
    }

    /// Creates a session with a custom renderer (e.g. different faction rules).
    pub fn with_renderer(options: SessionOptions, renderer: BattleRecordRenderer) -> Self {
        debug!(
            scoring_mode = options.scoring_mode,
            seed = %options.seed,
            year = options.reference_year,
            "Starting session"
        );
        Self {
            scoring_mode: options.scoring_mode,
            counters: CounterSet::from_seed(&options.seed),
            classifier: LineClassifier::new(),
            renderer,
            directives: DirectiveProcessor::new(),
            lines_read: 0,
            records: 0,
            options,
        }
    }

    pub fn counters(&self) -> &CounterSet {
        &self.counters
    }

    pub fn scoring_mode(&self) -> bool {
        self.scoring_mode
    }

    pub fn directives_active(&self) -> bool {
        self.directives.is_active()
    }

    /// Processes every line of a reader.
    pub fn process_reader<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<(), SessionError> {
        for line in reader.lines() {
            let line = line.map_err(SessionError::Input)?;
            self.process_line(&line, out)?;
        }
        Ok(())
    }

    /// Processes one line (without its terminator).
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), SessionError> {
        self.lines_read += 1;
        if self.options.debug {
            writeln!(out, "[{:4}]\t{}", self.lines_read, line)?;
        }

        let classified = self.classifier.classify(line, self.scoring_mode);

        let kind = match classified.kind {
            LineKind::Directive(directive) => {
                self.directives
                    .apply(&directive, &mut self.scoring_mode, &mut self.counters)
                    .map_err(|source| SessionError::Directive {
                        line_number: self.lines_read,
                        source,
                    })?;
                return Ok(());
            }
            kind => kind,
        };

        self.directives.observe(line);

        match kind {
            LineKind::Directive(_) => {}
            LineKind::BattleRecord(record) => {
                self.records += 1;
                let rendered = self.renderer.render(
                    self.records,
                    &record,
                    classified.card,
                    self.scoring_mode,
                    self.options.debug,
                    &mut self.counters,
                );
                write_lines(out, &rendered.lines)?;
            }
            LineKind::DateMarker { month, day } => {
                match render_date(month, day, self.options.reference_year) {
                    Some(banner) => write_lines(out, &banner)?,
                    None => {
                        warn!(
                            line_number = self.lines_read,
                            month,
                            day,
                            year = self.options.reference_year,
                            "Date marker is not a calendar date, treating as memo"
                        );
                        let kind = FreeTextKind::of(&classified.text);
                        if let Some(text) = render_free_text(kind, &classified.text) {
                            writeln!(out, "{text}")?;
                        }
                    }
                }
            }
            LineKind::FreeText(kind) => {
                if let Some(text) = render_free_text(kind, &classified.text) {
                    writeln!(out, "{text}")?;
                }
            }
        }
        Ok(())
    }

    /// Ends the session.
    ///
    /// In scoring mode this writes the four-counter summary and the resume
    /// sidecar (when a sidecar path is configured).
    pub fn finish<W: Write>(self, out: &mut W) -> Result<SessionReport, SessionError> {
        let resume = if self.scoring_mode {
            write_lines(out, &render_summary(&self.counters))?;
            let state = ResumeState::from_counters(&self.counters);
            if let Some(path) = &self.options.sidecar_path {
                state.write(path).map_err(|source| SessionError::Sidecar {
                    path: path.clone(),
                    source,
                })?;
            }
            Some(state)
        } else {
            None
        };
        out.flush()?;

        info!(
            lines = self.lines_read,
            records = self.records,
            scoring_mode = self.scoring_mode,
            "Session finished"
        );

        Ok(SessionReport {
            lines_read: self.lines_read,
            records: self.records,
            scoring_mode: self.scoring_mode,
            resume,
        })
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
