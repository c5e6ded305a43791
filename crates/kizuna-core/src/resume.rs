//! Resume-state sidecar.
//!
//! At the end of a scoring-mode run the final tallies are written as two
//! directive lines, so the file can be passed as the first input of the next
//! run:
//! ```text
//! # pragma event
//! # pragma wld 2,6,0,25,21,4,11,8,1,8,10,0
//! ```

use crate::record_counter::{CounterSeed, CounterSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Default sidecar file name, relative to the working directory.
pub const DEFAULT_SIDECAR_PATH: &str = "kizuna_pragma_tmp.txt";

/// Final counter state of a scoring-mode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeState {
    seed: CounterSeed,
}

impl ResumeState {
    pub fn from_counters(counters: &CounterSet) -> Self {
        Self {
            seed: counters.seed(),
        }
    }

    pub fn seed(&self) -> &CounterSeed {
        &self.seed
    }

    /// The sidecar contents: an `event` directive and a `wld` directive.
    pub fn render(&self) -> String {
        format!("# pragma event\n# pragma wld {}\n", self.seed)
    }

    /// Writes the sidecar, replacing any existing file.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())?;
        info!(path = %path.display(), counts = %self.seed, "Wrote resume directives");
        Ok(())
    }
}
