use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::grid::Score;
use crate::error::Result;

const SCORES_FILE_NAME: &str = ".term2048.scores";

/// ScoreStore keeps the best score as a plain base-10 integer in a single file.
#[derive(Clone, Debug)]
pub(crate) struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store in the user's home directory, or the working directory when `HOME` is unset.
    pub(crate) fn user_default() -> Self {
        let dir = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(SCORES_FILE_NAME))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Load the best score. A missing, unreadable or malformed file counts as no best score.
    pub(crate) fn load(&self) -> Score {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return 0,
            Err(e) => {
                log::warn!("unable to read {}: {}", self.path.display(), e);
                return 0;
            }
        };
        let first_line = contents.lines().next().unwrap_or("").trim();
        match first_line.parse::<Score>() {
            Ok(score) => score,
            Err(e) => {
                log::warn!(
                    "ignoring malformed best score {:?} in {}: {}",
                    first_line,
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    pub(crate) fn save(&self, best: Score) -> Result<()> {
        fs::write(&self.path, best.to_string())?;
        log::debug!("saved best score {} to {}", best, self.path.display());
        Ok(())
    }
}
