//! Prompter adapters for the single confirm point.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use strata_core::application::ApplicationError;
use strata_core::application::ports::Prompter;
use strata_core::error::StrataResult;

/// Always answers the same way, without recording anything.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm {
    answer: bool,
}

impl AutoConfirm {
    pub fn yes() -> Self {
        Self { answer: true }
    }

    pub fn no() -> Self {
        Self { answer: false }
    }
}

impl Prompter for AutoConfirm {
    fn confirm_overwrite(&self, _path: &Path) -> StrataResult<bool> {
        Ok(self.answer)
    }
}

/// Replays a scripted sequence of answers and records what was asked.
///
/// An exhausted script answers `false`, the conservative choice.
#[derive(Debug, Clone)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<bool>>>,
    asked: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Paths the pipeline asked about (testing helper).
    pub fn prompts(&self) -> Vec<PathBuf> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm_overwrite(&self, path: &Path) -> StrataResult<bool> {
        self.asked
            .lock()
            .map_err(|_| ApplicationError::AdapterLockError)?
            .push(path.to_path_buf());
        let answer = self
            .answers
            .lock()
            .map_err(|_| ApplicationError::AdapterLockError)?
            .pop_front()
            .unwrap_or(false);
        Ok(answer)
    }
}
