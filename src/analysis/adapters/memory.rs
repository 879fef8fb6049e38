//! Scripted in-memory analyzer for tests and offline runs.

use crate::analysis::ports::{AnalysisError, AnalysisResult, TextAnalyzer};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Response behaviour of a [`ScriptedTextAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Script {
    Echo,
    Reply(String),
    Status(u16),
    Unreachable(String),
}

#[derive(Debug)]
struct ScriptState {
    script: Script,
    prompts: Vec<String>,
}

impl Default for ScriptState {
    fn default() -> Self {
        Self {
            script: Script::Echo,
            prompts: Vec::new(),
        }
    }
}

/// In-memory analyzer that follows a configurable script and records every
/// prompt it receives.
///
/// The default script echoes the prompt, matching the placeholder behaviour
/// of the hosted analysis endpoint.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTextAnalyzer {
    state: Arc<RwLock<ScriptState>>,
}

impl ScriptedTextAnalyzer {
    /// Creates an analyzer that echoes each prompt.
    #[must_use]
    pub fn echo() -> Self {
        Self::default()
    }

    /// Creates an analyzer that answers every prompt with `reply`.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(reply.into()))
    }

    /// Creates an analyzer that answers with a non-success `status`.
    #[must_use]
    pub fn failing_with_status(status: u16) -> Self {
        Self::with_script(Script::Status(status))
    }

    /// Creates an analyzer that behaves as if the service were unreachable.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Unreachable(reason.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            state: Arc::new(RwLock::new(ScriptState {
                script,
                prompts: Vec::new(),
            })),
        }
    }

    /// Switches the analyzer to answer every prompt with `reply`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Transport`] when lock acquisition fails.
    pub fn set_reply(&self, reply: impl Into<String>) -> AnalysisResult<()> {
        self.replace_script(Script::Reply(reply.into()))
    }

    /// Switches the analyzer to fail with a non-success `status`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Transport`] when lock acquisition fails.
    pub fn set_failing_status(&self, status: u16) -> AnalysisResult<()> {
        self.replace_script(Script::Status(status))
    }

    /// Returns every prompt received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Transport`] when lock acquisition fails.
    pub fn prompts(&self) -> AnalysisResult<Vec<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| AnalysisError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.prompts.clone())
    }

    fn replace_script(&self, script: Script) -> AnalysisResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AnalysisError::transport(std::io::Error::other(err.to_string())))?;
        state.script = script;
        Ok(())
    }
}

#[async_trait]
impl TextAnalyzer for ScriptedTextAnalyzer {
    async fn analyze(&self, prompt: &str) -> AnalysisResult<String> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AnalysisError::transport(std::io::Error::other(err.to_string())))?;
        state.prompts.push(prompt.to_owned());
        match &state.script {
            Script::Echo => Ok(format!("Analysis of: {prompt}")),
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Status(status) => Err(AnalysisError::Status(*status)),
            Script::Unreachable(reason) => Err(AnalysisError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                reason.clone(),
            ))),
        }
    }
}
