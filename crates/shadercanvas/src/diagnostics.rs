use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::api::ShaderStage;

/// A reported-but-not-fatal condition.
///
/// These never abort rendering: a failed compile is carried forward so
/// the link step fails cleanly, and an undeclared uniform is skipped for
/// the frame. They flow through a channel instead of being printed so
/// embedders and tests can assert on them.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A shader stage failed to compile; carries the compiler log.
    CompileFailed { stage: ShaderStage, log: String },
    /// A declared uniform is not referenced by the active program.
    UniformNotFound { name: String },
}

/// Collection point for [`Diagnostic`] events.
///
/// The hub owns both ends of an unbounded channel, so reporting never
/// blocks and never fails; consumers drain at their own pace. Every
/// event is additionally logged through `tracing`.
pub struct DiagnosticHub {
    sender: Sender<Diagnostic>,
    receiver: Receiver<Diagnostic>,
}

impl DiagnosticHub {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::CompileFailed { stage, log } => {
                tracing::warn!(%stage, log = %log.trim_end(), "shader stage failed to compile");
            }
            Diagnostic::UniformNotFound { name } => {
                tracing::warn!(name = %name, "declared uniform not found in active program");
            }
        }
        let _ = self.sender.send(diagnostic);
    }

    /// Receiver end for embedders that want to watch events as they come.
    pub fn receiver(&self) -> &Receiver<Diagnostic> {
        &self.receiver
    }

    /// Takes every event reported so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        self.receiver.try_iter().collect()
    }
}

impl Default for DiagnosticHub {
    fn default() -> Self {
        Self::new()
    }
}
