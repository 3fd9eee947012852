//! Streaming event types delivered by the agent runtime.

use strum::{Display, EnumString};

use super::usage::UsageFragment;

/// One event from an agent invocation stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStreamEvent {
    /// A fragment of generated text, still encoded.
    Chunk { bytes: Vec<u8> },
    /// Diagnostic metadata: reasoning text and/or usage.
    Trace {
        rationale: Option<String>,
        usage: Option<UsageFragment>,
    },
}

impl AgentStreamEvent {
    pub fn chunk(text: impl Into<String>) -> Self {
        Self::Chunk {
            bytes: text.into().into_bytes(),
        }
    }

    pub fn rationale(text: impl Into<String>) -> Self {
        Self::Trace {
            rationale: Some(text.into()),
            usage: None,
        }
    }

    pub fn usage(input_tokens: Option<u32>, output_tokens: Option<u32>) -> Self {
        Self::Trace {
            rationale: None,
            usage: Some(UsageFragment::new(input_tokens, output_tokens)),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chunk { .. } => "chunk",
            Self::Trace { .. } => "trace",
        }
    }
}

/// Why a flow run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowCompletionReason {
    Success,
    InputRequired,
    Unknown,
}

impl FlowCompletionReason {
    /// Parse an upstream reason; anything unrecognized is `Unknown`.
    pub fn from_upstream(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Unknown)
    }
}

/// One event from a flow invocation stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStreamEvent {
    /// Output node content. `document` is `None` when the node emitted no
    /// document.
    Output { document: Option<String> },
    /// Terminal status for the run.
    Completion { reason: FlowCompletionReason },
    /// Trace or input-request events. Counted but not interpreted.
    Other { kind: String },
}

impl FlowStreamEvent {
    pub fn output(document: impl Into<String>) -> Self {
        Self::Output {
            document: Some(document.into()),
        }
    }

    pub fn completion(reason: FlowCompletionReason) -> Self {
        Self::Completion { reason }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Output { .. } => "output",
            Self::Completion { .. } => "completion",
            Self::Other { kind } => kind,
        }
    }
}
