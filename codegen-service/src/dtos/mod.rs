//! Request/response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate`.
///
/// An empty prompt is accepted; only a missing or non-string `prompt` is
/// rejected, and that happens in the `Json` extractor before the handler runs.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Response of `POST /generate`.
///
/// `code` carries either the model output verbatim or a single-line
/// `// Error generating code: <message>` comment. Both cases are HTTP 200;
/// the front-end renders whatever it gets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub code: String,
}
