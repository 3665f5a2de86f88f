//! Component generation endpoint.

use crate::dtos::{GenerationResult, PromptRequest};
use crate::services::providers::ChatMessage;
use crate::AppState;
use axum::{extract::State, Json};
use std::time::Instant;

/// Instruction prepended to every request. Keeping the model on rails here is
/// what makes the raw output renderable by the front-end without cleanup.
pub const SYSTEM_PROMPT: &str = "\
You are an expert Frontend Architect.
Build a modern React component using Tailwind CSS.

RULES:
1. Output ONLY the code. No explanation.
2. Use 'lucide-react' for icons.
3. Use 'export default function App()'.
4. Style heavily with Tailwind (gradients, shadows, rounded-xl).
5. Ensure the code is complete and not truncated.";

/// `POST /generate` — forward the prompt to the model and hand back whatever
/// it produced.
///
/// Always answers 200 with a `GenerationResult`: an inference failure is
/// folded into the `code` field as a comment the front-end can display
/// in place of a component. A missing or non-string `prompt` never gets this
/// far; the `Json` extractor rejects it with a client error.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Json<GenerationResult> {
    tracing::info!(prompt = %request.prompt, "Starting generation");
    let started = Instant::now();

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(&request.prompt),
    ];

    match state.text_provider.generate(&messages).await {
        Ok(response) => {
            tracing::info!(
                elapsed_secs = started.elapsed().as_secs_f64(),
                input_tokens = ?response.input_tokens,
                output_tokens = ?response.output_tokens,
                "Finished generation"
            );
            Json(GenerationResult {
                code: response.text,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            Json(GenerationResult {
                code: format!("// Error generating code: {}", e),
            })
        }
    }
}
