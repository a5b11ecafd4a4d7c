//! BotTurnClient trait definition.
//!
//! The bot runtime seam: one request/response call per conversational turn.
//! The HTTP implementation lives in `parley-infra`.

use parley_types::bot::{BotTurnRequest, BotTurnResponse};
use parley_types::error::BotTurnError;

/// The managed conversational-bot runtime consumed by Parley.
///
/// A client handle is bound to one set of session credentials at
/// construction time; `recognize_text` carries everything else per turn.
pub trait BotTurnClient: Send + Sync {
    /// Send one utterance and get the runtime's reply messages plus the
    /// inferred intent interpretations.
    fn recognize_text(
        &self,
        request: &BotTurnRequest,
    ) -> impl std::future::Future<Output = Result<BotTurnResponse, BotTurnError>> + Send;
}
