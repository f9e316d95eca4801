use tracing::{debug, warn};

use crate::extraction::{StructureSource, StructuredCard};
use crate::llm::{prompts, CompletionOptions, LlmProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredOutcome {
    pub card: StructuredCard,
    pub source: StructureSource,
}

impl StructuredOutcome {
    fn fallback(raw_text: &str) -> Self {
        Self {
            card: StructuredCard::from_text(raw_text),
            source: StructureSource::Regex,
        }
    }
}

/// Turns OCR text into a [`StructuredCard`], asking the LLM first.
///
/// Never fails: an unavailable provider, a failed call or an unparseable
/// reply all fall back to [`StructuredCard::from_text`].
#[derive(Debug, Clone)]
pub struct CardStructurer {
    llm: LlmProvider,
}

impl CardStructurer {
    pub fn new(llm: LlmProvider) -> Self {
        Self { llm }
    }

    pub async fn structure(&self, raw_text: &str) -> StructuredOutcome {
        if !self.llm.is_available() {
            debug!("LLM unavailable, structuring card with regex");
            return StructuredOutcome::fallback(raw_text);
        }

        let prompt = prompts::card_structuring_prompt(raw_text);
        let options = CompletionOptions {
            temperature: Some(0.0),
        };

        let reply = self
            .llm
            .complete(&prompt, Some(prompts::CARD_SYSTEM_PROMPT), Some(&options))
            .await
            .and_then(|reply| StructuredCard::from_llm_reply(&reply));

        match reply {
            Ok(card) => StructuredOutcome {
                card,
                source: StructureSource::Llm,
            },
            Err(e) => {
                warn!(error = %e, "LLM structuring failed, falling back to regex");
                StructuredOutcome::fallback(raw_text)
            }
        }
    }
}
