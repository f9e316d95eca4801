//! Prompt templates for the card structuring step
//!
//! Templates use plain `format!()` interpolation.

/// System message for card structuring.
pub const CARD_SYSTEM_PROMPT: &str =
    "You are a business card editor working on OCR output. Reply with JSON only.";

/// Generate a prompt that turns raw OCR text from a business card into JSON
///
/// The reply is expected to be one JSON object with the fields `name`,
/// `title`, `email`, `tel`, `company`, `address`, `web` and `description`,
/// using `""` for anything the card does not show.
///
/// # Example
/// ```
/// use cardscan::llm::prompts::card_structuring_prompt;
///
/// let prompt = card_structuring_prompt("Jane Doe\njane@acme.com");
/// assert!(prompt.contains("jane@acme.com"));
/// ```
pub fn card_structuring_prompt(raw_text: &str) -> String {
    format!(
        r#"Below is raw text read from a business card with OCR.
Examine it and answer in JSON format only.
Fields: name, title, email, tel, company, address, web, description.
If a field is missing, use an empty string ("").
If company is empty, guess the company name from the e-mail domain or the web address in the OCR text.

OCR TEXT:
{raw_text}

Respond with one JSON object only. Example format:
{{"name": "Jane Doe", "title": "CTO", "email": "jane@acme.com", "tel": "+1 555 123 4567", "company": "Acme", "address": "", "web": "www.acme.com", "description": ""}}"#
    )
}
