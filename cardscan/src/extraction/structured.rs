use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card::{extract_info_from_text, RE_TEL};
use crate::error::{CardscanError, Result};

const PHONE_MIN_LEN: usize = 8;
const PHONE_MAX_LEN: usize = 15;

static RE_CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").unwrap());

/// Card fields in the richer shape returned by `/upload-ocr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StructuredCard {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub web: Option<String>,
    /// Free-form summary; empty when nothing is known.
    pub description: String,
}

/// Which path produced a [`StructuredCard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StructureSource {
    Llm,
    Regex,
}

impl StructuredCard {
    /// Regex-only structuring.
    ///
    /// Name, email and web come from [`extract_info_from_text`]; the phone is
    /// the longest normalised candidate (see [`best_phone_number`]).
    pub fn from_text(text: &str) -> Self {
        let info = extract_info_from_text(text);
        Self {
            name: info.name,
            title: None,
            email: info.email,
            tel: best_phone_number(text),
            company: None,
            address: None,
            web: info.web,
            description: String::new(),
        }
    }

    /// Parse a model reply into a card.
    ///
    /// Accepts the object bare or inside a Markdown code fence. Empty strings
    /// and `null` become `None`; numbers are kept as their decimal text.
    pub fn from_llm_reply(reply: &str) -> Result<Self> {
        let trimmed = reply.trim();
        let body = RE_CODE_FENCE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map_or(trimmed, |m| m.as_str());

        let value: Value = serde_json::from_str(body)
            .map_err(|e| CardscanError::Llm(format!("Failed to parse JSON response: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(CardscanError::Llm(
                "Expected a JSON object in LLM response".to_string(),
            ));
        };

        let field = |key: &str| fields.get(key).and_then(scalar_text);
        Ok(Self {
            name: field("name"),
            title: field("title"),
            email: field("email"),
            tel: field("tel"),
            company: field("company"),
            address: field("address"),
            web: field("web"),
            description: field("description").unwrap_or_default(),
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Longest phone-like run in `text` once reduced to digits and `+`.
///
/// Candidates are the non-overlapping matches of the tel pattern; only those
/// with 8 to 15 characters after normalising count. Ties keep the earliest.
pub fn best_phone_number(text: &str) -> Option<String> {
    let mut best: Option<String> = None;

    for m in RE_TEL.find_iter(text) {
        let phone: String = m
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone.len()) {
            continue;
        }
        if best.as_ref().map_or(true, |b| phone.len() > b.len()) {
            best = Some(phone);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_llm_reply_plain_object() {
        let reply = r#"{"name":"Ayşe Yılmaz","title":"CTO","email":"ayse@acme.com.tr","tel":"+90 212 555 12 34","company":"Acme","address":"","web":"www.acme.com.tr","description":"Technology company"}"#;
        let card = StructuredCard::from_llm_reply(reply).unwrap();

        assert_eq!(
            card,
            StructuredCard {
                name: Some("Ayşe Yılmaz".to_string()),
                title: Some("CTO".to_string()),
                email: Some("ayse@acme.com.tr".to_string()),
                tel: Some("+90 212 555 12 34".to_string()),
                company: Some("Acme".to_string()),
                address: None,
                web: Some("www.acme.com.tr".to_string()),
                description: "Technology company".to_string(),
            }
        );
    }

    #[test]
    fn test_from_llm_reply_code_fence() {
        let reply = "```json\n{\"name\": \"Jane Doe\", \"company\": \"\"}\n```";
        let card = StructuredCard::from_llm_reply(reply).unwrap();
        assert_eq!(card.name.as_deref(), Some("Jane Doe"));
        assert!(card.company.is_none());
        assert_eq!(card.description, "");
    }

    #[test]
    fn test_from_llm_reply_normalises_values() {
        let reply = r#"{"name": null, "tel": 905551234567, "web": "  ", "email": ["x"]}"#;
        let card = StructuredCard::from_llm_reply(reply).unwrap();
        assert!(card.name.is_none());
        assert_eq!(card.tel.as_deref(), Some("905551234567"));
        assert!(card.web.is_none());
        assert!(card.email.is_none());
    }

    #[test]
    fn test_from_llm_reply_rejects_non_object() {
        assert!(matches!(
            StructuredCard::from_llm_reply("[]"),
            Err(CardscanError::Llm(_))
        ));
        assert!(matches!(
            StructuredCard::from_llm_reply("Sorry, I cannot help."),
            Err(CardscanError::Llm(_))
        ));
    }

    #[test]
    fn test_from_text_fallback() {
        let text = "John Smith\nAcme Corp\njohn@acme.com\n+1 555-123-4567\nwww.acme.com";
        let card = StructuredCard::from_text(text);

        assert_eq!(card.name.as_deref(), Some("John Smith"));
        assert_eq!(card.email.as_deref(), Some("john@acme.com"));
        assert_eq!(card.tel.as_deref(), Some("+15551234567"));
        assert_eq!(card.web.as_deref(), Some("www.acme.com"));
        assert!(card.company.is_none());
        assert_eq!(card.description, "");
    }

    #[test]
    fn test_best_phone_prefers_longest() {
        let text = "Fax 555 1234 5678\nTel +90 (212) 555 12 34";
        assert_eq!(best_phone_number(text).as_deref(), Some("+902125551234"));
    }

    #[test]
    fn test_best_phone_length_bounds() {
        // 6 digits once normalised
        assert!(best_phone_number("12 34 56").is_none());
        assert_eq!(best_phone_number("1234 5678").as_deref(), Some("12345678"));
        assert!(best_phone_number("").is_none());
    }

    #[test]
    fn test_best_phone_ties_keep_first() {
        let text = "5551234567 / 5559876543";
        assert_eq!(best_phone_number(text).as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_structure_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(StructureSource::Llm).unwrap(),
            serde_json::json!("llm")
        );
        assert_eq!(
            serde_json::to_value(StructureSource::Regex).unwrap(),
            serde_json::json!("regex")
        );
    }
}
