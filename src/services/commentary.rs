//! Treasurer commentary via the Gemini text-generation API
//!
//! One request per transaction, carrying the vault name, the new balance,
//! and the signed delta. The call never fails to the caller: a missing
//! credential, a network error, or an empty reply all collapse into fixed
//! fallback lines, favoring uninterrupted interaction over error
//! visibility.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "API_KEY";

/// Fallback when the request or reply decoding fails
pub const FAILURE_FALLBACK: &str = "The ledgers remain true, m'lord.";
/// Fallback when the model replies with empty text
pub const EMPTY_REPLY_FALLBACK: &str = "A fine addition to the royal coffers!";

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";
const TEMPERATURE: f32 = 0.8;

/// Errors internal to the commentary request path
///
/// These never cross the service boundary; `comment_on` maps every
/// variant to a fallback string.
#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("could not decode reply body: {0}")]
    Decode(#[from] std::io::Error),

    #[error("reply contained no text candidates")]
    NoCandidates,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

impl GenerateReply {
    /// First candidate text, if the reply carried any
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

/// Blocking client for treasurer commentary
///
/// Cheap to clone; the controller hands clones to worker threads so a
/// slow fetch never blocks balance mutation.
#[derive(Debug, Clone)]
pub struct CommentaryClient {
    api_key: Option<String>,
}

impl CommentaryClient {
    /// Creates a client from the `API_KEY` environment variable
    ///
    /// An unset or empty variable is a valid, handled state: every
    /// comment becomes the deterministic missing-credential line.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
        }
    }

    /// Creates a client with an explicit credential (or none)
    pub fn with_key(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Whether a network request would actually be attempted
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Produces a treasurer comment for a committed transaction
    ///
    /// # Arguments
    /// * `balance` - Vault balance after the transaction
    /// * `delta` - Signed change that was just applied
    /// * `vault_name` - Display name of the vault
    ///
    /// Always returns a displayable string; failures are reduced to the
    /// fixed fallback lines and never surfaced to the caller.
    pub fn comment_on(&self, balance: f64, delta: f64, vault_name: &str) -> String {
        let Some(key) = &self.api_key else {
            return missing_key_fallback(vault_name);
        };

        match self.request(key, balance, delta, vault_name) {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                eprintln!("Commentary: {err}");
                FAILURE_FALLBACK.to_string()
            }
        }
    }

    fn request(
        &self,
        key: &str,
        balance: f64,
        delta: f64,
        vault_name: &str,
    ) -> Result<String, CommentaryError> {
        let body = GenerateRequest::new(build_prompt(balance, delta, vault_name));

        let reply: GenerateReply = ureq::post(ENDPOINT)
            .set("x-goog-api-key", key)
            .send_json(&body)
            .map_err(Box::new)?
            .into_json()?;

        reply.text().ok_or(CommentaryError::NoCandidates)
    }
}

/// Deterministic line used when no credential is configured
pub fn missing_key_fallback(vault_name: &str) -> String {
    format!("The {vault_name} awaits your gold, sire.")
}

/// Royal Treasurer persona prompt for one transaction
fn build_prompt(balance: f64, delta: f64, vault_name: &str) -> String {
    format!(
        "You are the Royal Treasurer of a medieval kingdom. You are currently looking at \
         the \"{vault_name}\". The current balance of this specific vault is {balance} pieces. \
         The user just added or removed {delta} pieces. Give a short, witty, 1-sentence \
         medieval comment about this transaction. If they are rich, be sycophantic. If they \
         are poor, be slightly concerned or judgmental but loyal. Mention the vault name if \
         it makes sense. Keep it strictly under 15 words."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_credential_yields_vault_specific_fallback() {
        let client = CommentaryClient::with_key(None);
        assert_eq!(
            client.comment_on(150.0, 50.0, "Dragon Hoard"),
            "The Dragon Hoard awaits your gold, sire."
        );
    }

    #[test]
    fn credential_presence_is_reported() {
        assert!(!CommentaryClient::with_key(None).has_credential());
        assert!(CommentaryClient::with_key(Some("k".into())).has_credential());
    }

    #[test]
    fn prompt_carries_transaction_details() {
        let prompt = build_prompt(150.0, -25.0, "The Iron Bank");

        assert!(prompt.contains("\"The Iron Bank\""));
        assert!(prompt.contains("150 pieces"));
        assert!(prompt.contains("-25 pieces"));
        assert!(prompt.contains("under 15 words"));
    }

    #[test]
    fn reply_text_is_extracted_from_first_candidate() {
        let reply: GenerateReply = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "A fine haul, sire!" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(reply.text().as_deref(), Some("A fine haul, sire!"));
    }

    #[test]
    fn reply_without_candidates_is_detected() {
        let reply: GenerateReply = serde_json::from_value(json!({})).unwrap();
        assert!(reply.text().is_none());
    }

    #[test]
    fn request_body_uses_gemini_field_names() {
        let body = GenerateRequest::new("prompt".into());
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["generationConfig"]["temperature"], 0.8);
    }
}
