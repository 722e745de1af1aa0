//! JD extractor: turns a raw job description into a `JdAttributes` bundle.

use tracing::warn;

use crate::errors::AppError;
use crate::extraction::prompts::{EXTRACT_SYSTEM, JD_EXTRACT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::FIXED_SCHEMA_RULES;
use crate::llm_client::{parse_json_object, LlmClient};
use crate::models::bundle::{empty_jd_schema, JdAttributes};

pub async fn extract_jd_attributes(
    jd_text: &str,
    llm: &LlmClient,
) -> Result<JdAttributes, AppError> {
    let prompt = JD_EXTRACT_PROMPT_TEMPLATE
        .replace("{rules}", FIXED_SCHEMA_RULES)
        .replace("{jd_text}", jd_text);

    let reply = llm
        .call_text(&prompt, EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD extraction failed: {e}")))?;

    jd_from_reply(&reply)
}

/// Builds the bundle from the model's reply. A reply with no JSON object
/// yields the empty schema; a JSON object of the wrong shape is rejected.
pub fn jd_from_reply(reply: &str) -> Result<JdAttributes, AppError> {
    let value = parse_json_object(reply).unwrap_or_else(|e| {
        warn!("JD extraction reply had no usable JSON ({e}), using empty schema");
        empty_jd_schema()
    });
    Ok(JdAttributes::from_value(&value)?)
}
