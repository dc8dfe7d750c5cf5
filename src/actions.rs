use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A runnable palette entry. `action` is a `namespace:verb[:arg]` string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Encode a structured payload so it fits in an action string.
pub fn encode_payload<T: Serialize>(payload: &T) -> anyhow::Result<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_payload<T: DeserializeOwned>(encoded: &str) -> anyhow::Result<T> {
    let json = URL_SAFE_NO_PAD.decode(encoded)?;
    Ok(serde_json::from_slice(&json)?)
}
