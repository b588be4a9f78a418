//! Secret payload codec.
//!
//! In memory a payload is a closed [`SecretPayload`] enum. At the storage
//! and wire boundary it becomes a JSON object with one optional key per
//! variant (`text`, `login_password`, `card`, `binary`); absent variants are
//! omitted rather than written as `null`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload codec failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode secret payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decode secret payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Login/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPassword {
    pub login: String,
    pub password: String,
}

/// Payment card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub number: String,
    pub holder: String,
    pub expire_date: String,
    pub cvv: String,
}

/// Content of a vault entry. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SecretDocument", try_from = "SecretDocument")]
pub enum SecretPayload {
    Text(String),
    LoginPassword(LoginPassword),
    Card(Card),
    /// Reserved for file uploads; stored as base64.
    Binary(Vec<u8>),
}

impl SecretPayload {
    /// Document key of the active variant.
    pub fn kind(&self) -> &'static str {
        match self {
            SecretPayload::Text(_) => "text",
            SecretPayload::LoginPassword(_) => "login_password",
            SecretPayload::Card(_) => "card",
            SecretPayload::Binary(_) => "binary",
        }
    }
}

/// Boundary shape of a payload: one optional key per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_password: Option<LoginPassword>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes")]
    pub binary: Option<Vec<u8>>,
}

impl From<SecretPayload> for SecretDocument {
    fn from(payload: SecretPayload) -> Self {
        match payload {
            SecretPayload::Text(text) => Self {
                text: Some(text),
                ..Self::default()
            },
            SecretPayload::LoginPassword(lp) => Self {
                login_password: Some(lp),
                ..Self::default()
            },
            SecretPayload::Card(card) => Self {
                card: Some(card),
                ..Self::default()
            },
            SecretPayload::Binary(bytes) => Self {
                binary: Some(bytes),
                ..Self::default()
            },
        }
    }
}

impl TryFrom<SecretDocument> for SecretPayload {
    type Error = String;

    fn try_from(doc: SecretDocument) -> Result<Self, Self::Error> {
        match (doc.text, doc.login_password, doc.card, doc.binary) {
            (Some(text), None, None, None) => Ok(SecretPayload::Text(text)),
            (None, Some(lp), None, None) => Ok(SecretPayload::LoginPassword(lp)),
            (None, None, Some(card), None) => Ok(SecretPayload::Card(card)),
            (None, None, None, Some(bytes)) => Ok(SecretPayload::Binary(bytes)),
            (None, None, None, None) => Err("secret document has no payload variant".into()),
            _ => Err("secret document has more than one payload variant".into()),
        }
    }
}

/// Encode a payload into its storage document.
pub fn encode(payload: &SecretPayload) -> Result<serde_json::Value, CodecError> {
    serde_json::to_value(payload).map_err(CodecError::Encode)
}

/// Decode a storage document back into a payload.
pub fn decode(document: &serde_json::Value) -> Result<SecretPayload, CodecError> {
    SecretPayload::deserialize(document).map_err(CodecError::Decode)
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_str(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card() -> Card {
        Card {
            number: "4111111111111111".into(),
            holder: "ALICE DOE".into(),
            expire_date: "12/29".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn text_round_trip() {
        let payload = SecretPayload::Text("hello".into());
        assert_eq!(decode(&encode(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn login_password_round_trip() {
        let payload = SecretPayload::LoginPassword(LoginPassword {
            login: "alice".into(),
            password: "hunter2".into(),
        });
        assert_eq!(decode(&encode(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn card_round_trip() {
        let payload = SecretPayload::Card(card());
        assert_eq!(decode(&encode(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn binary_round_trip() {
        let payload = SecretPayload::Binary(vec![0, 1, 2, 254, 255]);
        assert_eq!(decode(&encode(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn encode_omits_absent_variants() {
        let doc = encode(&SecretPayload::Text("hello".into())).unwrap();
        assert_eq!(doc, json!({"text": "hello"}));

        let doc = encode(&SecretPayload::Card(card())).unwrap();
        assert_eq!(
            doc,
            json!({"card": {
                "number": "4111111111111111",
                "holder": "ALICE DOE",
                "expire_date": "12/29",
                "cvv": "123"
            }})
        );
    }

    #[test]
    fn binary_is_base64_on_the_wire() {
        let doc = encode(&SecretPayload::Binary(b"hi".to_vec())).unwrap();
        assert_eq!(doc, json!({"binary": "aGk="}));
    }

    #[test]
    fn decode_accepts_wire_shape() {
        let doc = json!({"login_password": {"login": "bob", "password": "pw"}});
        assert_eq!(
            decode(&doc).unwrap(),
            SecretPayload::LoginPassword(LoginPassword {
                login: "bob".into(),
                password: "pw".into()
            })
        );
    }

    #[test]
    fn decode_treats_null_as_absent() {
        let doc = json!({"text": "hi", "card": null});
        assert_eq!(decode(&doc).unwrap(), SecretPayload::Text("hi".into()));
    }

    #[test]
    fn decode_rejects_empty_document() {
        assert!(matches!(decode(&json!({})), Err(CodecError::Decode(_))));
    }

    #[test]
    fn decode_rejects_multiple_variants() {
        let doc = json!({"text": "hi", "login_password": {"login": "a", "password": "b"}});
        assert!(matches!(decode(&doc), Err(CodecError::Decode(_))));
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        assert!(decode(&json!("just a string")).is_err());
        assert!(decode(&json!({"text": 42})).is_err());
        assert!(decode(&json!({"card": {"number": "1"}})).is_err());
        assert!(decode(&json!({"binary": "not base64!"})).is_err());
    }

    #[test]
    fn kind_names_the_document_key() {
        assert_eq!(SecretPayload::Text(String::new()).kind(), "text");
        assert_eq!(SecretPayload::Card(card()).kind(), "card");
        assert_eq!(SecretPayload::Binary(Vec::new()).kind(), "binary");
    }
}
