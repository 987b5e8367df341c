use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::standard::uuid::Uuid;

use crate::trust::catalog::CredentialType;

/// `PublishedDocument` is a document the organization edits itself, like its profile or
/// its bank account
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct PublishedDocument {
    pub(crate) id: String,

    #[serde(rename = "type")]
    pub(crate) credential_type: CredentialType,

    pub(crate) document: Value,

    #[serde(rename = "isPublic")]
    pub(crate) is_public: bool,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl PublishedDocument {
    pub fn new(credential_type: CredentialType, document: Value, is_public: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            credential_type,
            document,
            is_public,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.updated_at = Utc::now();
    }

    pub fn set_document(&mut self, document: Value) {
        self.document = document;
        self.updated_at = Utc::now();
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn get_document(&self) -> Value {
        self.document.to_owned()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }

    pub fn get_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.to_owned()
    }
}
