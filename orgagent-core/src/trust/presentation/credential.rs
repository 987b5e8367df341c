use rst_common::standard::chrono::serde::{ts_seconds, ts_seconds_option};
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::standard::uuid::Uuid;

use crate::trust::catalog::CredentialType;
use crate::trust::connection::ConnectionID;

/// `IssuedCredential` is a credential a partner issued to the organization
///
/// The `credential` payload is the agent's credential object, it carries at least
/// `schema_id`, `cred_def_id` and `attrs`. Once received, only the public flag changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct IssuedCredential {
    pub(crate) id: String,

    #[serde(with = "ts_seconds_option")]
    #[serde(rename = "issuedAt")]
    #[serde(default)]
    pub(crate) issued_at: Option<DateTime<Utc>>,

    #[serde(rename = "type")]
    pub(crate) credential_type: CredentialType,

    pub(crate) state: Option<String>,

    #[serde(rename = "isPublic")]
    pub(crate) is_public: bool,

    pub(crate) issuer: Option<String>,

    #[serde(rename = "schemaId")]
    pub(crate) schema_id: Option<String>,

    #[serde(rename = "connectionId")]
    pub(crate) connection_id: Option<ConnectionID>,

    pub(crate) credential: Value,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl IssuedCredential {
    pub fn new(credential_type: CredentialType, credential: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            issued_at: None,
            credential_type,
            state: None,
            is_public: false,
            issuer: None,
            schema_id: None,
            connection_id: None,
            credential,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    pub fn with_schema_id(mut self, schema_id: &str) -> Self {
        self.schema_id = Some(schema_id.to_string());
        self
    }

    pub fn with_connection_id(mut self, connection_id: ConnectionID) -> Self {
        self.connection_id = Some(connection_id);
        self
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at.to_owned()
    }

    pub fn get_credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn get_state(&self) -> Option<String> {
        self.state.to_owned()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn get_issuer(&self) -> Option<String> {
        self.issuer.to_owned()
    }

    pub fn get_schema_id(&self) -> Option<String> {
        self.schema_id.to_owned()
    }

    pub fn get_connection_id(&self) -> Option<ConnectionID> {
        self.connection_id.to_owned()
    }

    pub fn get_credential(&self) -> Value {
        self.credential.to_owned()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
