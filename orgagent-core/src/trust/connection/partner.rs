use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::uuid::Uuid;

use super::types::{ConnectionError, ConnectionEvent, ConnectionID};

/// `Partner` is a remote agent the organization has a relationship with
///
/// The `connection_id` is assigned once, when the connection handshake completes. After that
/// it never changes for this partner, only the lifecycle `state` keeps moving
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Partner {
    pub(crate) id: String,

    #[serde(rename = "connectionId")]
    pub(crate) connection_id: Option<ConnectionID>,

    pub(crate) alias: Option<String>,
    pub(crate) label: String,
    pub(crate) did: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) incoming: bool,

    #[serde(rename = "ariesSupport")]
    pub(crate) aries_support: bool,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl Partner {
    /// new creates an outgoing partner which still waits for its connection
    pub fn new(label: String, did: Option<String>, alias: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            connection_id: None,
            alias,
            label,
            did,
            state: None,
            incoming: false,
            aries_support: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// from_event creates a partner for an unsolicited inbound connection
    ///
    /// The partner's `DID` is the counterpart's raw `DID` prefixed with the configured
    /// `DID` method prefix
    pub fn from_event(event: &ConnectionEvent, did_prefix: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            connection_id: Some(event.connection_id.clone()),
            alias: Some(event.label.clone()),
            label: event.label.clone(),
            did: event
                .their_did
                .as_ref()
                .map(|did| format!("{}{}", did_prefix, did)),
            state: Some(event.state.clone()),
            incoming: true,
            aries_support: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// assign_connection sets the connection identifier and the state of a partner
    /// created out-of-band. It fails when the identifier has already been assigned
    pub fn assign_connection(
        &mut self,
        connection_id: ConnectionID,
        state: String,
    ) -> Result<(), ConnectionError> {
        if let Some(current) = &self.connection_id {
            return Err(ConnectionError::ImmutableConnectionID(format!(
                "partner {} already bound to {}",
                self.id, current
            )));
        }

        self.connection_id = Some(connection_id);
        self.state = Some(state);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_state(&mut self, state: String) {
        self.state = Some(state);
        self.updated_at = Utc::now();
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_connection_id(&self) -> Option<ConnectionID> {
        self.connection_id.to_owned()
    }

    pub fn get_alias(&self) -> Option<String> {
        self.alias.to_owned()
    }

    pub fn get_label(&self) -> String {
        self.label.to_owned()
    }

    pub fn get_did(&self) -> Option<String> {
        self.did.to_owned()
    }

    pub fn get_state(&self) -> Option<String> {
        self.state.to_owned()
    }

    pub fn is_incoming(&self) -> bool {
        self.incoming
    }

    pub fn has_aries_support(&self) -> bool {
        self.aries_support
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }

    pub fn get_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.to_owned()
    }
}

/// `PartnerProof` is a presentation exchange tied to a partner
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct PartnerProof {
    pub(crate) id: String,

    #[serde(rename = "partnerId")]
    pub(crate) partner_id: String,

    #[serde(rename = "presentationExchangeId")]
    pub(crate) presentation_exchange_id: Option<String>,

    pub(crate) state: Option<String>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl PartnerProof {
    pub fn new(partner_id: String, presentation_exchange_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            partner_id,
            presentation_exchange_id,
            state: None,
            created_at: Utc::now(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_partner_id(&self) -> String {
        self.partner_id.to_owned()
    }

    pub fn get_presentation_exchange_id(&self) -> Option<String> {
        self.presentation_exchange_id.to_owned()
    }

    pub fn get_state(&self) -> Option<String> {
        self.state.to_owned()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
