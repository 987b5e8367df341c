use derive_more::{AsRef, Display, From, Into};
use the_newtype::Newtype;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use super::partner::{Partner, PartnerProof};
use super::removal::RemovalReport;

/// ConnectionError is a base error types for the `Connection` domain
#[derive(Debug, PartialEq, Error, Clone)]
pub enum ConnectionError {
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("entity error: {0}")]
    EntityError(String),

    #[error("agent error: {0}")]
    AgentError(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("connection id is immutable: {0}")]
    ImmutableConnectionID(String),
}

/// Identifier assigned by the external agent once a connection handshake completes
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef, Display,
)]
#[serde(crate = "self::serde")]
pub struct ConnectionID(String);

impl ConnectionID {
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `ConnectionEvent` is a connection lifecycle notification delivered by the external agent
///
/// The field names follow the agent's webhook payload. The `state` vocabulary is owned by the
/// agent, this domain never interprets it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct ConnectionEvent {
    #[serde(rename = "their_label")]
    pub label: String,
    pub connection_id: ConnectionID,
    pub state: String,

    #[serde(default)]
    pub their_did: Option<String>,
}

impl ConnectionEvent {
    pub fn new(label: &str, connection_id: &str, state: &str, their_did: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            connection_id: ConnectionID::from(connection_id.to_string()),
            state: state.to_string(),
            their_did: their_did.map(|did| did.to_string()),
        }
    }
}

/// `ReconcileOutcome` tells which branch of the reconciliation has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// first confirmation for a partner created out-of-band
    Assigned,

    /// partner already had its connection, only its state changed
    StateUpdated,

    /// unsolicited inbound connection
    Created,
}

/// `InvitationRequest` asks the external agent to receive an implicit invitation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct InvitationRequest {
    pub did: String,
    pub label: String,
}

/// `PresentationExchangeRecord` is the agent's record of a presentation exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct PresentationExchangeRecord {
    pub presentation_exchange_id: String,
    pub connection_id: ConnectionID,

    #[serde(default)]
    pub state: Option<String>,
}

/// ConnectionAPI is main entrypoint to communicate with the `Connection` domain
#[async_trait]
pub trait ConnectionAPI: Clone {
    /// handle_connection_event merges one lifecycle event into the partner records
    ///
    /// All events are handled one at a time, which guarantees two events for the same unseen
    /// label can't both create a partner
    async fn handle_connection_event(
        &self,
        event: ConnectionEvent,
    ) -> Result<ReconcileOutcome, ConnectionError>;

    /// remove_connection is a best-effort cleanup, each step is attempted even when a previous
    /// one failed. The returned [`RemovalReport`] describes every step outcome
    async fn remove_connection(
        &self,
        connection_id: ConnectionID,
    ) -> Result<RemovalReport, ConnectionError>;

    /// create_connection registers an out-of-band partner for the label and asks the agent
    /// to receive an invitation from the given `DID`
    async fn create_connection(
        &self,
        did: String,
        label: String,
        alias: Option<String>,
    ) -> Result<Option<ConnectionID>, ConnectionError>;
}

/// `RepoPartnerBuilder` is a `Partner` repository abstraction
#[async_trait]
pub trait RepoPartnerBuilder: Clone + Sync + Send {
    async fn find_by_label(&self, label: String) -> Result<Option<Partner>, ConnectionError>;

    async fn find_by_connection_id(
        &self,
        connection_id: ConnectionID,
    ) -> Result<Option<Partner>, ConnectionError>;

    async fn save(&self, partner: &Partner) -> Result<(), ConnectionError>;
    async fn update(&self, partner: &Partner) -> Result<(), ConnectionError>;
    async fn update_state(&self, id: String, state: String) -> Result<(), ConnectionError>;
}

/// `RepoProofBuilder` is a `PartnerProof` repository abstraction
#[async_trait]
pub trait RepoProofBuilder: Clone + Sync + Send {
    async fn list_by_partner(&self, partner_id: String)
        -> Result<Vec<PartnerProof>, ConnectionError>;

    async fn remove_proofs(&self, ids: Vec<String>) -> Result<(), ConnectionError>;
}

/// `AgentBuilder` is the subset of the external credential-exchange agent used by this domain
///
/// Every method is a remote call, the absence of a result is a legal outcome
#[async_trait]
pub trait AgentBuilder: Clone + Sync + Send {
    async fn receive_invitation(
        &self,
        request: InvitationRequest,
        alias: Option<String>,
    ) -> Result<Option<ConnectionID>, ConnectionError>;

    async fn remove_connection(&self, connection_id: ConnectionID) -> Result<(), ConnectionError>;

    async fn list_presentation_exchanges(
        &self,
    ) -> Result<Option<Vec<PresentationExchangeRecord>>, ConnectionError>;

    async fn remove_presentation_exchange(
        &self,
        presentation_exchange_id: String,
    ) -> Result<(), ConnectionError>;
}

/// `UsecaseBuilder` is a trait behavior that provides
/// base application logic's handlers
pub trait UsecaseBuilder: ConnectionAPI {
    type RepoPartnerImplementer: RepoPartnerBuilder;
    type RepoProofImplementer: RepoProofBuilder;
    type AgentImplementer: AgentBuilder;

    fn repo_partner(&self) -> &Self::RepoPartnerImplementer;
    fn repo_proof(&self) -> &Self::RepoProofImplementer;
    fn agent(&self) -> &Self::AgentImplementer;
}
