use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

/// RevocationError never leaves this domain, every failure is logged and turned into an
/// absent result by the usecase
#[derive(Debug, PartialEq, Error, Clone)]
pub enum RevocationError {
    #[error("agent error: {0}")]
    AgentError(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

/// Revocation registry states known by the external agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(rename_all = "lowercase")]
pub enum RegistryState {
    Init,
    Generated,
    Published,
    Active,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct CredentialDefinitionRequest {
    pub schema_id: String,
    pub support_revocation: bool,
    pub tag: String,
}

impl CredentialDefinitionRequest {
    pub fn new(schema_id: String, tag: String) -> Self {
        Self {
            schema_id,
            support_revocation: true,
            tag,
        }
    }
}

/// `RegistryOutcome` tells how an active revocation registry has been found
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryOutcome {
    AlreadyActive(Vec<String>),
    Activated(String),

    /// the registry couldn't be activated, issuance with revocation isn't possible yet
    NotAvailable,
}

impl RegistryOutcome {
    pub fn is_available(&self) -> bool {
        !matches!(self, RegistryOutcome::NotAvailable)
    }
}

/// `RevocationAPI` prepares what a credential type needs before it can be issued
///
/// All operations are idempotent. None of them returns an error, the absence of a result means
/// the preparation isn't possible at this time and has already been logged
#[async_trait]
pub trait RevocationAPI: Clone {
    async fn ensure_credential_definition(&self, schema_id: String, tag: String) -> Option<String>;
    async fn ensure_active_revocation_registry(&self, cred_def_id: String) -> RegistryOutcome;

    /// prepare_issuance resolves the definition tag from the schema name, then makes sure the
    /// definition and its active registry exist. The output is the credential definition id
    async fn prepare_issuance(&self, schema_id: String) -> Option<String>;
}

/// `AgentBuilder` is the ledger-facing part of the external agent
///
/// An `Ok(None)` means the agent answered without any usable content
#[async_trait]
pub trait AgentBuilder: Clone + Sync + Send {
    async fn list_credential_definitions(
        &self,
        schema_id: String,
    ) -> Result<Option<Vec<String>>, RevocationError>;

    async fn create_credential_definition(
        &self,
        request: CredentialDefinitionRequest,
    ) -> Result<Option<String>, RevocationError>;

    async fn list_revocation_registries(
        &self,
        cred_def_id: String,
        state: RegistryState,
    ) -> Result<Option<Vec<String>>, RevocationError>;

    async fn create_revocation_registry(
        &self,
        cred_def_id: String,
    ) -> Result<Option<String>, RevocationError>;

    /// update_tails_file_uri returns the tails public `URI` registered by the agent
    async fn update_tails_file_uri(
        &self,
        rev_reg_id: String,
        tails_public_uri: String,
    ) -> Result<Option<String>, RevocationError>;

    async fn publish_revocation_registry(
        &self,
        rev_reg_id: String,
    ) -> Result<Option<String>, RevocationError>;
}

pub trait UsecaseBuilder: RevocationAPI {
    type AgentImplementer: AgentBuilder;

    fn agent(&self) -> &Self::AgentImplementer;
}
