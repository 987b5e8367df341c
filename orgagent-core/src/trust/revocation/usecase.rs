use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{error, info, warn};

use crate::trust::catalog::CredentialType;
use crate::trust::types::{bounded, Lane};

use super::types::{
    AgentBuilder, CredentialDefinitionRequest, RegistryOutcome, RegistryState, RevocationAPI,
    RevocationError, UsecaseBuilder,
};

/// `tails_file_uri` builds the public `URI` the tails file of a registry is served from
pub fn tails_file_uri(public_host: &str, rev_reg_id: &str) -> String {
    format!(
        "{}/revocation/registry/{}/tails-file",
        public_host.trim_end_matches('/'),
        rev_reg_id
    )
}

#[derive(Clone)]
pub struct Usecase<TAgent>
where
    TAgent: AgentBuilder,
{
    agent: TAgent,
    lane: Lane,
    public_host: String,
    timeout: Duration,
}

impl<TAgent> Usecase<TAgent>
where
    TAgent: AgentBuilder,
{
    pub fn new(agent: TAgent, public_host: String, timeout: Duration) -> Self {
        Self {
            agent,
            lane: Lane::new(),
            public_host,
            timeout,
        }
    }

    async fn credential_definition(
        &self,
        schema_id: String,
        tag: String,
    ) -> Result<Option<String>, RevocationError> {
        let existing = bounded(
            self.timeout,
            "list_credential_definitions",
            self.agent.list_credential_definitions(schema_id.clone()),
            RevocationError::Timeout,
        )
        .await?;

        if let Some(cred_def_id) = existing.and_then(|ids| ids.into_iter().next()) {
            info!(
                "[revocation:definition] found existing credential definition: {}",
                cred_def_id
            );
            return Ok(Some(cred_def_id));
        }

        let created = bounded(
            self.timeout,
            "create_credential_definition",
            self.agent
                .create_credential_definition(CredentialDefinitionRequest::new(schema_id, tag)),
            RevocationError::Timeout,
        )
        .await?;

        match &created {
            Some(cred_def_id) => info!(
                "[revocation:definition] created credential definition: {}",
                cred_def_id
            ),
            None => warn!("[revocation:definition] could not create credential definition"),
        }

        Ok(created)
    }

    async fn active_registry(&self, cred_def_id: String) -> Result<RegistryOutcome, RevocationError> {
        let active = bounded(
            self.timeout,
            "list_revocation_registries",
            self.agent
                .list_revocation_registries(cred_def_id.clone(), RegistryState::Active),
            RevocationError::Timeout,
        )
        .await?
        .unwrap_or_default();

        if !active.is_empty() {
            info!("[revocation:registry] found active revocation registry: {:?}", active);
            return Ok(RegistryOutcome::AlreadyActive(active));
        }

        let rev_reg_id = match bounded(
            self.timeout,
            "create_revocation_registry",
            self.agent.create_revocation_registry(cred_def_id.clone()),
            RevocationError::Timeout,
        )
        .await?
        {
            Some(rev_reg_id) => rev_reg_id,
            None => return Ok(RegistryOutcome::NotAvailable),
        };

        let tails_uri = match bounded(
            self.timeout,
            "update_tails_file_uri",
            self.agent.update_tails_file_uri(
                rev_reg_id.clone(),
                tails_file_uri(&self.public_host, &rev_reg_id),
            ),
            RevocationError::Timeout,
        )
        .await?
        {
            Some(tails_uri) => tails_uri,
            None => return Ok(RegistryOutcome::NotAvailable),
        };

        info!("[revocation:registry] tails file public uri: {}", tails_uri);

        let published = bounded(
            self.timeout,
            "publish_revocation_registry",
            self.agent.publish_revocation_registry(rev_reg_id.clone()),
            RevocationError::Timeout,
        )
        .await?;

        if published.is_none() {
            return Ok(RegistryOutcome::NotAvailable);
        }

        info!(
            "[revocation:registry] revocation registry for {} is now active: {}",
            cred_def_id, rev_reg_id
        );
        Ok(RegistryOutcome::Activated(rev_reg_id))
    }

    async fn definition_or_none(&self, schema_id: String, tag: String) -> Option<String> {
        self.credential_definition(schema_id, tag)
            .await
            .unwrap_or_else(|err| {
                error!("[revocation:definition] {}", err);
                None
            })
    }

    async fn registry_or_unavailable(&self, cred_def_id: String) -> RegistryOutcome {
        self.active_registry(cred_def_id)
            .await
            .unwrap_or_else(|err| {
                error!("[revocation:registry] {}", err);
                RegistryOutcome::NotAvailable
            })
    }
}

impl<TAgent> UsecaseBuilder for Usecase<TAgent>
where
    TAgent: AgentBuilder,
{
    type AgentImplementer = TAgent;

    fn agent(&self) -> &Self::AgentImplementer {
        &self.agent
    }
}

#[async_trait]
impl<TAgent> RevocationAPI for Usecase<TAgent>
where
    TAgent: AgentBuilder,
{
    async fn ensure_credential_definition(&self, schema_id: String, tag: String) -> Option<String> {
        if schema_id.is_empty() || tag.is_empty() {
            warn!("[revocation:definition] schema_id and tag are required");
            return None;
        }

        self.lane
            .run(self.definition_or_none(schema_id, tag))
            .await
    }

    async fn ensure_active_revocation_registry(&self, cred_def_id: String) -> RegistryOutcome {
        if cred_def_id.is_empty() {
            warn!("[revocation:registry] cred_def_id is required");
            return RegistryOutcome::NotAvailable;
        }

        self.lane
            .run(self.registry_or_unavailable(cred_def_id))
            .await
    }

    async fn prepare_issuance(&self, schema_id: String) -> Option<String> {
        if schema_id.is_empty() {
            warn!("[revocation:issuance] schema_id is required");
            return None;
        }

        let tag = CredentialType::from_schema_id(&schema_id).tag().to_string();
        self.lane
            .run(async {
                let cred_def_id = self.definition_or_none(schema_id, tag).await?;
                let registry = self.registry_or_unavailable(cred_def_id.clone()).await;

                registry.is_available().then_some(cred_def_id)
            })
            .await
    }
}
