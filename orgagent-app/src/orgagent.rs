use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, info};
use rst_common::with_tokio::tokio::task::JoinHandle;

use prople_orgagent_core::trust::connection::{
    AgentBuilder as ConnectionAgentBuilder, Usecase as ConnectionUsecase,
};
use prople_orgagent_core::trust::presentation::{
    channel, Aggregator, IssuedCredential, PresentationAPI, PublishedDocument, Publisher,
    SignerBuilder, Usecase as PresentationUsecase, VisibilityChange, Worker,
};
use prople_orgagent_core::trust::revocation::{
    AgentBuilder as RevocationAgentBuilder, Usecase as RevocationUsecase,
};

use crate::apps::{MemoryStore, StaticIdentity};
use crate::common::helpers;
use crate::common::types::CommonError;
use crate::config::Config;

pub type PresentationService = PresentationUsecase<MemoryStore>;
pub type ConnectionService<TAgent> = ConnectionUsecase<MemoryStore, MemoryStore, TAgent>;
pub type RevocationService<TAgent> = RevocationUsecase<TAgent>;

/// `OrgAgent` wires the trust usecases on top of one [`MemoryStore`]
///
/// Building it spawns the presentation rebuild worker, so it must be built inside a `tokio`
/// runtime. Every visibility mutation goes through this facade, which notifies the
/// presentation domain after the store has been changed.
pub struct OrgAgent<TAgent>
where
    TAgent: ConnectionAgentBuilder + RevocationAgentBuilder + 'static,
{
    store: MemoryStore,
    presentation: PresentationService,
    connection: ConnectionService<TAgent>,
    revocation: RevocationService<TAgent>,
    worker: JoinHandle<()>,
}

impl<TAgent> OrgAgent<TAgent>
where
    TAgent: ConnectionAgentBuilder + RevocationAgentBuilder + 'static,
{
    pub fn build<TSigner>(
        config: &Config,
        store: MemoryStore,
        agent: TAgent,
        signer: TSigner,
    ) -> Result<Self, CommonError>
    where
        TSigner: SignerBuilder + 'static,
    {
        helpers::validate(config)?;

        let timeout = config.agent().get_timeout();
        let identity = StaticIdentity::new(config.identity().get_did());
        let (lane, receiver) = channel(config.presentation().get_queue_capacity());

        let worker = Worker::new(
            Aggregator::new(store.clone()),
            Publisher::new(store.clone(), signer, timeout),
            identity,
            receiver,
        )
        .spawn();

        let presentation = PresentationUsecase::new(store.clone(), lane);
        let connection = ConnectionUsecase::new(
            store.clone(),
            store.clone(),
            agent.clone(),
            config.agent().get_did_prefix(),
            timeout,
        );
        let revocation = RevocationUsecase::new(agent, config.app().get_public_host(), timeout);

        info!(
            "[orgagent] agent ready for {}",
            config.identity().get_did()
        );

        Ok(Self {
            store,
            presentation,
            connection,
            revocation,
            worker,
        })
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn presentation(&self) -> &PresentationService {
        &self.presentation
    }

    pub fn connection(&self) -> &ConnectionService<TAgent> {
        &self.connection
    }

    pub fn revocation(&self) -> &RevocationService<TAgent> {
        &self.revocation
    }

    async fn notify(&self, change: VisibilityChange) -> Result<bool, CommonError> {
        let scheduled = self.presentation.notify(change).await?;
        debug!("[orgagent] {:?}, rebuild scheduled: {}", change, scheduled);
        Ok(scheduled)
    }

    /// The output of every mutation tells if a presentation rebuild has been scheduled
    pub async fn publish_document(&self, document: PublishedDocument) -> Result<bool, CommonError> {
        let change = if document.is_public() {
            VisibilityChange::DocumentPublished
        } else {
            VisibilityChange::DocumentUpdated { is_public: false }
        };

        self.store.add_document(document).await;
        self.notify(change).await
    }

    pub async fn update_document(&self, id: &str, payload: Value) -> Result<bool, CommonError> {
        let is_public = self.store.update_document(id, payload).await?;
        self.notify(VisibilityChange::DocumentUpdated { is_public })
            .await
    }

    pub async fn set_document_visibility(
        &self,
        id: &str,
        is_public: bool,
    ) -> Result<bool, CommonError> {
        let was_public = self.store.set_document_public(id, is_public).await?;
        if was_public == is_public {
            return Ok(false);
        }

        let change = if is_public {
            VisibilityChange::DocumentPublished
        } else {
            VisibilityChange::DocumentUnpublished
        };

        self.notify(change).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<bool, CommonError> {
        let removed = self.store.remove_document(id).await?;
        self.notify(VisibilityChange::DocumentDeleted {
            was_public: removed.is_public(),
        })
        .await
    }

    pub async fn receive_credential(
        &self,
        credential: IssuedCredential,
    ) -> Result<bool, CommonError> {
        let is_public = credential.is_public();
        self.store.add_credential(credential).await;
        self.notify(VisibilityChange::CredentialReceived { is_public })
            .await
    }

    pub async fn set_credential_visibility(
        &self,
        id: &str,
        is_public: bool,
    ) -> Result<bool, CommonError> {
        let was_public = self.store.set_credential_public(id, is_public).await?;
        if was_public == is_public {
            return Ok(false);
        }

        self.notify(VisibilityChange::CredentialVisibilityChanged)
            .await
    }

    pub async fn delete_credential(&self, id: &str) -> Result<bool, CommonError> {
        let removed = self.store.remove_credential(id).await?;
        self.notify(VisibilityChange::CredentialDeleted {
            was_public: removed.is_public(),
        })
        .await
    }

    /// shutdown closes the rebuild lane and waits until the queued rebuilds are done.
    /// Clones of the presentation usecase keep the lane open, they must be dropped first
    pub async fn shutdown(self) -> Result<(), CommonError> {
        let worker = self.worker;
        drop(self.presentation);

        worker
            .await
            .map_err(|err| CommonError::DomainError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    use prople_orgagent_core::trust::catalog::types::{TYPE_BANK_ACCOUNT, TYPE_VC};
    use prople_orgagent_core::trust::catalog::CredentialType;
    use prople_orgagent_core::trust::connection::{
        ConnectionAPI, ConnectionEvent, ConnectionID, PartnerProof, PresentationExchangeRecord,
        RemovalStatus, RemovalStep,
    };
    use prople_orgagent_core::trust::presentation::{
        PresentationError, PresentationRecord, RepoBuilder, VerifiablePresentation,
    };
    use prople_orgagent_core::trust::revocation::RevocationAPI;

    use crate::common::helpers::testagent::{FakeAgent, FakeSigner};
    use crate::config::Parser;

    const MY_DID: &str = "did:sov:CHysca6fY8n8ytCDLAJGZj";

    fn fixture_config() -> Config {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        let toml_file = format!("{}/config.toml", path.display());
        Parser::new(toml_file).parse().unwrap()
    }

    fn build_agent(agent: FakeAgent) -> OrgAgent<FakeAgent> {
        OrgAgent::build(&fixture_config(), MemoryStore::new(), agent, FakeSigner::default()).unwrap()
    }

    fn bank_document() -> PublishedDocument {
        PublishedDocument::new(
            CredentialType::BankAccount,
            json!({"iban": "DE89370400440532013000", "bic": "COBADEFFXXX"}),
            true,
        )
        .with_id("doc-1")
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_config() {
        let output = OrgAgent::build(
            &Config::default(),
            MemoryStore::new(),
            FakeAgent::new(),
            FakeSigner::default(),
        );

        assert!(matches!(output, Err(CommonError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_bank_account_presentation() {
        let orgagent = build_agent(FakeAgent::new());

        let scheduled = orgagent.publish_document(bank_document()).await.unwrap();
        assert!(scheduled);

        let published = orgagent
            .presentation()
            .rebuild_presentation_and_wait()
            .await
            .unwrap();
        assert_eq!(published, 1);

        let vp = orgagent
            .presentation()
            .get_current_presentation()
            .await
            .unwrap()
            .unwrap();
        assert!(vp.is_signed());
        assert_eq!(vp.verifiable_credential.len(), 1);

        let vc = &vp.verifiable_credential[0];
        assert_eq!(vc.id, "urn:doc-1");
        assert_eq!(vc.types, vec![TYPE_VC, TYPE_BANK_ACCOUNT]);
        assert_eq!(vc.credential_subject["id"], json!(MY_DID));
        assert_eq!(
            vc.credential_subject["bankAccount"]["iban"],
            json!("DE89370400440532013000")
        );
    }

    #[tokio::test]
    async fn test_presentation_covers_every_public_source() {
        let orgagent = build_agent(FakeAgent::new());

        orgagent.publish_document(bank_document()).await.unwrap();
        orgagent
            .publish_document(
                PublishedDocument::new(
                    CredentialType::OrganizationalProfile,
                    json!({"legalName": "Acme Corp"}),
                    true,
                )
                .with_id("doc-2"),
            )
            .await
            .unwrap();

        let private = orgagent
            .publish_document(
                PublishedDocument::new(CredentialType::Other, json!({"note": "internal"}), false)
                    .with_id("doc-3"),
            )
            .await
            .unwrap();
        assert!(!private);

        let mut credential = IssuedCredential::new(
            CredentialType::Other,
            json!({
                "schema_id": "F6dB7dMVHUQSC64qemnBi7:2:commercial_register:1.0",
                "cred_def_id": "F6dB7dMVHUQSC64qemnBi7:3:CL:42:other",
                "attrs": {"registrationNumber": "HRB 1234"}
            }),
        )
        .with_id("cred-1");
        credential.set_public(true);
        orgagent.receive_credential(credential).await.unwrap();

        let published = orgagent
            .presentation()
            .rebuild_presentation_and_wait()
            .await
            .unwrap();
        assert_eq!(published, 3);

        let vp = orgagent
            .presentation()
            .get_current_presentation()
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<String> = vp
            .verifiable_credential
            .iter()
            .map(|vc| vc.id.clone())
            .collect();
        assert_eq!(ids, vec!["urn:doc-1", "urn:doc-2", "urn:cred-1"]);
    }

    #[tokio::test]
    async fn test_latest_visibility_wins() {
        let orgagent = build_agent(FakeAgent::new());

        orgagent.publish_document(bank_document()).await.unwrap();
        orgagent
            .set_document_visibility("doc-1", false)
            .await
            .unwrap();
        orgagent.set_document_visibility("doc-1", true).await.unwrap();
        let unchanged = orgagent.set_document_visibility("doc-1", true).await.unwrap();
        assert!(!unchanged);

        orgagent
            .set_document_visibility("doc-1", false)
            .await
            .unwrap();

        let published = orgagent
            .presentation()
            .rebuild_presentation_and_wait()
            .await
            .unwrap();
        assert_eq!(published, 0);

        let vp = orgagent
            .presentation()
            .get_current_presentation()
            .await
            .unwrap()
            .unwrap();
        assert!(vp.verifiable_credential.is_empty());
        assert!(vp.is_signed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_presentation_under_repeated_rebuilds() {
        let orgagent = build_agent(FakeAgent::new());
        orgagent.publish_document(bank_document()).await.unwrap();

        let mut handles = Vec::new();
        for idx in 0..20 {
            let presentation = orgagent.presentation().clone();
            handles.push(tokio::spawn(async move {
                if idx % 2 == 0 {
                    presentation.rebuild_presentation_and_wait().await.map(|_| ())
                } else {
                    presentation.rebuild_presentation().await
                }
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        orgagent
            .presentation()
            .rebuild_presentation_and_wait()
            .await
            .unwrap();

        assert_eq!(orgagent.store().count_presentations().await, Ok(1));
        let vp = orgagent
            .presentation()
            .get_current_presentation()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(vp.verifiable_credential.len(), 1);
    }

    #[tokio::test]
    async fn test_singleton_violation_closes_rebuild_lane() {
        let orgagent = build_agent(FakeAgent::new());
        let stale = PresentationRecord::new(VerifiablePresentation::new(vec![]));

        orgagent.store().put_presentation("imported-1", stale.clone()).await;
        orgagent.store().put_presentation("imported-2", stale).await;

        let output = orgagent.presentation().rebuild_presentation_and_wait().await;
        assert!(matches!(output, Err(PresentationError::SingletonViolation(_))));

        let current = orgagent.presentation().get_current_presentation().await;
        assert!(matches!(current, Err(PresentationError::SingletonViolation(_))));

        let next = orgagent.publish_document(bank_document()).await;
        assert!(matches!(next, Err(CommonError::DomainError(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_events_create_one_partner() {
        let orgagent = build_agent(FakeAgent::new());

        let mut handles = Vec::new();
        for state in ["request", "response", "active", "active", "response", "active"] {
            let connection = orgagent.connection().clone();
            handles.push(tokio::spawn(async move {
                connection
                    .handle_connection_event(ConnectionEvent::new(
                        "partner-X",
                        "conn-9",
                        state,
                        Some("Hx7nE4qLrS"),
                    ))
                    .await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        let partners = orgagent.store().list_partners().await;
        assert_eq!(partners.len(), 1);
        assert_eq!(
            partners[0].get_connection_id(),
            Some(ConnectionID::from("conn-9".to_string()))
        );
        assert_eq!(partners[0].get_did(), Some("did:sov:Hx7nE4qLrS".to_string()));
    }

    #[tokio::test]
    async fn test_replayed_event_is_idempotent() {
        let orgagent = build_agent(FakeAgent::new());
        let event = ConnectionEvent::new("partner-X", "conn-9", "active", None);

        orgagent
            .connection()
            .handle_connection_event(event.clone())
            .await
            .unwrap();
        let first = orgagent.store().list_partners().await;

        orgagent
            .connection()
            .handle_connection_event(event)
            .await
            .unwrap();
        let second = orgagent.store().list_partners().await;

        assert_eq!(second.len(), 1);
        assert_eq!(first[0].get_id(), second[0].get_id());
        assert_eq!(first[0].get_state(), second[0].get_state());
        assert_eq!(first[0].get_connection_id(), second[0].get_connection_id());
    }

    #[tokio::test]
    async fn test_out_of_band_partner_gets_its_connection() {
        let orgagent = build_agent(FakeAgent::new());

        let connection_id = orgagent
            .connection()
            .create_connection(
                "did:sov:F6dB7dMVHUQSC64qemnBi7".to_string(),
                "Bank AG".to_string(),
                Some("bank".to_string()),
            )
            .await
            .unwrap()
            .unwrap();

        orgagent
            .connection()
            .handle_connection_event(ConnectionEvent::new(
                "Bank AG",
                connection_id.value(),
                "response",
                Some("F6dB7dMVHUQSC64qemnBi7"),
            ))
            .await
            .unwrap();

        let partners = orgagent.store().list_partners().await;
        assert_eq!(partners.len(), 1);
        assert!(!partners[0].is_incoming());
        assert_eq!(partners[0].get_connection_id(), Some(connection_id));
        assert_eq!(partners[0].get_state(), Some("response".to_string()));
    }

    #[tokio::test]
    async fn test_removal_deletes_proofs_when_agent_fails() {
        let agent = FakeAgent::failing_remove_connection();
        agent.ledger.lock().unwrap().exchanges = vec![
            PresentationExchangeRecord {
                presentation_exchange_id: "pres-1".to_string(),
                connection_id: ConnectionID::from("conn-9".to_string()),
                state: None,
            },
            PresentationExchangeRecord {
                presentation_exchange_id: "pres-2".to_string(),
                connection_id: ConnectionID::from("conn-3".to_string()),
                state: None,
            },
        ];

        let orgagent = build_agent(agent.clone());
        orgagent
            .connection()
            .handle_connection_event(ConnectionEvent::new("partner-X", "conn-9", "active", None))
            .await
            .unwrap();

        let partner_id = orgagent.store().list_partners().await[0].get_id();
        orgagent
            .store()
            .add_proof(PartnerProof::new(partner_id.clone(), Some("pres-1".to_string())))
            .await;
        orgagent
            .store()
            .add_proof(PartnerProof::new(partner_id, None))
            .await;

        let report = orgagent
            .connection()
            .remove_connection(ConnectionID::from("conn-9".to_string()))
            .await
            .unwrap();

        assert_eq!(report.status(), RemovalStatus::Partial);
        assert!(!report
            .outcome(RemovalStep::TerminateConnection)
            .unwrap()
            .is_ok());
        assert_eq!(
            report.outcome(RemovalStep::DeletePartnerProofs).unwrap().result,
            Ok(2)
        );
        assert_eq!(
            report
                .outcome(RemovalStep::DeletePresentationExchanges)
                .unwrap()
                .result,
            Ok(1)
        );

        assert!(orgagent.store().list_proofs().await.is_empty());
        let exchanges = agent.ledger.lock().unwrap().exchanges.clone();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].presentation_exchange_id, "pres-2");
    }

    #[tokio::test]
    async fn test_issuance_preparation_is_idempotent() {
        let agent = FakeAgent::new();
        let orgagent = build_agent(agent.clone());
        let schema_id = "CHysca6fY8n8ytCDLAJGZj:2:bank_account:1.0".to_string();

        let first = orgagent
            .revocation()
            .prepare_issuance(schema_id.clone())
            .await;
        let second = orgagent.revocation().prepare_issuance(schema_id).await;

        assert!(first.is_some());
        assert_eq!(first, second);

        let ledger = agent.ledger.lock().unwrap();
        assert_eq!(ledger.created_cred_defs, 1);
        assert_eq!(ledger.created_registries, 1);
        assert_eq!(ledger.published_registries, 1);
        assert_eq!(ledger.tails_uris.len(), 1);
        assert!(ledger.tails_uris[0].starts_with("https://agent.example.org/revocation/registry/"));
        assert!(ledger.tails_uris[0].ends_with("/tails-file"));
        assert!(first.unwrap_or_default().ends_with(":bank_account"));
    }

    #[tokio::test]
    async fn test_shutdown_drains_rebuild_lane() {
        let orgagent = build_agent(FakeAgent::new());
        orgagent.publish_document(bank_document()).await.unwrap();

        let store = orgagent.store().clone();
        assert!(orgagent.shutdown().await.is_ok());
        assert_eq!(store.count_presentations().await, Ok(1));
    }
}
