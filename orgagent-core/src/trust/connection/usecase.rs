use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{debug, error, info, warn};

use crate::trust::types::{bounded, Lane};

use super::partner::Partner;
use super::removal::{RemovalReport, RemovalStep};
use super::types::{
    AgentBuilder, ConnectionAPI, ConnectionError, ConnectionEvent, ConnectionID,
    InvitationRequest, ReconcileOutcome, RepoPartnerBuilder, RepoProofBuilder, UsecaseBuilder,
};

/// `did_last_segment` keeps the method specific identifier of a fully qualified `DID`
pub fn did_last_segment(did: &str) -> &str {
    did.rsplit(':').next().unwrap_or(did)
}

/// `Usecase` is the connection reconciler
///
/// Every decision that depends on "does this label already have a partner" runs inside one
/// exclusive [`Lane`], shared by all clones of this usecase.
#[derive(Clone)]
pub struct Usecase<TRepoPartner, TRepoProof, TAgent>
where
    TRepoPartner: RepoPartnerBuilder,
    TRepoProof: RepoProofBuilder,
    TAgent: AgentBuilder,
{
    repo_partner: TRepoPartner,
    repo_proof: TRepoProof,
    agent: TAgent,
    lane: Lane,
    did_prefix: String,
    timeout: Duration,
}

impl<TRepoPartner, TRepoProof, TAgent> Usecase<TRepoPartner, TRepoProof, TAgent>
where
    TRepoPartner: RepoPartnerBuilder,
    TRepoProof: RepoProofBuilder,
    TAgent: AgentBuilder,
{
    pub fn new(
        repo_partner: TRepoPartner,
        repo_proof: TRepoProof,
        agent: TAgent,
        did_prefix: String,
        timeout: Duration,
    ) -> Self {
        Self {
            repo_partner,
            repo_proof,
            agent,
            lane: Lane::new(),
            did_prefix,
            timeout,
        }
    }

    async fn reconcile(&self, event: ConnectionEvent) -> Result<ReconcileOutcome, ConnectionError> {
        let found = self.repo_partner.find_by_label(event.label.clone()).await?;

        match found {
            Some(mut partner) => match partner.get_connection_id() {
                None => {
                    partner.assign_connection(event.connection_id.clone(), event.state.clone())?;
                    self.repo_partner.update(&partner).await?;
                    Ok(ReconcileOutcome::Assigned)
                }
                Some(current) => {
                    if current != event.connection_id {
                        warn!(
                            "[connection:event] label {} is bound to {}, ignoring connection id {}",
                            event.label, current, event.connection_id
                        );
                    }

                    self.repo_partner
                        .update_state(partner.get_id(), event.state.clone())
                        .await?;
                    Ok(ReconcileOutcome::StateUpdated)
                }
            },
            None => {
                let partner = Partner::from_event(&event, &self.did_prefix);
                self.repo_partner.save(&partner).await?;
                Ok(ReconcileOutcome::Created)
            }
        }
    }

    async fn terminate_connection(&self, connection_id: ConnectionID) -> Result<usize, ConnectionError> {
        bounded(
            self.timeout,
            "remove_connection",
            self.agent.remove_connection(connection_id),
            ConnectionError::Timeout,
        )
        .await?;

        Ok(1)
    }

    async fn delete_partner_proofs(&self, connection_id: ConnectionID) -> Result<usize, ConnectionError> {
        let partner = match self.repo_partner.find_by_connection_id(connection_id).await? {
            Some(partner) => partner,
            None => return Ok(0),
        };

        let proofs = self.repo_proof.list_by_partner(partner.get_id()).await?;
        if proofs.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = proofs.iter().map(|proof| proof.get_id()).collect();
        let total = ids.len();
        self.repo_proof.remove_proofs(ids).await?;
        Ok(total)
    }

    async fn delete_presentation_exchanges(
        &self,
        connection_id: ConnectionID,
    ) -> Result<usize, ConnectionError> {
        let records = bounded(
            self.timeout,
            "list_presentation_exchanges",
            self.agent.list_presentation_exchanges(),
            ConnectionError::Timeout,
        )
        .await?
        .unwrap_or_default();

        let targets: Vec<String> = records
            .into_iter()
            .filter(|record| record.connection_id == connection_id)
            .map(|record| record.presentation_exchange_id)
            .collect();

        let total = targets.len();
        let mut failed = 0;
        for presentation_exchange_id in targets {
            let removed = bounded(
                self.timeout,
                "remove_presentation_exchange",
                self.agent
                    .remove_presentation_exchange(presentation_exchange_id.clone()),
                ConnectionError::Timeout,
            )
            .await;

            if let Err(err) = removed {
                failed += 1;
                error!(
                    "[connection:remove] could not delete presentation exchange record {}: {}",
                    presentation_exchange_id, err
                );
            }
        }

        if failed > 0 {
            return Err(ConnectionError::AgentError(format!(
                "{} of {} presentation exchange records could not be removed",
                failed, total
            )));
        }

        Ok(total)
    }
}

impl<TRepoPartner, TRepoProof, TAgent> UsecaseBuilder for Usecase<TRepoPartner, TRepoProof, TAgent>
where
    TRepoPartner: RepoPartnerBuilder,
    TRepoProof: RepoProofBuilder,
    TAgent: AgentBuilder,
{
    type RepoPartnerImplementer = TRepoPartner;
    type RepoProofImplementer = TRepoProof;
    type AgentImplementer = TAgent;

    fn repo_partner(&self) -> &Self::RepoPartnerImplementer {
        &self.repo_partner
    }

    fn repo_proof(&self) -> &Self::RepoProofImplementer {
        &self.repo_proof
    }

    fn agent(&self) -> &Self::AgentImplementer {
        &self.agent
    }
}

#[async_trait]
impl<TRepoPartner, TRepoProof, TAgent> ConnectionAPI for Usecase<TRepoPartner, TRepoProof, TAgent>
where
    TRepoPartner: RepoPartnerBuilder,
    TRepoProof: RepoProofBuilder,
    TAgent: AgentBuilder,
{
    async fn handle_connection_event(
        &self,
        event: ConnectionEvent,
    ) -> Result<ReconcileOutcome, ConnectionError> {
        if event.label.is_empty() {
            return Err(ConnectionError::ValidationError(
                "label was missing".to_string(),
            ));
        }

        if event.connection_id.is_empty() {
            return Err(ConnectionError::ValidationError(
                "connection_id was missing".to_string(),
            ));
        }

        debug!(
            "[connection:event] label: {} | connection: {} | state: {}",
            event.label, event.connection_id, event.state
        );

        let label = event.label.clone();
        let outcome = self
            .lane
            .run(bounded(
                self.timeout,
                "handle_connection_event",
                self.reconcile(event),
                ConnectionError::Timeout,
            ))
            .await;

        match &outcome {
            Ok(applied) => info!("[connection:event] label {}: {:?}", label, applied),
            Err(err) => error!("[connection:event] label {} dropped: {}", label, err),
        }

        outcome
    }

    async fn remove_connection(
        &self,
        connection_id: ConnectionID,
    ) -> Result<RemovalReport, ConnectionError> {
        if connection_id.is_empty() {
            return Err(ConnectionError::ValidationError(
                "connection_id was missing".to_string(),
            ));
        }

        debug!("[connection:remove] removing connection: {}", connection_id);

        let mut report = RemovalReport::new(connection_id.clone());
        report.record(
            RemovalStep::TerminateConnection,
            self.terminate_connection(connection_id.clone()).await,
        );
        report.record(
            RemovalStep::DeletePartnerProofs,
            self.delete_partner_proofs(connection_id.clone()).await,
        );
        report.record(
            RemovalStep::DeletePresentationExchanges,
            self.delete_presentation_exchanges(connection_id.clone()).await,
        );

        for outcome in report.steps() {
            if let Err(err) = &outcome.result {
                error!(
                    "[connection:remove] {} failed for {}: {}",
                    outcome.step, connection_id, err
                );
            }
        }

        info!(
            "[connection:remove] connection {} removal: {:?}",
            connection_id,
            report.status()
        );

        Ok(report)
    }

    async fn create_connection(
        &self,
        did: String,
        label: String,
        alias: Option<String>,
    ) -> Result<Option<ConnectionID>, ConnectionError> {
        if did.is_empty() {
            return Err(ConnectionError::ValidationError("did was missing".to_string()));
        }

        if label.is_empty() {
            return Err(ConnectionError::ValidationError(
                "label was missing".to_string(),
            ));
        }

        self.lane
            .run(async {
                let found = self.repo_partner.find_by_label(label.clone()).await?;
                if found.is_none() {
                    let partner = Partner::new(label.clone(), Some(did.clone()), alias.clone());
                    self.repo_partner.save(&partner).await?;
                }

                Ok::<(), ConnectionError>(())
            })
            .await?;

        let request = InvitationRequest {
            did: did_last_segment(&did).to_string(),
            label: label.clone(),
        };

        let received = bounded(
            self.timeout,
            "receive_invitation",
            self.agent.receive_invitation(request, alias),
            ConnectionError::Timeout,
        )
        .await;

        match &received {
            Ok(Some(connection_id)) => info!(
                "[connection:create] invitation for {} accepted, connection: {}",
                label, connection_id
            ),
            Ok(None) => warn!("[connection:create] agent returned no connection for {}", label),
            Err(err) => error!("[connection:create] could not create connection for {}: {}", label, err),
        }

        received
    }
}
