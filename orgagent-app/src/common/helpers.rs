use super::types::{CommonError, ToValidate};

pub fn validate(validator: &impl ToValidate) -> Result<(), CommonError> {
    validator.validate()
}

#[cfg(test)]
pub mod testagent {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    use prople_orgagent_core::trust::connection::{
        AgentBuilder as ConnectionAgentBuilder, ConnectionError, ConnectionID, InvitationRequest,
        PresentationExchangeRecord,
    };
    use prople_orgagent_core::trust::presentation::{
        PresentationError, SignerBuilder, VerifiablePresentation,
    };
    use prople_orgagent_core::trust::revocation::{
        AgentBuilder as RevocationAgentBuilder, CredentialDefinitionRequest, RegistryState,
        RevocationError,
    };

    #[derive(Default, Debug)]
    pub struct Ledger {
        pub cred_defs: HashMap<String, Vec<String>>,
        pub active_registries: HashMap<String, Vec<String>>,
        pub pending_registries: HashMap<String, String>,
        pub exchanges: Vec<PresentationExchangeRecord>,
        pub created_cred_defs: usize,
        pub created_registries: usize,
        pub published_registries: usize,
        pub tails_uris: Vec<String>,
        pub fail_remove_connection: bool,
    }

    /// `FakeAgent` is a stateful stand-in for the external credential-exchange agent
    #[derive(Clone, Default)]
    pub struct FakeAgent {
        pub ledger: Arc<Mutex<Ledger>>,
    }

    impl FakeAgent {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_remove_connection() -> Self {
            let agent = Self::default();
            agent.ledger.lock().unwrap().fail_remove_connection = true;
            agent
        }
    }

    #[async_trait]
    impl ConnectionAgentBuilder for FakeAgent {
        async fn receive_invitation(
            &self,
            request: InvitationRequest,
            _alias: Option<String>,
        ) -> Result<Option<ConnectionID>, ConnectionError> {
            Ok(Some(ConnectionID::from(format!("conn-{}", request.did))))
        }

        async fn remove_connection(
            &self,
            connection_id: ConnectionID,
        ) -> Result<(), ConnectionError> {
            if self.ledger.lock().unwrap().fail_remove_connection {
                return Err(ConnectionError::AgentError(format!(
                    "agent unreachable while removing {}",
                    connection_id
                )));
            }

            Ok(())
        }

        async fn list_presentation_exchanges(
            &self,
        ) -> Result<Option<Vec<PresentationExchangeRecord>>, ConnectionError> {
            Ok(Some(self.ledger.lock().unwrap().exchanges.clone()))
        }

        async fn remove_presentation_exchange(
            &self,
            presentation_exchange_id: String,
        ) -> Result<(), ConnectionError> {
            let mut ledger = self.ledger.lock().unwrap();
            ledger
                .exchanges
                .retain(|record| record.presentation_exchange_id != presentation_exchange_id);
            Ok(())
        }
    }

    #[async_trait]
    impl RevocationAgentBuilder for FakeAgent {
        async fn list_credential_definitions(
            &self,
            schema_id: String,
        ) -> Result<Option<Vec<String>>, RevocationError> {
            Ok(self.ledger.lock().unwrap().cred_defs.get(&schema_id).cloned())
        }

        async fn create_credential_definition(
            &self,
            request: CredentialDefinitionRequest,
        ) -> Result<Option<String>, RevocationError> {
            let mut ledger = self.ledger.lock().unwrap();
            let cred_def_id = format!("{}:3:CL:{}", request.schema_id, request.tag);

            ledger.created_cred_defs += 1;
            ledger
                .cred_defs
                .entry(request.schema_id)
                .or_default()
                .push(cred_def_id.clone());

            Ok(Some(cred_def_id))
        }

        async fn list_revocation_registries(
            &self,
            cred_def_id: String,
            state: RegistryState,
        ) -> Result<Option<Vec<String>>, RevocationError> {
            if state != RegistryState::Active {
                return Ok(None);
            }

            Ok(self
                .ledger
                .lock()
                .unwrap()
                .active_registries
                .get(&cred_def_id)
                .cloned())
        }

        async fn create_revocation_registry(
            &self,
            cred_def_id: String,
        ) -> Result<Option<String>, RevocationError> {
            let mut ledger = self.ledger.lock().unwrap();
            ledger.created_registries += 1;

            let rev_reg_id = format!("{}:CL_ACCUM:{}", cred_def_id, ledger.created_registries);
            ledger
                .pending_registries
                .insert(rev_reg_id.clone(), cred_def_id);

            Ok(Some(rev_reg_id))
        }

        async fn update_tails_file_uri(
            &self,
            _rev_reg_id: String,
            tails_public_uri: String,
        ) -> Result<Option<String>, RevocationError> {
            let mut ledger = self.ledger.lock().unwrap();
            ledger.tails_uris.push(tails_public_uri.clone());
            Ok(Some(tails_public_uri))
        }

        async fn publish_revocation_registry(
            &self,
            rev_reg_id: String,
        ) -> Result<Option<String>, RevocationError> {
            let mut ledger = self.ledger.lock().unwrap();
            let cred_def_id = match ledger.pending_registries.remove(&rev_reg_id) {
                Some(cred_def_id) => cred_def_id,
                None => return Ok(None),
            };

            ledger.published_registries += 1;
            ledger
                .active_registries
                .entry(cred_def_id)
                .or_default()
                .push(rev_reg_id.clone());

            Ok(Some(rev_reg_id))
        }
    }

    /// `FakeSigner` adds a proof after a short delay, enough to let rebuild requests pile up
    #[derive(Clone, Default)]
    pub struct FakeSigner {
        pub signed: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl SignerBuilder for FakeSigner {
        async fn sign(
            &self,
            mut presentation: VerifiablePresentation,
        ) -> Result<VerifiablePresentation, PresentationError> {
            tokio::time::sleep(Duration::from_millis(5)).await;

            let nonce = {
                let mut signed = self.signed.lock().unwrap();
                *signed += 1;
                *signed
            };

            presentation.proof = Some(json!({
                "type": "Ed25519Signature2018",
                "nonce": nonce,
            }));
            Ok(presentation)
        }
    }
}
