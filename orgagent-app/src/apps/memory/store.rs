use std::collections::HashMap;
use std::sync::Arc;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_tokio::tokio::sync::RwLock;

use prople_orgagent_core::trust::connection::{
    ConnectionError, ConnectionID, Partner, PartnerProof, RepoPartnerBuilder, RepoProofBuilder,
};
use prople_orgagent_core::trust::presentation::{
    IssuedCredential, PresentationError, PresentationRecord, PublishedDocument,
    RepoBuilder as PresentationRepoBuilder, SourceRepoBuilder,
};

use crate::common::types::CommonError;

#[derive(Default)]
struct State {
    documents: Vec<PublishedDocument>,
    credentials: Vec<IssuedCredential>,
    partners: Vec<Partner>,
    proofs: Vec<PartnerProof>,
    presentations: HashMap<String, PresentationRecord>,
}

/// `MemoryStore` is the reference storage of the organizational agent
///
/// It keeps every record in memory and implements all repository traits of the trust domain.
/// Records keep their insertion order, which is the order used to aggregate the presentation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_document(&self, document: PublishedDocument) {
        self.state.write().await.documents.push(document);
    }

    /// set_document_public returns the previous visibility of the document
    pub async fn set_document_public(&self, id: &str, is_public: bool) -> Result<bool, CommonError> {
        let mut state = self.state.write().await;
        let document = state
            .documents
            .iter_mut()
            .find(|doc| doc.get_id() == id)
            .ok_or_else(|| CommonError::StoreError(format!("document not found: {}", id)))?;

        let was_public = document.is_public();
        document.set_public(is_public);
        Ok(was_public)
    }

    /// update_document replaces the document payload and returns its visibility
    pub async fn update_document(&self, id: &str, payload: Value) -> Result<bool, CommonError> {
        let mut state = self.state.write().await;
        let document = state
            .documents
            .iter_mut()
            .find(|doc| doc.get_id() == id)
            .ok_or_else(|| CommonError::StoreError(format!("document not found: {}", id)))?;

        document.set_document(payload);
        Ok(document.is_public())
    }

    pub async fn remove_document(&self, id: &str) -> Result<PublishedDocument, CommonError> {
        let mut state = self.state.write().await;
        let position = state
            .documents
            .iter()
            .position(|doc| doc.get_id() == id)
            .ok_or_else(|| CommonError::StoreError(format!("document not found: {}", id)))?;

        Ok(state.documents.remove(position))
    }

    pub async fn add_credential(&self, credential: IssuedCredential) {
        self.state.write().await.credentials.push(credential);
    }

    pub async fn set_credential_public(
        &self,
        id: &str,
        is_public: bool,
    ) -> Result<bool, CommonError> {
        let mut state = self.state.write().await;
        let credential = state
            .credentials
            .iter_mut()
            .find(|cred| cred.get_id() == id)
            .ok_or_else(|| CommonError::StoreError(format!("credential not found: {}", id)))?;

        let was_public = credential.is_public();
        credential.set_public(is_public);
        Ok(was_public)
    }

    pub async fn remove_credential(&self, id: &str) -> Result<IssuedCredential, CommonError> {
        let mut state = self.state.write().await;
        let position = state
            .credentials
            .iter()
            .position(|cred| cred.get_id() == id)
            .ok_or_else(|| CommonError::StoreError(format!("credential not found: {}", id)))?;

        Ok(state.credentials.remove(position))
    }

    pub async fn add_proof(&self, proof: PartnerProof) {
        self.state.write().await.proofs.push(proof);
    }

    pub async fn list_partners(&self) -> Vec<Partner> {
        self.state.read().await.partners.clone()
    }

    pub async fn list_proofs(&self) -> Vec<PartnerProof> {
        self.state.read().await.proofs.clone()
    }

    /// put_presentation stores a record under any key, bypassing the publisher
    pub async fn put_presentation(&self, key: &str, record: PresentationRecord) {
        self.state
            .write()
            .await
            .presentations
            .insert(key.to_string(), record);
    }
}

#[async_trait]
impl SourceRepoBuilder for MemoryStore {
    async fn list_public_documents(&self) -> Result<Vec<PublishedDocument>, PresentationError> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .iter()
            .filter(|doc| doc.is_public())
            .cloned()
            .collect())
    }

    async fn list_public_credentials(&self) -> Result<Vec<IssuedCredential>, PresentationError> {
        let state = self.state.read().await;
        Ok(state
            .credentials
            .iter()
            .filter(|cred| cred.is_public())
            .cloned()
            .collect())
    }

    async fn find_partner_by_connection_id(
        &self,
        connection_id: ConnectionID,
    ) -> Result<Option<Partner>, PresentationError> {
        let state = self.state.read().await;
        Ok(state
            .partners
            .iter()
            .find(|partner| partner.get_connection_id() == Some(connection_id.clone()))
            .cloned())
    }
}

#[async_trait]
impl PresentationRepoBuilder for MemoryStore {
    async fn count_presentations(&self) -> Result<usize, PresentationError> {
        Ok(self.state.read().await.presentations.len())
    }

    async fn get_presentation(
        &self,
        key: String,
    ) -> Result<Option<PresentationRecord>, PresentationError> {
        Ok(self.state.read().await.presentations.get(&key).cloned())
    }

    async fn save_presentation(&self, record: &PresentationRecord) -> Result<(), PresentationError> {
        let mut state = self.state.write().await;
        if state.presentations.contains_key(&record.get_key()) {
            return Err(PresentationError::RepoError(format!(
                "presentation already exists: {}",
                record.get_key()
            )));
        }

        state
            .presentations
            .insert(record.get_key(), record.to_owned());
        Ok(())
    }

    async fn update_presentation(
        &self,
        record: &PresentationRecord,
    ) -> Result<(), PresentationError> {
        let mut state = self.state.write().await;
        let stored = state
            .presentations
            .get_mut(&record.get_key())
            .ok_or_else(|| {
                PresentationError::RepoError(format!(
                    "presentation not found: {}",
                    record.get_key()
                ))
            })?;

        *stored = record.to_owned();
        Ok(())
    }
}

#[async_trait]
impl RepoPartnerBuilder for MemoryStore {
    async fn find_by_label(&self, label: String) -> Result<Option<Partner>, ConnectionError> {
        let state = self.state.read().await;
        Ok(state
            .partners
            .iter()
            .find(|partner| partner.get_label() == label)
            .cloned())
    }

    async fn find_by_connection_id(
        &self,
        connection_id: ConnectionID,
    ) -> Result<Option<Partner>, ConnectionError> {
        let state = self.state.read().await;
        Ok(state
            .partners
            .iter()
            .find(|partner| partner.get_connection_id() == Some(connection_id.clone()))
            .cloned())
    }

    async fn save(&self, partner: &Partner) -> Result<(), ConnectionError> {
        self.state.write().await.partners.push(partner.to_owned());
        Ok(())
    }

    async fn update(&self, partner: &Partner) -> Result<(), ConnectionError> {
        let mut state = self.state.write().await;
        let stored = state
            .partners
            .iter_mut()
            .find(|stored| stored.get_id() == partner.get_id())
            .ok_or_else(|| {
                ConnectionError::EntityError(format!("partner not found: {}", partner.get_id()))
            })?;

        *stored = partner.to_owned();
        Ok(())
    }

    async fn update_state(&self, id: String, state: String) -> Result<(), ConnectionError> {
        let mut store = self.state.write().await;
        let stored = store
            .partners
            .iter_mut()
            .find(|stored| stored.get_id() == id)
            .ok_or_else(|| ConnectionError::EntityError(format!("partner not found: {}", id)))?;

        stored.set_state(state);
        Ok(())
    }
}

#[async_trait]
impl RepoProofBuilder for MemoryStore {
    async fn list_by_partner(&self, partner_id: String) -> Result<Vec<PartnerProof>, ConnectionError> {
        let state = self.state.read().await;
        Ok(state
            .proofs
            .iter()
            .filter(|proof| proof.get_partner_id() == partner_id)
            .cloned()
            .collect())
    }

    async fn remove_proofs(&self, ids: Vec<String>) -> Result<(), ConnectionError> {
        let mut state = self.state.write().await;
        state.proofs.retain(|proof| !ids.contains(&proof.get_id()));
        Ok(())
    }
}
