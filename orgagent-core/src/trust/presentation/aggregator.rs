use rst_common::standard::chrono::{DateTime, SecondsFormat, Utc};
use rst_common::with_logging::log::debug;

use crate::trust::catalog::types::{CONTEXT_INDY_CREDENTIAL, TYPE_INDY_CREDENTIAL};

use super::credential::IssuedCredential;
use super::document::PublishedDocument;
use super::fragment::VerifiableCredential;
use super::subject::CredentialPayload;
use super::types::{PresentationError, SourceRepoBuilder};

fn issuance_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn fragment_id(id: &str) -> String {
    format!("urn:{}", id)
}

/// `Aggregator` turns every public document and credential into one `VC` fragment
///
/// Documents come first, credentials after them, each group in the order given by the
/// source repository. Any malformed payload fails the whole aggregation.
#[derive(Clone)]
pub struct Aggregator<TSource>
where
    TSource: SourceRepoBuilder,
{
    source: TSource,
}

impl<TSource> Aggregator<TSource>
where
    TSource: SourceRepoBuilder,
{
    pub fn new(source: TSource) -> Self {
        Self { source }
    }

    pub async fn aggregate(
        &self,
        my_did: &str,
    ) -> Result<Vec<VerifiableCredential>, PresentationError> {
        let documents = self.source.list_public_documents().await?;
        let credentials = self.source.list_public_credentials().await?;
        let now = Utc::now();

        let mut fragments = Vec::with_capacity(documents.len() + credentials.len());
        for doc in documents.iter() {
            fragments.push(self.document_fragment(doc, my_did, now)?);
        }

        for cred in credentials.iter() {
            fragments.push(self.credential_fragment(cred, my_did, now).await?);
        }

        debug!(
            "[presentation:aggregate] documents: {} | credentials: {}",
            documents.len(),
            credentials.len()
        );

        Ok(fragments)
    }

    fn document_fragment(
        &self,
        doc: &PublishedDocument,
        my_did: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiableCredential, PresentationError> {
        let kind = doc.get_credential_type();
        let subject = kind
            .shape()
            .document_subject(&doc.document, my_did)
            .map_err(|reason| PresentationError::MalformedPayload {
                source_id: doc.get_id(),
                reason,
            })?;

        let mut fragment =
            VerifiableCredential::new(fragment_id(&doc.id), issuance_date(now), subject);
        fragment
            .add_context(kind.context())
            .add_type(kind.types())
            .set_issuer(my_did.to_string());

        Ok(fragment)
    }

    async fn credential_fragment(
        &self,
        cred: &IssuedCredential,
        my_did: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiableCredential, PresentationError> {
        let malformed = |reason: String| PresentationError::MalformedPayload {
            source_id: cred.get_id(),
            reason,
        };

        let kind = cred.get_credential_type();
        let payload = CredentialPayload::parse(&cred.credential).map_err(malformed)?;
        let subject = kind
            .shape()
            .credential_subject(&cred.credential, &payload, my_did)
            .map_err(malformed)?;

        let indy_issuer = match cred.get_connection_id() {
            Some(connection_id) => self
                .source
                .find_partner_by_connection_id(connection_id)
                .await?
                .and_then(|partner| partner.get_did()),
            None => None,
        };

        let mut context = kind.context();
        context.push(CONTEXT_INDY_CREDENTIAL.to_string());

        let mut types = kind.types();
        types.push(TYPE_INDY_CREDENTIAL.to_string());

        let mut fragment = VerifiableCredential::new(
            fragment_id(&cred.id),
            issuance_date(cred.get_issued_at().unwrap_or(now)),
            subject,
        );
        fragment
            .add_context(context)
            .add_type(types)
            .set_schema_id(payload.schema_id)
            .set_cred_def_id(payload.cred_def_id)
            .set_indy_issuer(indy_issuer);

        Ok(fragment)
    }
}
