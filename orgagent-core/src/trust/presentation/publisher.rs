use std::time::Duration;

use rst_common::with_logging::log::{debug, info};

use crate::trust::types::bounded;

use super::fragment::{VerifiableCredential, VerifiablePresentation};
use super::record::{lookup, PresentationRecord};
use super::types::{PresentationError, RepoBuilder, SignerBuilder};

/// `Publisher` signs a set of fragments and stores the result as the organization's only
/// presentation
///
/// It performs a read-modify-write on the stored record, so it must only be driven by one
/// caller at a time. The rebuild worker is that caller.
#[derive(Clone)]
pub struct Publisher<TRepo, TSigner>
where
    TRepo: RepoBuilder,
    TSigner: SignerBuilder,
{
    repo: TRepo,
    signer: TSigner,
    timeout: Duration,
}

impl<TRepo, TSigner> Publisher<TRepo, TSigner>
where
    TRepo: RepoBuilder,
    TSigner: SignerBuilder,
{
    pub fn new(repo: TRepo, signer: TSigner, timeout: Duration) -> Self {
        Self {
            repo,
            signer,
            timeout,
        }
    }

    pub async fn publish(
        &self,
        fragments: Vec<VerifiableCredential>,
    ) -> Result<PresentationRecord, PresentationError> {
        let unsigned = VerifiablePresentation::new(fragments);
        let signed = bounded(
            self.timeout,
            "sign",
            self.signer.sign(unsigned),
            PresentationError::Timeout,
        )
        .await?;

        match lookup(&self.repo).await? {
            Some(mut record) => {
                record.replace(signed);
                self.repo.update_presentation(&record).await?;

                debug!("[presentation:publish] stored presentation updated");
                Ok(record)
            }
            None => {
                let record = PresentationRecord::new(signed);
                self.repo.save_presentation(&record).await?;

                info!("[presentation:publish] first presentation stored");
                Ok(record)
            }
        }
    }
}
