use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::debug;

use super::fragment::VerifiablePresentation;
use super::record::lookup;
use super::types::{
    PresentationAPI, PresentationError, RepoBuilder, UsecaseBuilder, VisibilityChange,
};
use super::worker::RebuildHandle;

#[derive(Clone)]
pub struct Usecase<TRepo>
where
    TRepo: RepoBuilder,
{
    repo: TRepo,
    lane: RebuildHandle,
}

impl<TRepo> Usecase<TRepo>
where
    TRepo: RepoBuilder,
{
    pub fn new(repo: TRepo, lane: RebuildHandle) -> Self {
        Self { repo, lane }
    }
}

impl<TRepo> UsecaseBuilder for Usecase<TRepo>
where
    TRepo: RepoBuilder,
{
    type RepoImplementer = TRepo;

    fn repo(&self) -> &Self::RepoImplementer {
        &self.repo
    }

    fn lane(&self) -> &RebuildHandle {
        &self.lane
    }
}

#[async_trait]
impl<TRepo> PresentationAPI for Usecase<TRepo>
where
    TRepo: RepoBuilder,
{
    async fn rebuild_presentation(&self) -> Result<(), PresentationError> {
        let seq = self.lane().submit()?;
        debug!("[presentation:rebuild] intent #{} submitted", seq);
        Ok(())
    }

    async fn rebuild_presentation_and_wait(&self) -> Result<usize, PresentationError> {
        self.lane().submit_and_wait().await
    }

    async fn notify(&self, change: VisibilityChange) -> Result<bool, PresentationError> {
        if !change.affects_presentation() {
            debug!("[presentation:notify] {:?} leaves the public set unchanged", change);
            return Ok(false);
        }

        self.rebuild_presentation().await?;
        Ok(true)
    }

    async fn get_current_presentation(
        &self,
    ) -> Result<Option<VerifiablePresentation>, PresentationError> {
        let record = lookup(self.repo()).await?;
        Ok(record.map(|rec| rec.get_presentation()))
    }
}
