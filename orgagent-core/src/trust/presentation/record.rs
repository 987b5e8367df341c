use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::fragment::VerifiablePresentation;
use super::types::{PresentationError, RepoBuilder, SINGLE_PRESENTATION_KEY};

/// `PresentationRecord` is the stored, signed presentation of the organization
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct PresentationRecord {
    pub(crate) key: String,
    pub(crate) presentation: VerifiablePresentation,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl PresentationRecord {
    pub fn new(presentation: VerifiablePresentation) -> Self {
        Self {
            key: SINGLE_PRESENTATION_KEY.to_string(),
            presentation,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn replace(&mut self, presentation: VerifiablePresentation) {
        self.presentation = presentation;
        self.updated_at = Utc::now();
    }

    pub fn get_key(&self) -> String {
        self.key.to_owned()
    }

    pub fn get_presentation(&self) -> VerifiablePresentation {
        self.presentation.to_owned()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }

    pub fn get_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.to_owned()
    }
}

impl ToJSON for PresentationRecord {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for PresentationRecord {
    type Error = PresentationError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(&self).map_err(|err| PresentationError::RepoError(err.to_string()))
    }
}

impl TryFrom<Vec<u8>> for PresentationRecord {
    type Error = PresentationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        serde_json::from_slice(&value).map_err(|err| PresentationError::RepoError(err.to_string()))
    }
}

/// `lookup` loads the singleton presentation record
///
/// More than one stored row, or one row living outside the well-known key, is reported as
/// [`PresentationError::SingletonViolation`] and never as an absent presentation.
pub async fn lookup<TRepo>(repo: &TRepo) -> Result<Option<PresentationRecord>, PresentationError>
where
    TRepo: RepoBuilder,
{
    let total = repo.count_presentations().await?;
    match total {
        0 => Ok(None),
        1 => repo
            .get_presentation(SINGLE_PRESENTATION_KEY.to_string())
            .await?
            .map(Some)
            .ok_or_else(|| {
                PresentationError::SingletonViolation(format!(
                    "stored presentation is not addressed by {}",
                    SINGLE_PRESENTATION_KEY
                ))
            }),
        _ => Err(PresentationError::SingletonViolation(format!(
            "{} presentations stored",
            total
        ))),
    }
}
