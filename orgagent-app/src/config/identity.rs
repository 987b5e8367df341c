use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

/// `Identity` holds the organization's own `DID`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Identity {
    pub(super) did: String,
}

impl Identity {
    pub fn get_did(&self) -> String {
        self.did.to_owned()
    }
}

impl ToValidate for Identity {
    fn validate(&self) -> Result<(), CommonError> {
        if self.did.is_empty() {
            return Err(CommonError::ValidationError(
                "config: identity:did is missing".to_string(),
            ));
        }

        if !self.did.starts_with("did:") {
            return Err(CommonError::ValidationError(
                "config: identity:did is not a did".to_string(),
            ));
        }

        Ok(())
    }
}
