use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

/// `Agent` configures how the external credential-exchange agent is called
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Agent {
    pub(super) did_prefix: String,
    pub(super) timeout_secs: u64,
}

impl Agent {
    pub fn get_did_prefix(&self) -> String {
        self.did_prefix.to_owned()
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            did_prefix: "did:sov:".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ToValidate for Agent {
    fn validate(&self) -> Result<(), CommonError> {
        if !self.did_prefix.starts_with("did:") || !self.did_prefix.ends_with(':') {
            return Err(CommonError::ValidationError(
                "config: agent:did_prefix must look like did:<method>:".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: agent:timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
