use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct App {
    pub(super) public_host: String,
}

impl App {
    /// get_public_host is the base `URL` other agents use to reach this organization
    pub fn get_public_host(&self) -> String {
        self.public_host.to_owned()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            public_host: "".to_string(),
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        if self.public_host.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:public_host is missing".to_string(),
            ));
        }

        if !self.public_host.starts_with("http://") && !self.public_host.starts_with("https://") {
            return Err(CommonError::ValidationError(
                "config: app:public_host must be an http(s) url".to_string(),
            ));
        }

        Ok(())
    }
}
