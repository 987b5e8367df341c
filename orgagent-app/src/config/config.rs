use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{Agent, App, Identity, Presentation};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) app: App,
    pub(super) identity: Identity,

    #[serde(default)]
    pub(super) agent: Agent,

    #[serde(default)]
    pub(super) presentation: Presentation,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        self.app.validate()?;
        self.identity.validate()?;
        self.agent.validate()?;
        self.presentation.validate()?;

        Ok(())
    }
}
