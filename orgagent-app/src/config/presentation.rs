use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Presentation {
    pub(super) queue_capacity: usize,
}

impl Presentation {
    /// get_queue_capacity is the number of rebuild intents allowed to wait for the worker
    pub fn get_queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self { queue_capacity: 16 }
    }
}

impl ToValidate for Presentation {
    fn validate(&self) -> Result<(), CommonError> {
        if self.queue_capacity == 0 {
            return Err(CommonError::ValidationError(
                "config: presentation:queue_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
