use prople_orgagent_core::trust::types::IdentityBuilder;

/// `StaticIdentity` serves the organization's `DID` loaded from the configuration
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    did: String,
}

impl StaticIdentity {
    pub fn new(did: String) -> Self {
        Self { did }
    }
}

impl IdentityBuilder for StaticIdentity {
    fn my_did(&self) -> String {
        self.did.to_owned()
    }
}
