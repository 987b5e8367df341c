use std::fmt;

use super::types::{ConnectionError, ConnectionID};

/// `RemovalStep` lists the cleanup steps of a connection removal, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStep {
    TerminateConnection,
    DeletePartnerProofs,
    DeletePresentationExchanges,
}

impl fmt::Display for RemovalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemovalStep::TerminateConnection => "terminate_connection",
            RemovalStep::DeletePartnerProofs => "delete_partner_proofs",
            RemovalStep::DeletePresentationExchanges => "delete_presentation_exchanges",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStatus {
    Completed,
    Partial,
    Failed,
}

/// `StepOutcome` is the result of one cleanup step, `affected` counts the removed items
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: RemovalStep,
    pub result: Result<usize, ConnectionError>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// `RemovalReport` collects the outcome of every step of a connection removal
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalReport {
    connection_id: ConnectionID,
    steps: Vec<StepOutcome>,
}

impl RemovalReport {
    pub fn new(connection_id: ConnectionID) -> Self {
        Self {
            connection_id,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: RemovalStep, result: Result<usize, ConnectionError>) {
        self.steps.push(StepOutcome { step, result });
    }

    pub fn get_connection_id(&self) -> ConnectionID {
        self.connection_id.to_owned()
    }

    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    pub fn outcome(&self, step: RemovalStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|outcome| outcome.step == step)
    }

    pub fn status(&self) -> RemovalStatus {
        let succeeded = self.steps.iter().filter(|outcome| outcome.is_ok()).count();
        match succeeded {
            _ if succeeded == self.steps.len() => RemovalStatus::Completed,
            0 => RemovalStatus::Failed,
            _ => RemovalStatus::Partial,
        }
    }
}
