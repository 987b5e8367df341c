use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rst_common::with_tokio::tokio::sync::Mutex;
use rst_common::with_tokio::tokio::time::timeout;

/// `IdentityBuilder` provides the organization's own `DID`
///
/// The identity is assumed to be available once the service has been initialized, that's why
/// this method doesn't return any error
pub trait IdentityBuilder: Clone + Send + Sync {
    fn my_did(&self) -> String;
}

/// `Lane` is an exclusive execution lane
///
/// Tasks submitted through [`Lane::run`] are executed one at a time, in the order they
/// asked for the lane. It's used to guard the single mutable decision points of this domain
/// instead of locking individual records.
#[derive(Clone, Default)]
pub struct Lane {
    gate: Arc<Mutex<()>>,
}

impl Lane {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = self.gate.lock().await;
        task.await
    }
}

/// `bounded` runs a remote call with a time limit
///
/// The external agent and the signer are remote collaborators, none of their calls is allowed
/// to block a caller forever. When the limit is reached, the pending call is dropped and the
/// `on_timeout` constructor builds the domain error from a short description of the operation.
pub async fn bounded<F, T, E>(
    limit: Duration,
    operation: &str,
    call: F,
    on_timeout: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(format!(
            "{} exceeded {}ms",
            operation,
            limit.as_millis()
        ))),
    }
}
