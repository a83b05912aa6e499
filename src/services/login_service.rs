//! Background account lookups and logins.
//!
//! Work runs as tokio tasks on the app runtime; each task reports back over
//! a oneshot channel that the screen polls on every UI tick.

use crate::state::login::{LookupTicket, SubmitTicket};
use crate::steem::{AccountLookup, AuthError, Authenticator, Credential};
use anyhow::Result;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Try to take a finished result off `receiver` without blocking.
fn poll<T>(receiver: &mut oneshot::Receiver<T>, closed: impl FnOnce() -> T) -> Option<T> {
    match receiver.try_recv() {
        Ok(result) => Some(result),
        Err(oneshot::error::TryRecvError::Empty) => None,
        Err(oneshot::error::TryRecvError::Closed) => Some(closed()),
    }
}

/// An in-flight username lookup. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct LookupHandle {
    generation: u64,
    receiver: oneshot::Receiver<Result<Vec<String>>>,
    task: JoinHandle<()>,
}

impl LookupHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn try_recv(&mut self) -> Option<Result<Vec<String>>> {
        poll(&mut self.receiver, || {
            Err(anyhow::anyhow!("Lookup channel closed unexpectedly"))
        })
    }
}

impl Drop for LookupHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// An in-flight login. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct LoginHandle {
    receiver: oneshot::Receiver<Result<Credential, AuthError>>,
    task: JoinHandle<()>,
}

impl LoginHandle {
    pub fn try_recv(&mut self) -> Option<Result<Credential, AuthError>> {
        poll(&mut self.receiver, || {
            Err(AuthError::Rpc("login task ended unexpectedly".to_string()))
        })
    }
}

impl Drop for LoginHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts lookups and logins against the injected platform services.
#[derive(Clone)]
pub struct LoginService {
    runtime: Handle,
    lookup: Arc<dyn AccountLookup>,
    authenticator: Arc<dyn Authenticator>,
}

impl LoginService {
    pub fn new(
        runtime: Handle,
        lookup: Arc<dyn AccountLookup>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            runtime,
            lookup,
            authenticator,
        }
    }

    /// Spawn a lookup for the ticket's username.
    pub fn start_lookup(&self, ticket: LookupTicket) -> LookupHandle {
        let (sender, receiver) = oneshot::channel();
        let lookup = Arc::clone(&self.lookup);
        let LookupTicket {
            generation,
            username,
        } = ticket;

        let task = self.runtime.spawn(async move {
            debug!("Looking up @{} (generation {})", username, generation);
            let result = lookup.lookup_accounts(&username).await;
            if let Err(e) = &result {
                warn!("Account lookup for @{} failed: {:#}", username, e);
            }
            let _ = sender.send(result);
        });

        LookupHandle {
            generation,
            receiver,
            task,
        }
    }

    /// Spawn an authentication. The password never leaves the task.
    pub fn start_login(&self, ticket: SubmitTicket) -> LoginHandle {
        let (sender, receiver) = oneshot::channel();
        let authenticator = Arc::clone(&self.authenticator);

        let task = self.runtime.spawn(async move {
            info!("Logging in as @{}", ticket.username);
            let result = authenticator
                .authenticate(&ticket.username, &ticket.password)
                .await;
            match &result {
                Ok(credential) => info!(
                    "Login succeeded for @{} ({:?})",
                    credential.username, credential.auth_type
                ),
                Err(e) => warn!("Login failed for @{}: {}", ticket.username, e),
            }
            let _ = sender.send(result);
        });

        LoginHandle { receiver, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steem::AuthType;
    use async_trait::async_trait;
    use std::time::Duration;

    struct SlowLookup;

    #[async_trait]
    impl AccountLookup for SlowLookup {
        async fn lookup_accounts(&self, prefix: &str) -> Result<Vec<String>> {
            if prefix == "slow" {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(vec![prefix.to_string()])
        }
    }

    struct FixedAuth;

    #[async_trait]
    impl Authenticator for FixedAuth {
        async fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
            if password == "pw" {
                Ok(Credential::new(username, AuthType::MasterPassword))
            } else {
                Err(AuthError::InvalidCredentials("bad password".into()))
            }
        }
    }

    fn service() -> LoginService {
        LoginService::new(Handle::current(), Arc::new(SlowLookup), Arc::new(FixedAuth))
    }

    async fn wait<T>(mut poll: impl FnMut() -> Option<T>) -> T {
        for _ in 0..200 {
            if let Some(value) = poll() {
                return value;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("task did not finish");
    }

    #[tokio::test]
    async fn test_lookup_reports_result() {
        let mut handle = service().start_lookup(LookupTicket {
            generation: 3,
            username: "alice".into(),
        });
        assert_eq!(handle.generation(), 3);
        let names = wait(|| handle.try_recv()).await.unwrap();
        assert_eq!(names, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_dropping_lookup_aborts_task() {
        let handle = service().start_lookup(LookupTicket {
            generation: 1,
            username: "slow".into(),
        });
        let task = handle.task.abort_handle();
        drop(handle);
        wait(|| task.is_finished().then_some(())).await;
    }

    #[tokio::test]
    async fn test_login_failure_carries_message() {
        let mut handle = service().start_login(SubmitTicket {
            username: "alice".into(),
            password: "wrong".into(),
        });
        let err = wait(|| handle.try_recv()).await.unwrap_err();
        assert!(err.to_string().contains("bad password"));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut handle = service().start_login(SubmitTicket {
            username: "alice".into(),
            password: "pw".into(),
        });
        let credential = wait(|| handle.try_recv()).await.unwrap();
        assert_eq!(credential.username, "alice");
    }
}
