//! Fire-and-forget settings changes.
//!
//! Mutations run on a short-lived thread so a slow `warp-cli` never freezes
//! the UI. The only feedback is a [`Message::MutationFinished`]; the new state
//! itself is picked up by the next poll.

use std::sync::mpsc::Sender;
use std::thread;

use crate::message::Message;
use crate::warp::{Mutation, WarpClient};

/// Apply `mutation` in the background and report back on `tx`.
pub fn spawn_mutation(client: &WarpClient, mutation: Mutation, tx: Sender<Message>) {
    let client = client.clone();
    thread::spawn(move || {
        let error = client.apply(mutation).err();
        if let Some(e) = &error {
            crate::log_error!("WARP", "{e}");
        } else {
            crate::log_info!("WARP", "Requested {}", mutation.describe());
        }
        let _ = tx.send(Message::MutationFinished { mutation, error });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use crate::state::Mode;
    use crate::warp::runner::MockCommandRunner;
    use crate::warp::RunError;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    fn client(mock: MockCommandRunner) -> WarpClient {
        WarpClient::new(
            Arc::new(mock),
            Duration::from_secs(constants::DEFAULT_QUERY_TIMEOUT_SECS),
            Duration::from_secs(constants::DEFAULT_MUTATION_TIMEOUT_SECS),
        )
    }

    #[test]
    fn test_success_reports_no_error() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|args, _| args == &["mode".to_string(), "doh".to_string()])
            .times(1)
            .returning(|_, _| Ok("Success\n".into()));

        let (tx, rx) = mpsc::channel();
        spawn_mutation(&client(mock), Mutation::SetMode(Mode::Doh), tx);

        match rx.recv_timeout(Duration::from_secs(3)).unwrap() {
            Message::MutationFinished { mutation, error } => {
                assert_eq!(mutation, Mutation::SetMode(Mode::Doh));
                assert_eq!(error, None);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_failure_is_reported_once() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .times(1)
            .returning(|_, _| Err(RunError::Failed("boom".into())));

        let (tx, rx) = mpsc::channel();
        spawn_mutation(&client(mock), Mutation::Connect, tx);

        match rx.recv_timeout(Duration::from_secs(3)).unwrap() {
            Message::MutationFinished { error, .. } => {
                assert_eq!(error.as_deref(), Some("Failed to connect: boom"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        // No retry: the channel closes once the worker thread exits.
        assert!(rx.recv_timeout(Duration::from_secs(3)).is_err());
    }
}
