// ABOUTME: Refresh coordination state: renewal gate, renewal epoch, and the pending replay queue
// ABOUTME: All transitions happen under one short lock that is never held across an await

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

use super::{ApiRequest, ApiResponse};
use crate::errors::AppResult;

/// Whether a renewal call is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No renewal in flight; the next authorization failure starts one
    Idle,
    /// A renewal is in flight; authorization failures queue behind it
    Refreshing,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Refreshing => write!(f, "refreshing"),
        }
    }
}

/// A request waiting for the renewal outcome
pub(crate) struct PendingReplay {
    pub(crate) ticket: u64,
    pub(crate) request: ApiRequest,
    pub(crate) responder: oneshot::Sender<AppResult<ApiResponse>>,
}

/// Outcome of reporting an authorization failure to the coordinator
pub(crate) enum Admission {
    /// A renewal completed after the request was sent; replay it right away
    ReplayNow(ApiRequest),
    /// Queued behind a renewal
    Queued {
        ticket: u64,
        receiver: oneshot::Receiver<AppResult<ApiResponse>>,
        /// The caller moved the coordinator to `Refreshing` and must start the renewal
        start_renewal: bool,
    },
}

struct CoordinatorState {
    state: RefreshState,
    epoch: u64,
    next_ticket: u64,
    queue: VecDeque<PendingReplay>,
}

/// Serializes token renewal across every request of one client
pub(crate) struct RefreshCoordinator {
    inner: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    pub(crate) const fn new() -> Self {
        Self {
            inner: Mutex::new(CoordinatorState {
                state: RefreshState::Idle,
                epoch: 0,
                next_ticket: 0,
                queue: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        // The state stays consistent across a panicking holder: every
        // transition is a plain field assignment
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of completed renewals; recorded by each request when it is sent
    pub(crate) fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    pub(crate) fn state(&self) -> RefreshState {
        self.lock().state
    }

    pub(crate) fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Report an authorization failure of a request sent during `sent_epoch`
    pub(crate) fn admit(&self, request: ApiRequest, sent_epoch: u64) -> Admission {
        let mut guard = self.lock();

        if guard.state == RefreshState::Idle && guard.epoch != sent_epoch {
            return Admission::ReplayNow(request);
        }

        let start_renewal = guard.state == RefreshState::Idle;
        guard.state = RefreshState::Refreshing;

        let ticket = guard.next_ticket;
        guard.next_ticket += 1;

        let (responder, receiver) = oneshot::channel();
        guard.queue.push_back(PendingReplay {
            ticket,
            request,
            responder,
        });

        Admission::Queued {
            ticket,
            receiver,
            start_renewal,
        }
    }

    /// Drop a queued request whose caller went away
    pub(crate) fn withdraw(&self, ticket: u64) {
        self.lock().queue.retain(|pending| pending.ticket != ticket);
    }

    /// Renewal succeeded and the new tokens are installed: advance the epoch,
    /// return to `Idle`, and hand over the queue in enqueue order
    pub(crate) fn renewal_succeeded(&self) -> VecDeque<PendingReplay> {
        let mut guard = self.lock();
        guard.epoch += 1;
        guard.state = RefreshState::Idle;
        std::mem::take(&mut guard.queue)
    }

    /// Renewal failed and the session is gone: return to `Idle` and hand over the queue
    pub(crate) fn renewal_failed(&self) -> VecDeque<PendingReplay> {
        let mut guard = self.lock();
        guard.state = RefreshState::Idle;
        std::mem::take(&mut guard.queue)
    }
}

/// Removes a queued request from the coordinator when its caller is dropped
pub(crate) struct QueueTicket<'a> {
    coordinator: &'a RefreshCoordinator,
    ticket: u64,
}

impl<'a> QueueTicket<'a> {
    pub(crate) const fn new(coordinator: &'a RefreshCoordinator, ticket: u64) -> Self {
        Self {
            coordinator,
            ticket,
        }
    }
}

impl Drop for QueueTicket<'_> {
    fn drop(&mut self) {
        self.coordinator.withdraw(self.ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued(admission: Admission) -> (u64, bool) {
        match admission {
            Admission::Queued {
                ticket,
                start_renewal,
                ..
            } => (ticket, start_renewal),
            Admission::ReplayNow(_) => panic!("expected the request to be queued"),
        }
    }

    #[test]
    fn test_first_failure_starts_single_renewal() {
        let coordinator = RefreshCoordinator::new();
        let epoch = coordinator.epoch();

        let (_, first) = queued(coordinator.admit(ApiRequest::get("/groups"), epoch));
        let (_, second) = queued(coordinator.admit(ApiRequest::get("/history"), epoch));

        assert!(first);
        assert!(!second);
        assert_eq!(coordinator.state(), RefreshState::Refreshing);
        assert_eq!(coordinator.pending(), 2);
    }

    #[test]
    fn test_success_drains_in_enqueue_order() {
        let coordinator = RefreshCoordinator::new();
        for path in ["/a", "/b", "/c"] {
            let _ = coordinator.admit(ApiRequest::get(path), 0);
        }

        let drained: Vec<String> = coordinator
            .renewal_succeeded()
            .into_iter()
            .map(|pending| pending.request.path().to_owned())
            .collect();

        assert_eq!(drained, ["/a", "/b", "/c"]);
        assert_eq!(coordinator.state(), RefreshState::Idle);
        assert_eq!(coordinator.epoch(), 1);
    }

    #[test]
    fn test_late_failure_after_renewal_replays_immediately() {
        let coordinator = RefreshCoordinator::new();
        let _ = coordinator.admit(ApiRequest::get("/a"), 0);
        let _ = coordinator.renewal_succeeded();

        assert!(matches!(
            coordinator.admit(ApiRequest::get("/late"), 0),
            Admission::ReplayNow(_)
        ));
        assert_eq!(coordinator.state(), RefreshState::Idle);
    }

    #[test]
    fn test_failure_keeps_epoch() {
        let coordinator = RefreshCoordinator::new();
        let _ = coordinator.admit(ApiRequest::get("/a"), 0);
        assert_eq!(coordinator.renewal_failed().len(), 1);
        assert_eq!(coordinator.epoch(), 0);
        assert_eq!(coordinator.state(), RefreshState::Idle);
    }

    #[test]
    fn test_dropped_ticket_leaves_others_in_order() {
        let coordinator = RefreshCoordinator::new();
        let _ = coordinator.admit(ApiRequest::get("/a"), 0);
        let (ticket, _) = queued(coordinator.admit(ApiRequest::get("/b"), 0));
        let _ = coordinator.admit(ApiRequest::get("/c"), 0);

        drop(QueueTicket::new(&coordinator, ticket));

        let remaining: Vec<String> = coordinator
            .renewal_succeeded()
            .into_iter()
            .map(|pending| pending.request.path().to_owned())
            .collect();
        assert_eq!(remaining, ["/a", "/c"]);
    }
}
