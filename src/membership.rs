//! Engagement membership
//!
//! Tracks which catalog entries the user has already started and mediates
//! the "start" action. Updates are pessimistic: an entry becomes a member
//! only after the server confirms.
//!
//! Per entry the state machine is
//!
//! ```text
//! absent --request--> in-flight --ok--> member (terminal)
//!                         |
//!                         +---err--> absent
//! ```
//!
//! The in-flight marker is taken in the same critical section as the
//! membership check, before the request is awaited, so a second request for
//! the same entry is dropped rather than sent. The marker is cleared on
//! every exit, including when the caller drops the future mid-request.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::config::EngagementDefaults;
use crate::notice::Notice;
use crate::source::DataSource;
use crate::types::{EngagementRequest, ProgressRecord};

const ENGAGED_MESSAGE: &str = "Progress added! Keep learning! 🎉";
const REJECTED_FALLBACK: &str = "Failed to add progress";

/// Availability of the "start" action for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Not engaged, action enabled
    Available,
    /// Request outstanding, action disabled
    InFlight,
    /// Already engaged, action disabled
    Engaged,
}

impl ActionState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ActionState::Available)
    }
}

/// Result of [`DerivedMembership::request_engage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngageOutcome {
    /// Server confirmed; the entry is now a member
    Engaged,
    /// Entry was already a member; nothing sent
    AlreadyMember,
    /// A request for this entry is already outstanding; nothing sent
    Suppressed,
    /// Server declined; membership unchanged
    Rejected(Notice),
}

impl EngageOutcome {
    /// Notice to show the user, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            EngageOutcome::Engaged => Some(Notice::success(ENGAGED_MESSAGE)),
            EngageOutcome::Rejected(notice) => Some(notice.clone()),
            EngageOutcome::AlreadyMember | EngageOutcome::Suppressed => None,
        }
    }
}

#[derive(Debug, Default)]
struct MembershipState {
    members: HashSet<String>,
    in_flight: HashSet<String>,
}

/// Engagement set for one view session
pub struct DerivedMembership {
    source: Arc<dyn DataSource>,
    defaults: EngagementDefaults,
    state: Mutex<MembershipState>,
}

impl DerivedMembership {
    /// Start with an explicit member set
    pub fn new(
        source: Arc<dyn DataSource>,
        defaults: EngagementDefaults,
        members: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            source,
            defaults,
            state: Mutex::new(MembershipState {
                members: members.into_iter().collect(),
                in_flight: HashSet::new(),
            }),
        }
    }

    /// Seed from progress records; every course they reference is a member
    pub fn from_records(
        source: Arc<dyn DataSource>,
        defaults: EngagementDefaults,
        records: &[ProgressRecord],
    ) -> Self {
        let members = records
            .iter()
            .filter_map(ProgressRecord::course_identifier)
            .map(str::to_string);
        Self::new(source, defaults, members)
    }

    fn state(&self) -> MutexGuard<'_, MembershipState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_member(&self, id: &str) -> bool {
        self.state().members.contains(id)
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.state().in_flight.contains(id)
    }

    pub fn action_state(&self, id: &str) -> ActionState {
        let state = self.state();
        if state.members.contains(id) {
            ActionState::Engaged
        } else if state.in_flight.contains(id) {
            ActionState::InFlight
        } else {
            ActionState::Available
        }
    }

    /// Snapshot of the member set
    pub fn members(&self) -> HashSet<String> {
        self.state().members.clone()
    }

    pub fn in_flight_count(&self) -> usize {
        self.state().in_flight.len()
    }

    /// Engage with `id`, sending at most one request per entry at a time
    pub async fn request_engage(&self, id: &str) -> EngageOutcome {
        let _marker = {
            let mut state = self.state();
            if state.members.contains(id) {
                debug!("Engage {} skipped: already a member", id);
                return EngageOutcome::AlreadyMember;
            }
            if !state.in_flight.insert(id.to_string()) {
                debug!("Engage {} suppressed: request outstanding", id);
                return EngageOutcome::Suppressed;
            }
            InFlight {
                membership: self,
                id: id.to_string(),
            }
        };

        let request = EngagementRequest {
            entry_id: id.to_string(),
            score_increment: self.defaults.score_increment,
            time_spent_minutes: self.defaults.time_spent_minutes,
        };
        let result = self.source.submit_engagement(&request).await;

        match result {
            Ok(()) => {
                // member before the marker clears so the entry is never observed as absent
                self.state().members.insert(id.to_string());
                info!("Engaged with {}", id);
                EngageOutcome::Engaged
            }
            Err(e) => {
                warn!("Engage {} rejected: {}", id, e);
                EngageOutcome::Rejected(Notice::from_failure(&e, REJECTED_FALLBACK))
            }
        }
    }
}

/// Clears the in-flight marker however the request ends, including when
/// the engage future is dropped before the server answers
struct InFlight<'a> {
    membership: &'a DerivedMembership,
    id: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.membership.state().in_flight.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockSource};
    use crate::types::EntryRef;
    use std::time::Duration;

    fn membership(source: Arc<MockSource>, seed: &[&str]) -> DerivedMembership {
        DerivedMembership::new(
            source,
            EngagementDefaults::default(),
            seed.iter().map(|s| s.to_string()),
        )
    }

    #[tokio::test]
    async fn test_successful_engage_becomes_member() {
        let source = Arc::new(MockSource::new());
        let m = membership(source.clone(), &[]);

        assert_eq!(m.action_state("B"), ActionState::Available);
        let outcome = m.request_engage("B").await;

        assert_eq!(outcome, EngageOutcome::Engaged);
        assert_eq!(m.action_state("B"), ActionState::Engaged);
        assert_eq!(m.in_flight_count(), 0);

        let sent = source.submissions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].score_increment, 10);
        assert_eq!(sent[0].time_spent_minutes, 30);
    }

    #[tokio::test]
    async fn test_engage_after_success_is_noop() {
        let source = Arc::new(MockSource::new());
        let m = membership(source.clone(), &[]);

        m.request_engage("B").await;
        assert_eq!(m.request_engage("B").await, EngageOutcome::AlreadyMember);
        assert_eq!(source.call_count(Endpoint::Engagement), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_send_once() {
        let source = Arc::new(MockSource::new().with_gate());
        let m = membership(source.clone(), &[]);

        let (first, second) = tokio::join!(m.request_engage("B"), async {
            let outcome = m.request_engage("B").await;
            assert!(m.is_in_flight("B"));
            assert_eq!(m.action_state("B"), ActionState::InFlight);
            source.release();
            outcome
        });

        assert_eq!(first, EngageOutcome::Engaged);
        assert_eq!(second, EngageOutcome::Suppressed);
        assert_eq!(source.call_count(Endpoint::Engagement), 1);
        assert!(m.is_member("B"));
    }

    #[tokio::test]
    async fn test_failure_reverts_and_allows_retry() {
        let source = Arc::new(MockSource::new());
        source.reject_engagements(Some("Course is archived"));
        let m = membership(source.clone(), &[]);

        let outcome = m.request_engage("B").await;
        match &outcome {
            EngageOutcome::Rejected(notice) => assert_eq!(notice.message, "Course is archived"),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(!m.is_member("B"));
        assert!(!m.is_in_flight("B"));
        assert_eq!(m.action_state("B"), ActionState::Available);

        source.accept_engagements();
        assert_eq!(m.request_engage("B").await, EngageOutcome::Engaged);
        assert_eq!(source.call_count(Endpoint::Engagement), 2);
    }

    #[tokio::test]
    async fn test_abandoned_request_releases_entry() {
        let source = Arc::new(MockSource::new().with_gate());
        let m = membership(source.clone(), &[]);

        let abandoned = tokio::time::timeout(Duration::from_millis(20), m.request_engage("B")).await;
        assert!(abandoned.is_err());
        assert_eq!(m.action_state("B"), ActionState::Available);
        assert_eq!(m.in_flight_count(), 0);

        source.release();
        assert_eq!(m.request_engage("B").await, EngageOutcome::Engaged);
        assert_eq!(source.call_count(Endpoint::Engagement), 2);
        assert!(m.is_member("B"));
    }

    #[tokio::test]
    async fn test_failure_without_reason_uses_generic_notice() {
        let source = Arc::new(MockSource::new().failing(Endpoint::Engagement));
        let m = membership(source, &[]);

        let notice = m.request_engage("B").await.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to add progress");
        assert_eq!(m.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_seed_from_records_and_scenario() {
        let records = vec![
            ProgressRecord {
                id: Some("p1".into()),
                course_id: Some(EntryRef::Expanded {
                    id: "A".into(),
                    title: Some("Course A".into()),
                    name: None,
                }),
                community_id: None,
                score_gained: 10,
                time_spent_minutes: 30,
                created_at: None,
            },
            ProgressRecord {
                id: Some("p2".into()),
                course_id: None,
                community_id: Some(EntryRef::Id("community-1".into())),
                score_gained: 5,
                time_spent_minutes: 0,
                created_at: None,
            },
        ];
        let source = Arc::new(MockSource::new().with_progress(records.clone()));
        let m = DerivedMembership::from_records(source.clone(), EngagementDefaults::default(), &records);

        assert_eq!(m.members(), HashSet::from(["A".to_string()]));

        assert_eq!(m.request_engage("B").await, EngageOutcome::Engaged);
        assert_eq!(m.members(), HashSet::from(["A".to_string(), "B".to_string()]));
        assert_eq!(m.action_state("A"), ActionState::Engaged);
        assert_eq!(m.action_state("B"), ActionState::Engaged);
        assert_eq!(m.action_state("C"), ActionState::Available);
        assert!(!m.action_state("B").is_enabled());
        assert!(m.action_state("C").is_enabled());
    }

    #[tokio::test]
    async fn test_server_reports_already_engaged() {
        // server knows about A but the local seed does not
        let source = Arc::new(MockSource::new().with_progress(vec![ProgressRecord {
            id: None,
            course_id: Some(EntryRef::Id("A".into())),
            community_id: None,
            score_gained: 10,
            time_spent_minutes: 30,
            created_at: None,
        }]));
        let m = membership(source, &[]);

        let outcome = m.request_engage("A").await;
        assert_eq!(
            outcome,
            EngageOutcome::Rejected(Notice::error("Course already in progress"))
        );
        assert!(!m.is_member("A"));
    }
}
