use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, instrument};

use sprig_core::ids::{CallerId, SessionId};
use sprig_core::service::ChildRef;
use sprig_core::tools::ChildSelection;

use crate::error::StoreError;

/// Sessions idle longer than this are eligible for eviction.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// Per-caller conversational state. One per conversation; memory-only.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub caller_id: CallerId,
    pub selected_child: Option<ChildSelection>,
    pub children_cache: Option<Vec<ChildRef>>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

/// Partial update merged over existing session state. The selection is a
/// single optional pair, so a child name can never exist without its id.
#[derive(Clone, Debug, Default)]
pub struct SessionPatch {
    pub selected_child: Option<ChildSelection>,
    pub children_cache: Option<Vec<ChildRef>>,
}

/// Owned, encapsulated session map. Nothing outside this type holds a
/// reference into it; every read hands out a clone.
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a session for a caller. All nullable fields start empty.
    #[instrument(skip(self), fields(caller_id = %caller))]
    pub fn create(&self, caller: &CallerId) -> Session {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            caller_id: caller.clone(),
            selected_child: None,
            children_cache: None,
            created_at: now,
            last_activity: now,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// Get a session by id. Pure read: does not refresh last_activity.
    /// Callers that should extend the session's lifetime call `touch`.
    pub fn get(&self, id: &SessionId) -> Result<Session, StoreError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| StoreError::NotFound(format!("session {id}")))
    }

    /// Explicit keep-alive: refresh last_activity. The dispatcher calls
    /// this on every execute, which is what gives sessions their sliding
    /// expiration.
    pub fn touch(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("session {id}")))?;
        session.last_activity = Utc::now();
        Ok(())
    }

    /// Merge a patch over existing state and refresh last_activity.
    #[instrument(skip(self, patch), fields(session_id = %id))]
    pub fn update(&self, id: &SessionId, patch: SessionPatch) -> Result<Session, StoreError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("session {id}")))?;
        if let Some(selection) = patch.selected_child {
            session.selected_child = Some(selection);
        }
        if let Some(children) = patch.children_cache {
            session.children_cache = Some(children);
        }
        session.last_activity = Utc::now();
        Ok(session.clone())
    }

    /// Scope the session to a child.
    pub fn set_selected_child(
        &self,
        id: &SessionId,
        child_id: sprig_core::ids::ChildId,
        name: impl Into<String>,
    ) -> Result<Session, StoreError> {
        self.update(
            id,
            SessionPatch {
                selected_child: Some(ChildSelection {
                    id: child_id,
                    name: name.into(),
                }),
                ..Default::default()
            },
        )
    }

    /// Cache the caller's child roster on the session.
    pub fn cache_children(
        &self,
        id: &SessionId,
        children: Vec<ChildRef>,
    ) -> Result<Session, StoreError> {
        self.update(
            id,
            SessionPatch {
                children_cache: Some(children),
                ..Default::default()
            },
        )
    }

    /// The currently selected child, or `NoChildSelected`.
    pub fn selected_child(&self, id: &SessionId) -> Result<ChildSelection, StoreError> {
        self.get(id)?
            .selected_child
            .ok_or(StoreError::NoChildSelected)
    }

    /// Evict every session idle longer than `max_age_hours`. Side-effect
    /// only; callers decide when to invoke.
    #[instrument(skip(self))]
    pub fn sweep_expired(&self, max_age_hours: i64) {
        let cutoff = Utc::now() - Duration::hours(max_age_hours);
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.last_activity >= cutoff);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, max_age_hours, "swept expired sessions");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
