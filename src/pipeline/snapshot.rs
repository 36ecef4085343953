//! Immutable results published after each recompute.

use super::state::PipelineState;
use crate::models::ContactView;
use crate::sorting::SortPolicy;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Receiving end for published snapshots; `None` until the first publish.
pub type SnapshotReceiver = watch::Receiver<Option<Arc<ContactListSnapshot>>>;

/// A badge shown on a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuBadge {
    pub value: usize,
}

/// Badges signalling that the list differs from its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuBadges {
    /// Present (value 0) when the sort policy is not the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<MenuBadge>,

    /// Present with the number of selected types when a type filter is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<MenuBadge>,
}

impl MenuBadges {
    pub fn for_state(state: &PipelineState, default_sort: SortPolicy) -> Self {
        Self {
            sort: (state.sort_policy != default_sort).then_some(MenuBadge { value: 0 }),
            filter: (state.active_filter_count() > 0).then_some(MenuBadge {
                value: state.active_filter_count(),
            }),
        }
    }

    /// Number of badges currently shown.
    pub fn count(&self) -> usize {
        usize::from(self.sort.is_some()) + usize::from(self.filter.is_some())
    }
}

/// One published, ordered contact list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListSnapshot {
    /// Request generation this snapshot answers; strictly increasing
    pub generation: u64,

    pub state: PipelineState,

    /// Filtered and sorted contacts
    pub contacts: Vec<ContactView>,

    /// Size of the canonical merged set before filtering
    pub total_count: usize,

    pub badges: MenuBadges,

    pub reset_search_visible: bool,

    pub computed_at: DateTime<Utc>,
}

/// Publishing side of the snapshot channel.
///
/// Only strictly newer generations replace the current snapshot, so a slow
/// stale result can never overwrite a fresher one.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    sender: Arc<watch::Sender<Option<Arc<ContactListSnapshot>>>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.sender.subscribe()
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> Option<Arc<ContactListSnapshot>> {
        self.sender.borrow().clone()
    }

    /// Publish `snapshot` if it is newer than the current one.
    ///
    /// Returns whether the snapshot was published.
    pub fn publish(&self, snapshot: ContactListSnapshot) -> bool {
        let mut snapshot = Some(snapshot);
        self.sender.send_if_modified(|current| {
            let newer = match (current.as_ref(), snapshot.as_ref()) {
                (Some(current), Some(next)) => next.generation > current.generation,
                (None, Some(_)) => true,
                (_, None) => false,
            };
            if newer {
                *current = snapshot.take().map(Arc::new);
            }
            newer
        })
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
