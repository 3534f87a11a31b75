use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::models::Activity;

/// In-memory activity store keyed by activity name.
///
/// Cloning is cheap and every clone shares the same map, so one directory is
/// built at startup and handed to the router as state. Keys keep insertion
/// order, which is the order the listing endpoint returns them in.
#[derive(Clone, Default)]
pub struct ActivityDirectory {
    inner: Arc<RwLock<IndexMap<String, Activity>>>,
}

impl ActivityDirectory {
    pub fn new(activities: IndexMap<String, Activity>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(activities)),
        }
    }

    /// Directory populated with the school's standing activities.
    pub fn seeded() -> Self {
        Self::new(seed_activities())
    }

    /// Drop every change and restore the seed set.
    pub fn reset(&self) {
        *self.inner.write() = seed_activities();
    }

    pub fn list(&self) -> IndexMap<String, Activity> {
        self.inner.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<Activity> {
        self.inner.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` against the named activity while holding the write lock.
    /// Returns `None` when no activity has exactly that name.
    pub fn update<R>(&self, name: &str, f: impl FnOnce(&mut Activity) -> R) -> Option<R> {
        let mut guard = self.inner.write();
        guard.get_mut(name).map(f)
    }
}

pub fn seed_activities() -> IndexMap<String, Activity> {
    let mut activities = IndexMap::new();
    activities.insert(
        "Chess Club".to_string(),
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
    );
    activities.insert(
        "Programming Class".to_string(),
        Activity::new(
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
    );
    activities.insert(
        "Gym Class".to_string(),
        Activity::new(
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
    );
    activities
}
