//! Single-flight guard: at most one active run per case.

use council_domain::CaseId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("A deliberation for case {0} is already running")]
pub struct AlreadyRunning(pub CaseId);

/// Case ids with a run in flight.
///
/// Share one registry (behind an `Arc`) between every use case instance that
/// may run the same case.
#[derive(Debug, Default)]
pub struct RunRegistry {
    active: Mutex<HashSet<CaseId>>,
}

impl RunRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim `case_id`. The claim lasts until the returned guard is dropped.
    pub fn try_acquire(self: &Arc<Self>, case_id: &CaseId) -> Result<RunGuard, AlreadyRunning> {
        let mut active = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !active.insert(case_id.clone()) {
            return Err(AlreadyRunning(case_id.clone()));
        }
        debug!("Run registered for case {}", case_id);
        Ok(RunGuard {
            registry: Arc::clone(self),
            case_id: case_id.clone(),
        })
    }

    pub fn is_active(&self, case_id: &CaseId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(case_id)
    }
}

/// Releases its case id on drop.
#[derive(Debug)]
pub struct RunGuard {
    registry: Arc<RunRegistry>,
    case_id: CaseId,
}

impl RunGuard {
    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.registry
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.case_id);
        debug!("Run released for case {}", self.case_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected_until_release() {
        let registry = RunRegistry::new();
        let id = CaseId::new("c-1");

        let guard = registry.try_acquire(&id).unwrap();
        assert!(registry.is_active(&id));
        assert_eq!(
            registry.try_acquire(&id).unwrap_err(),
            AlreadyRunning(id.clone())
        );

        drop(guard);
        assert!(!registry.is_active(&id));
        assert!(registry.try_acquire(&id).is_ok());
    }

    #[test]
    fn test_distinct_cases_do_not_collide() {
        let registry = RunRegistry::new();
        let _a = registry.try_acquire(&CaseId::new("a")).unwrap();
        let b = registry.try_acquire(&CaseId::new("b")).unwrap();
        assert_eq!(b.case_id().as_str(), "b");
    }
}
