use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

/// Phases of a scene's lifetime, independent of the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScenePhase {
    Uninitialized = 0,
    Active = 1,
    Suspended = 2,
    Exiting = 3,
}

/// Shared phase cell. The render thread drives transitions; the settings
/// worker only polls [`SceneLifecycle::is_stopping`] to know when to end
/// its loop, so a single atomic is all the synchronization needed.
pub struct SceneLifecycle {
    phase: AtomicU8,
}

impl SceneLifecycle {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(ScenePhase::Uninitialized as u8),
        }
    }

    pub fn phase(&self) -> ScenePhase {
        match self.phase.load(Ordering::SeqCst) {
            1 => ScenePhase::Active,
            2 => ScenePhase::Suspended,
            3 => ScenePhase::Exiting,
            _ => ScenePhase::Uninitialized,
        }
    }

    pub fn set(&self, phase: ScenePhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        debug!(target: "scene/lifecycle", ?phase, "transition");
    }

    /// True between a completed `init` and the next `exit`.
    pub fn is_initialized(&self) -> bool {
        matches!(self.phase(), ScenePhase::Active | ScenePhase::Suspended)
    }

    /// What the worker polls to end its loop.
    pub fn is_stopping(&self) -> bool {
        self.phase() == ScenePhase::Exiting
    }
}

impl Default for SceneLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let lifecycle = SceneLifecycle::new();
        assert_eq!(lifecycle.phase(), ScenePhase::Uninitialized);
        assert!(!lifecycle.is_initialized());
        assert!(!lifecycle.is_stopping());
    }

    #[test]
    fn active_and_suspended_count_as_initialized() {
        let lifecycle = SceneLifecycle::new();
        lifecycle.set(ScenePhase::Active);
        assert!(lifecycle.is_initialized());
        lifecycle.set(ScenePhase::Suspended);
        assert!(lifecycle.is_initialized());
    }

    #[test]
    fn exiting_stops_the_worker_and_reads_uninitialized() {
        let lifecycle = SceneLifecycle::new();
        lifecycle.set(ScenePhase::Active);
        lifecycle.set(ScenePhase::Exiting);
        assert!(lifecycle.is_stopping());
        assert!(!lifecycle.is_initialized());
        lifecycle.set(ScenePhase::Uninitialized);
        assert!(!lifecycle.is_stopping());
    }
}
