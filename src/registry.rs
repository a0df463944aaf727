// Network interface selection shared by the sampling worker and the HTTP handlers.

use crate::error::SelectError;
use crate::models::NetCounters;
use crate::proc_repo::ProcRepo;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RegistryState {
    selected: Option<String>,
    /// Set by a switch, cleared by the next `begin_tick`.
    switched: bool,
    /// Counters of a newly selected interface, read at switch time. The collector swaps
    /// them in as its network baseline before its next rate computation.
    pending_baseline: Option<NetCounters>,
}

/// What the collector needs at the start of a tick, taken atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSelection {
    pub interface: Option<String>,
    /// The selection changed since the previous tick; the old network baseline is stale.
    pub switched: bool,
    /// Counters of the new interface read at switch time, when they could be read.
    pub rebaseline: Option<NetCounters>,
}

/// Unselected until `auto_select` or `select` succeeds.
pub struct InterfaceRegistry {
    repo: Arc<ProcRepo>,
    state: Mutex<RegistryState>,
}

impl InterfaceRegistry {
    pub fn new(repo: Arc<ProcRepo>) -> Self {
        Self {
            repo,
            state: Mutex::new(RegistryState::default()),
        }
    }

    // Nothing inside the lock can leave the state half-written, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Interfaces currently present, loopback excluded.
    pub fn interfaces(&self) -> Vec<String> {
        self.repo.list_interfaces()
    }

    pub fn selected(&self) -> Option<String> {
        self.lock().selected.clone()
    }

    /// Select the first available interface, if any. Returns the selection.
    pub fn auto_select(&self) -> Option<String> {
        let first = self.interfaces().into_iter().next();
        match &first {
            Some(name) => self.commit(name),
            None => tracing::warn!("no network interfaces found; network metrics will read 0"),
        }
        first
    }

    /// Switch to `name`. Fails without touching the selection when `name` is not a current
    /// interface.
    pub fn select(&self, name: &str) -> Result<(), SelectError> {
        if !self.interfaces().iter().any(|i| i == name) {
            return Err(SelectError::UnknownInterface(name.to_string()));
        }
        self.commit(name);
        Ok(())
    }

    fn commit(&self, name: &str) {
        // Read before locking; the name and its baseline are stored in one critical section.
        let baseline = self.repo.try_read_network_counters(name);
        let mut state = self.lock();
        let previous = state.selected.replace(name.to_string());
        state.switched = true;
        state.pending_baseline = baseline;
        drop(state);
        tracing::info!(
            interface = name,
            previous = previous.as_deref().unwrap_or(""),
            "network interface selected"
        );
    }

    /// Current selection plus any baseline left by a switch since the last tick.
    pub fn begin_tick(&self) -> TickSelection {
        let mut state = self.lock();
        TickSelection {
            interface: state.selected.clone(),
            switched: std::mem::take(&mut state.switched),
            rebaseline: state.pending_baseline.take(),
        }
    }
}
