//! Load status exposed to the presentation shell.

use serde::Serialize;
use std::fmt;

#[cfg(feature = "api")]
use log::info;
#[cfg(feature = "api")]
use tokio::sync::watch;

/// Lifecycle of the live rainfall load.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Complete,
}

impl LoadStatus {
    /// Badge text shown by the shell.
    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Pending => "fetching",
            LoadStatus::Complete => "live",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observable status that moves from `Pending` to `Complete` exactly once.
#[cfg(feature = "api")]
#[derive(Debug)]
pub struct StatusSignal {
    sender: watch::Sender<LoadStatus>,
}

#[cfg(feature = "api")]
impl Default for StatusSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "api")]
impl StatusSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(LoadStatus::Pending);
        Self { sender }
    }

    pub fn current(&self) -> LoadStatus {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.sender.subscribe()
    }

    /// Returns `true` only for the call that performed the transition.
    pub fn mark_complete(&self) -> bool {
        let changed = self.sender.send_if_modified(|status| {
            if *status == LoadStatus::Pending {
                *status = LoadStatus::Complete;
                true
            } else {
                false
            }
        });
        if changed {
            info!("Status: {}", LoadStatus::Complete.label());
        }
        changed
    }
}
