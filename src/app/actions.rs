//! Actions representing side effects to be executed by the runtime loop.
//!
//! The event handler mutates [`AppState`](crate::app::AppState) and the
//! store directly; anything that needs the runtime (timers, exiting) comes
//! back as an [`Action`] and is executed by `main` in order.

use crate::domain::Category;
use std::time::Duration;

/// Commands the runtime loop executes after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms the deferred-activation timer for a focused category control,
    /// replacing any pending one.
    ScheduleActivation {
        category: Category,
        delay: Duration,
    },

    /// Disarms the deferred-activation timer.
    CancelActivation,

    /// Leaves the application.
    Quit,
}
