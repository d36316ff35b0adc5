use chrono::{DateTime, Local, Utc};

use crate::datatype::ContentState;

/// Source of "now" for state inference.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Computes a publication state from the timestamps alone, used when the
/// document carries no usable `state`.
pub fn infer_state(
    published: Option<DateTime<Local>>,
    expires: Option<DateTime<Local>>,
    now: DateTime<Utc>,
) -> ContentState {
    let Some(published) = published else {
        return ContentState::Draft;
    };
    if now < published.with_timezone(&Utc) {
        return ContentState::Waiting;
    }
    match expires {
        Some(expires) if expires.with_timezone(&Utc) <= now => ContentState::Unpublished,
        _ => ContentState::Published,
    }
}
