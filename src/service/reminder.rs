//! Turn reminders for idle games.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, ReminderConfig};
use crate::store::GameId;

/// A player who should be nudged to take their turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub game: GameId,
    pub player: PlayerId,
    /// When the game last changed.
    pub idle_since: DateTime<Utc>,
}

/// A reminder that was sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub game: GameId,
    pub player: PlayerId,
    pub sent_at: DateTime<Utc>,
}

/// Log of sent reminders, consulted to avoid repeat nudges.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    sent: Vec<Notification>,
}

impl NotificationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, notification: Notification) {
        self.sent.push(notification);
    }

    /// Was `player` reminded after `since`?
    #[must_use]
    pub fn notified_since(&self, player: &PlayerId, since: DateTime<Utc>) -> bool {
        self.sent
            .iter()
            .any(|n| &n.player == player && n.sent_at > since)
    }

    #[must_use]
    pub fn all(&self) -> &[Notification] {
        &self.sent
    }
}

impl ReminderConfig {
    /// Games untouched since before this instant are idle.
    ///
    /// Windows reaching past the representable date range clamp to
    /// `DateTime::MIN_UTC`.
    #[must_use]
    pub fn idle_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        back_from(now, Duration::try_minutes(self.idle_minutes))
    }

    /// Players reminded after this instant are not reminded again.
    #[must_use]
    pub fn cooldown_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        back_from(now, Duration::try_hours(self.cooldown_hours))
    }
}

fn back_from(now: DateTime<Utc>, window: Option<Duration>) -> DateTime<Utc> {
    window
        .and_then(|w| now.checked_sub_signed(w))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notified_since() {
        let now = Utc::now();
        let joe = PlayerId::new("joe");
        let mut log = NotificationLog::new();
        log.record(Notification {
            game: GameId::new(1),
            player: joe.clone(),
            sent_at: now - Duration::hours(2),
        });

        assert!(log.notified_since(&joe, now - Duration::hours(24)));
        assert!(!log.notified_since(&joe, now - Duration::hours(1)));
        assert!(!log.notified_since(&PlayerId::new("steve"), now - Duration::hours(24)));
    }

    #[test]
    fn test_cutoffs() {
        let now = Utc::now();
        let config = ReminderConfig::default();
        assert_eq!(config.idle_cutoff(now), now - Duration::minutes(5));
        assert_eq!(config.cooldown_cutoff(now), now - Duration::hours(24));
    }

    #[test]
    fn test_cutoffs_clamp_huge_windows() {
        let now = Utc::now();
        let config = ReminderConfig {
            idle_minutes: i64::MAX,
            // Fits in a Duration but reaches before the earliest date.
            cooldown_hours: i64::MAX / 3_600_000 / 2,
        };
        assert_eq!(config.idle_cutoff(now), DateTime::<Utc>::MIN_UTC);
        assert_eq!(config.cooldown_cutoff(now), DateTime::<Utc>::MIN_UTC);
    }
}
