//! Panic trigger: a double-tap concealment ratchet.
//!
//! The editor designates one trigger key (Alt in the desktop build). A fast
//! double tap - two genuine releases less than 400 ms apart - drives the
//! session toward the most concealed state it can reach without asking the
//! user anything. The ratchet is one-way: no input through this path ever
//! reveals content, turns stealth off, or moves Hidden back to Editable.

use std::time::{Duration, Instant};

use crate::document::{DocumentSession, Visibility};
use crate::error::Result;

/// Maximum gap between two releases to count as a double tap.
pub const DOUBLE_TAP_THRESHOLD: Duration = Duration::from_millis(400);

/// What a trigger release ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicOutcome {
    /// Auto-repeat release, or a lone tap: nothing fired.
    Ignored,
    /// Panic fired and the document was hidden under the session password.
    Hidden,
    /// Panic fired; no session password exists, so the stealth decoy was
    /// enabled instead.
    StealthEnabled,
    /// Panic fired but the session was already concealed: no-op.
    AlreadyConcealed,
}

/// Tracks trigger-key releases and fires the panic action on a double tap.
#[derive(Debug)]
pub struct PanicTrigger {
    last_release: Option<Instant>,
    threshold: Duration,
}

impl Default for PanicTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl PanicTrigger {
    pub fn new() -> Self {
        Self::with_threshold(DOUBLE_TAP_THRESHOLD)
    }

    pub fn with_threshold(threshold: Duration) -> Self {
        Self {
            last_release: None,
            threshold,
        }
    }

    /// Feed one release of the trigger key.
    ///
    /// Auto-repeat releases (key held down) are ignored entirely - they do
    /// not fire and they do not move the timestamp. A genuine release fires
    /// when it lands within the threshold of the previous one, and always
    /// becomes the new reference point whether or not it fired.
    ///
    /// The action, in order:
    /// 1. session password set and document Editable → hide it, no prompt;
    /// 2. no session password and stealth off → enable the decoy;
    /// 3. already Hidden or already in stealth → nothing.
    pub fn on_trigger_released(
        &mut self,
        now: Instant,
        is_auto_repeat: bool,
        session: &mut DocumentSession,
    ) -> Result<PanicOutcome> {
        if is_auto_repeat {
            return Ok(PanicOutcome::Ignored);
        }

        let fired = match self.last_release {
            Some(previous) => now.duration_since(previous) < self.threshold,
            None => false,
        };
        self.last_release = Some(now);

        if !fired {
            return Ok(PanicOutcome::Ignored);
        }

        if session.has_session_password() && session.visibility() == Visibility::Editable {
            session.hide_with_session_password()?;
            Ok(PanicOutcome::Hidden)
        } else if !session.has_session_password()
            && session.visibility() == Visibility::Editable
            && !session.stealth_enabled()
        {
            session.set_stealth(true)?;
            Ok(PanicOutcome::StealthEnabled)
        } else {
            // Already Hidden, or already in stealth: never step back toward
            // visibility from here.
            Ok(PanicOutcome::AlreadyConcealed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_tap(trigger: &mut PanicTrigger, session: &mut DocumentSession) -> PanicOutcome {
        let first = Instant::now();
        trigger.on_trigger_released(first, false, session).unwrap();
        trigger
            .on_trigger_released(first + Duration::from_millis(100), false, session)
            .unwrap()
    }

    #[test]
    fn test_single_tap_does_nothing() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.insert(0, "text").unwrap();

        let outcome = trigger
            .on_trigger_released(Instant::now(), false, &mut session)
            .unwrap();

        assert_eq!(outcome, PanicOutcome::Ignored);
        assert_eq!(session.visibility(), Visibility::Editable);
        assert!(!session.stealth_enabled());
    }

    #[test]
    fn test_slow_taps_do_not_fire() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.set_session_password("abc").unwrap();

        let first = Instant::now();
        trigger
            .on_trigger_released(first, false, &mut session)
            .unwrap();
        let outcome = trigger
            .on_trigger_released(first + Duration::from_millis(500), false, &mut session)
            .unwrap();

        assert_eq!(outcome, PanicOutcome::Ignored);
        assert_eq!(session.visibility(), Visibility::Editable);
    }

    #[test]
    fn test_double_tap_hides_when_password_set() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.set_session_password("abc").unwrap();
        session.insert(0, "sensitive").unwrap();

        let outcome = double_tap(&mut trigger, &mut session);

        assert_eq!(outcome, PanicOutcome::Hidden);
        assert_eq!(session.visibility(), Visibility::Hidden);
        // Real content survives panic and comes back under the password.
        session.reveal("abc").unwrap();
        assert_eq!(session.actual_text(), "sensitive");
    }

    #[test]
    fn test_double_tap_enables_stealth_without_password() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.insert(0, "sensitive").unwrap();

        let outcome = double_tap(&mut trigger, &mut session);

        assert_eq!(outcome, PanicOutcome::StealthEnabled);
        assert_eq!(session.visibility(), Visibility::Editable);
        assert!(session.stealth_enabled());
        assert_ne!(session.display_text(), "sensitive");
    }

    #[test]
    fn test_panic_is_a_ratchet() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.set_session_password("abc").unwrap();
        session.insert(0, "sensitive").unwrap();

        assert_eq!(double_tap(&mut trigger, &mut session), PanicOutcome::Hidden);
        let blob = session.display_text();

        // Firing again while Hidden changes nothing.
        let outcome = double_tap(&mut trigger, &mut session);
        assert_eq!(outcome, PanicOutcome::AlreadyConcealed);
        assert_eq!(session.visibility(), Visibility::Hidden);
        assert_eq!(session.display_text(), blob);
    }

    #[test]
    fn test_panic_noop_when_stealth_already_active() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.insert(0, "sensitive").unwrap();
        session.set_stealth(true).unwrap();

        let outcome = double_tap(&mut trigger, &mut session);

        assert_eq!(outcome, PanicOutcome::AlreadyConcealed);
        assert!(session.stealth_enabled());
        assert_eq!(session.visibility(), Visibility::Editable);
    }

    #[test]
    fn test_auto_repeat_releases_never_count() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.set_session_password("abc").unwrap();

        let first = Instant::now();
        trigger
            .on_trigger_released(first, false, &mut session)
            .unwrap();

        // A burst of auto-repeat releases within the threshold.
        for i in 1..5u64 {
            let outcome = trigger
                .on_trigger_released(first + Duration::from_millis(50 * i), true, &mut session)
                .unwrap();
            assert_eq!(outcome, PanicOutcome::Ignored);
        }
        assert_eq!(session.visibility(), Visibility::Editable);

        // The genuine release after them still pairs with the first one.
        let outcome = trigger
            .on_trigger_released(first + Duration::from_millis(300), false, &mut session)
            .unwrap();
        assert_eq!(outcome, PanicOutcome::Hidden);
    }

    #[test]
    fn test_timestamp_updates_even_when_not_firing() {
        let mut trigger = PanicTrigger::new();
        let mut session = DocumentSession::new();
        session.set_session_password("abc").unwrap();

        let first = Instant::now();
        trigger
            .on_trigger_released(first, false, &mut session)
            .unwrap();
        // Too slow to fire, but it becomes the new reference point.
        let second = first + Duration::from_millis(1000);
        trigger
            .on_trigger_released(second, false, &mut session)
            .unwrap();
        // This one pairs with `second`, not `first`.
        let outcome = trigger
            .on_trigger_released(second + Duration::from_millis(100), false, &mut session)
            .unwrap();
        assert_eq!(outcome, PanicOutcome::Hidden);
    }
}
