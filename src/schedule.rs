//! Named, cancellable timers on a logical clock.
//!
//! The clock is whatever `Duration` the caller passes as `now`, usually the
//! time elapsed since the game started. Each name holds at most one armed
//! timer; arming a name again replaces the previous one. Frontends sleep until
//! [`Timers::next_deadline`] and then drain [`Timers::pop_due`].

use std::time::Duration;

/// Shortest period a repeating timer may have.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Clone, Copy, Debug)]
struct Armed<K> {
    name: K,
    due: Duration,
    repeat: Repeat,
}

#[derive(Clone, Debug)]
pub struct Timers<K> {
    armed: Vec<Armed<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Timers { armed: Vec::new() }
    }
}

impl<K: Copy + PartialEq> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot timer firing `delay` after `now`.
    pub fn once(&mut self, name: K, delay: Duration, now: Duration) {
        self.cancel(name);
        self.armed.push(Armed {
            name,
            due: now + delay,
            repeat: Repeat::Once,
        });
    }

    /// Arms a repeating timer firing every `period`, first at `now + period`.
    pub fn every(&mut self, name: K, period: Duration, now: Duration) {
        let period = period.max(MIN_PERIOD);
        self.cancel(name);
        self.armed.push(Armed {
            name,
            due: now + period,
            repeat: Repeat::Every(period),
        });
    }

    /// Returns whether something was armed under `name`.
    pub fn cancel(&mut self, name: K) -> bool {
        let before = self.armed.len();
        self.armed.retain(|timer| timer.name != name);
        before != self.armed.len()
    }

    pub fn clear(&mut self) {
        self.armed.clear();
    }

    pub fn is_armed(&self, name: K) -> bool {
        self.armed.iter().any(|timer| timer.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Period of a repeating timer, `None` for one-shots and unarmed names.
    pub fn period(&self, name: K) -> Option<Duration> {
        self.armed
            .iter()
            .find(|timer| timer.name == name)
            .and_then(|timer| match timer.repeat {
                Repeat::Every(period) => Some(period),
                Repeat::Once => None,
            })
    }

    pub fn deadline(&self, name: K) -> Option<Duration> {
        self.armed
            .iter()
            .find(|timer| timer.name == name)
            .map(|timer| timer.due)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.iter().map(|timer| timer.due).min()
    }

    /// Takes the earliest timer due at `now`, if any.
    ///
    /// One-shots are disarmed, repeating timers are pushed one period forward
    /// from their previous deadline. Call in a loop: a handler may cancel or
    /// re-arm other timers between two calls.
    pub fn pop_due(&mut self, now: Duration) -> Option<K> {
        let (position, _) = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| timer.due)?;

        let timer = self.armed[position];
        match timer.repeat {
            Repeat::Once => {
                self.armed.remove(position);
            }
            Repeat::Every(period) => self.armed[position].due = timer.due + period,
        }
        Some(timer.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Name {
        Tick,
        Effect,
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(timers: &mut Timers<Name>, now: Duration) -> Vec<Name> {
        std::iter::from_fn(|| timers.pop_due(now)).collect()
    }

    #[test]
    fn starts_empty() {
        let timers = Timers::<Name>::new();
        assert!(timers.is_empty());
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timers = Timers::new();
        timers.once(Name::Effect, ms(500), ms(0));
        assert_eq!(drain(&mut timers, ms(499)), vec![]);
        assert_eq!(drain(&mut timers, ms(500)), vec![Name::Effect]);
        assert_eq!(drain(&mut timers, ms(5000)), vec![]);
        assert!(!timers.is_armed(Name::Effect));
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut timers = Timers::new();
        timers.every(Name::Tick, ms(150), ms(0));
        assert_eq!(drain(&mut timers, ms(149)), vec![]);
        assert_eq!(drain(&mut timers, ms(150)), vec![Name::Tick]);
        assert_eq!(drain(&mut timers, ms(450)), vec![Name::Tick, Name::Tick]);
        assert_eq!(timers.deadline(Name::Tick), Some(ms(600)));
    }

    #[test]
    fn rearming_replaces() {
        let mut timers = Timers::new();
        timers.every(Name::Tick, ms(150), ms(0));
        timers.every(Name::Tick, ms(90), ms(100));
        assert_eq!(timers.period(Name::Tick), Some(ms(90)));
        assert_eq!(timers.next_deadline(), Some(ms(190)));
        assert_eq!(drain(&mut timers, ms(189)), vec![]);
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = Timers::new();
        timers.every(Name::Tick, ms(100), ms(0));
        timers.once(Name::Effect, ms(150), ms(0));
        assert_eq!(
            drain(&mut timers, ms(200)),
            vec![Name::Tick, Name::Effect, Name::Tick]
        );
    }

    #[test]
    fn cancel_and_clear() {
        let mut timers = Timers::new();
        timers.every(Name::Tick, ms(100), ms(0));
        timers.once(Name::Effect, ms(100), ms(0));
        assert!(timers.cancel(Name::Effect));
        assert!(!timers.cancel(Name::Effect));
        assert!(timers.is_armed(Name::Tick));
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(drain(&mut timers, ms(1000)), vec![]);
    }
}
