//! One-shot scroll reveal state machine.
//!
//! The controller decides, from batches of viewport intersection events, when
//! each registered element flips from `Pending` to `Revealed`. It owns no DOM
//! nodes and no timers: everything observable goes through a [`RevealHost`].

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use crate::config;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl RootMargin {
    pub fn bottom(px: i32) -> Self {
        Self { bottom: px, ..Self::default() }
    }

    /// CSS shorthand accepted by `IntersectionObserverInit.rootMargin`.
    pub fn to_css(&self) -> String {
        format!("{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
    pub stagger_ms: u32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: config::DEFAULT_REVEAL_THRESHOLD,
            root_margin: RootMargin::default(),
            stagger_ms: 0,
        }
    }
}

impl RevealOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    pub fn with_stagger(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    fn normalized(mut self) -> Self {
        self.threshold = if self.threshold.is_nan() {
            config::DEFAULT_REVEAL_THRESHOLD
        } else {
            self.threshold.clamp(0.0, 1.0)
        };
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEvent<K> {
    pub key: K,
    pub ratio: f64,
    pub is_intersecting: bool,
    pub time_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Side effects requested by the controller.
pub trait RevealHost<K> {
    fn observe(&mut self, key: &K, options: &RevealOptions);
    fn unobserve(&mut self, key: &K);
    fn schedule(&mut self, timer: TimerId, delay_ms: u32);
    fn cancel(&mut self, timer: TimerId);
    fn reveal(&mut self, key: &K);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Watching,
    Scheduled(TimerId),
    Revealed,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    options: RevealOptions,
    phase: Phase,
}

pub struct RevealController<K> {
    entries: HashMap<K, Entry>,
    timers: HashMap<TimerId, K>,
    next_seq: u64,
    next_timer: u64,
}

impl<K> Default for RevealController<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            timers: HashMap::new(),
            next_seq: 0,
            next_timer: 0,
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> RevealController<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `key` was already registered.
    pub fn register<H: RevealHost<K>>(&mut self, key: K, options: RevealOptions, host: &mut H) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        let options = options.normalized();
        let seq = self.next_seq;
        self.next_seq += 1;
        host.observe(&key, &options);
        debug!("reveal: registered {:?} (seq {})", key, seq);
        self.entries.insert(key, Entry { seq, options, phase: Phase::Watching });
        true
    }

    pub fn unregister<H: RevealHost<K>>(&mut self, key: &K, host: &mut H) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        match entry.phase {
            Phase::Watching => host.unobserve(key),
            Phase::Scheduled(timer) => {
                self.timers.remove(&timer);
                host.cancel(timer);
            }
            Phase::Revealed => {}
        }
        debug!("reveal: unregistered {:?}", key);
        true
    }

    /// Handles one observer callback worth of events.
    pub fn on_intersection<H: RevealHost<K>>(&mut self, batch: &[IntersectionEvent<K>], host: &mut H) {
        let mut qualifying: Vec<(u64, &K)> = batch
            .iter()
            .filter(|event| event.is_intersecting)
            .filter_map(|event| {
                let entry = self.entries.get(&event.key)?;
                let ready = entry.phase == Phase::Watching && event.ratio >= entry.options.threshold;
                ready.then_some((entry.seq, &event.key))
            })
            .collect();
        qualifying.sort_by_key(|(seq, _)| *seq);
        qualifying.dedup_by_key(|(seq, _)| *seq);
        if let Some(last) = batch.last() {
            debug!("reveal: batch of {} at {:.0}ms, {} qualify", batch.len(), last.time_ms, qualifying.len());
        }

        let keys: Vec<K> = qualifying.into_iter().map(|(_, key)| key.clone()).collect();
        for (index, key) in keys.into_iter().enumerate() {
            let Some(entry) = self.entries.get_mut(&key) else {
                continue;
            };
            let delay = entry.options.stagger_ms.saturating_mul(index as u32);
            host.unobserve(&key);
            if delay == 0 {
                entry.phase = Phase::Revealed;
                debug!("reveal: {:?} revealed", key);
                host.reveal(&key);
            } else {
                let timer = TimerId(self.next_timer);
                self.next_timer += 1;
                entry.phase = Phase::Scheduled(timer);
                debug!("reveal: {:?} scheduled in {}ms", key, delay);
                self.timers.insert(timer, key);
                host.schedule(timer, delay);
            }
        }
    }

    /// Completes a stagger delay. Cancelled or unknown timers are ignored.
    pub fn fire<H: RevealHost<K>>(&mut self, timer: TimerId, host: &mut H) {
        let Some(key) = self.timers.remove(&timer) else {
            return;
        };
        if let Some(entry) = self.entries.get_mut(&key) {
            if entry.phase == Phase::Scheduled(timer) {
                entry.phase = Phase::Revealed;
                debug!("reveal: {:?} revealed after stagger", key);
                host.reveal(&key);
            }
        }
    }

    /// Test hook: puts a registered element back to `Pending` and observes it again.
    #[cfg(test)]
    pub fn reset<H: RevealHost<K>>(&mut self, key: &K, host: &mut H) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        match entry.phase {
            Phase::Watching => return,
            Phase::Scheduled(timer) => {
                self.timers.remove(&timer);
                host.cancel(timer);
            }
            Phase::Revealed => {}
        }
        entry.phase = Phase::Watching;
        host.observe(key, &entry.options);
    }

    pub fn teardown<H: RevealHost<K>>(&mut self, host: &mut H) {
        let keys: Vec<K> = self.entries.keys().cloned().collect();
        for key in keys {
            self.unregister(&key, host);
        }
    }

    pub fn state(&self, key: &K) -> Option<RevealState> {
        self.entries.get(key).map(|entry| match entry.phase {
            Phase::Revealed => RevealState::Revealed,
            Phase::Watching | Phase::Scheduled(_) => RevealState::Pending,
        })
    }

    #[cfg(test)]
    pub fn options(&self, key: &K) -> Option<RevealOptions> {
        self.entries.get(key).map(|entry| entry.options)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stagger timers not yet fired or cancelled.
    pub fn in_flight(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, HashSet};

    /// Host with a virtual clock that records every side effect.
    #[derive(Default)]
    struct RecordingHost {
        pub now: u64,
        pub observing: HashSet<&'static str>,
        pub pending: BTreeMap<(u64, TimerId), ()>,
        pub cancelled: Vec<TimerId>,
        pub revealed: Vec<(u64, &'static str)>,
    }

    impl RevealHost<&'static str> for RecordingHost {
        fn observe(&mut self, key: &&'static str, _options: &RevealOptions) {
            self.observing.insert(*key);
        }

        fn unobserve(&mut self, key: &&'static str) {
            self.observing.remove(key);
        }

        fn schedule(&mut self, timer: TimerId, delay_ms: u32) {
            self.pending.insert((self.now + delay_ms as u64, timer), ());
        }

        fn cancel(&mut self, timer: TimerId) {
            self.pending.retain(|(_, t), _| *t != timer);
            self.cancelled.push(timer);
        }

        fn reveal(&mut self, key: &&'static str) {
            self.revealed.push((self.now, *key));
        }
    }

    impl RecordingHost {
        /// Moves the clock forward, firing due timers in deadline order.
        pub fn advance(&mut self, controller: &mut RevealController<&'static str>, ms: u64) {
            let until = self.now + ms;
            while let Some(&(due, timer)) = self.pending.keys().next() {
                if due > until {
                    break;
                }
                self.pending.remove(&(due, timer));
                self.now = due;
                controller.fire(timer, self);
            }
            self.now = until;
        }
    }

    fn hit(key: &'static str, ratio: f64) -> IntersectionEvent<&'static str> {
        IntersectionEvent { key, ratio, is_intersecting: true, time_ms: 0.0 }
    }

    #[test]
    fn staggers_batch_in_registration_order() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_threshold(0.1).with_stagger(50);
        for key in ["a", "b", "c"] {
            controller.register(key, options, &mut host);
        }

        controller.on_intersection(&[hit("a", 0.2), hit("b", 0.2), hit("c", 0.2)], &mut host);
        assert_eq!(host.revealed, vec![(0, "a")]);
        assert_eq!(controller.in_flight(), 2);

        host.advance(&mut controller, 200);
        assert_eq!(host.revealed, vec![(0, "a"), (50, "b"), (100, "c")]);
        assert!(host.observing.is_empty());
    }

    #[test]
    fn delivery_order_does_not_change_reveal_order() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(100);
        controller.register("first", options, &mut host);
        controller.register("second", options, &mut host);

        controller.on_intersection(&[hit("second", 1.0), hit("first", 1.0)], &mut host);
        host.advance(&mut controller, 100);

        assert_eq!(host.revealed, vec![(0, "first"), (100, "second")]);
    }

    #[test]
    fn ratio_below_threshold_keeps_pending() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        controller.register("hero", RevealOptions::default().with_threshold(0.5), &mut host);

        controller.on_intersection(&[hit("hero", 0.3)], &mut host);
        assert_eq!(controller.state(&"hero"), Some(RevealState::Pending));
        assert!(host.observing.contains("hero"));

        controller.on_intersection(&[hit("hero", 0.6)], &mut host);
        assert_eq!(controller.state(&"hero"), Some(RevealState::Revealed));
        assert!(!host.observing.contains("hero"));
    }

    #[test]
    fn not_intersecting_never_qualifies() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        controller.register("card", RevealOptions::default().with_threshold(0.0), &mut host);

        let event = IntersectionEvent { key: "card", ratio: 0.0, is_intersecting: false, time_ms: 12.0 };
        controller.on_intersection(&[event], &mut host);

        assert_eq!(controller.state(&"card"), Some(RevealState::Pending));
    }

    #[test]
    fn revealed_is_one_shot() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        controller.register("stat", RevealOptions::default(), &mut host);

        controller.on_intersection(&[hit("stat", 0.9)], &mut host);
        controller.on_intersection(&[hit("stat", 0.9)], &mut host);
        let leaving = IntersectionEvent { key: "stat", ratio: 0.0, is_intersecting: false, time_ms: 1.0 };
        controller.on_intersection(&[leaving], &mut host);

        assert_eq!(controller.state(&"stat"), Some(RevealState::Revealed));
        assert_eq!(host.revealed.len(), 1);
    }

    #[test]
    fn duplicate_events_in_one_batch_count_once() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(40);
        controller.register("a", options, &mut host);
        controller.register("b", options, &mut host);

        controller.on_intersection(&[hit("a", 0.5), hit("a", 0.8), hit("b", 0.5)], &mut host);
        host.advance(&mut controller, 100);

        assert_eq!(host.revealed, vec![(0, "a"), (40, "b")]);
    }

    #[test]
    fn register_is_idempotent() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();

        assert!(controller.register("x", RevealOptions::default(), &mut host));
        assert!(!controller.register("x", RevealOptions::default().with_threshold(0.9), &mut host));

        assert_eq!(controller.len(), 1);
        assert_eq!(controller.options(&"x").map(|o| o.threshold), Some(0.1));
    }

    #[test]
    fn unregister_cancels_pending_stagger() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(100);
        controller.register("a", options, &mut host);
        controller.register("b", options, &mut host);

        controller.on_intersection(&[hit("a", 1.0), hit("b", 1.0)], &mut host);
        assert!(controller.unregister(&"b", &mut host));
        host.advance(&mut controller, 500);

        assert_eq!(host.revealed, vec![(0, "a")]);
        assert_eq!(host.cancelled.len(), 1);
        assert_eq!(controller.in_flight(), 0);
        assert_eq!(controller.state(&"b"), None);
    }

    #[test]
    fn stale_timer_after_cancel_is_ignored() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(10);
        controller.register("a", options, &mut host);
        controller.register("b", options, &mut host);
        controller.on_intersection(&[hit("a", 1.0), hit("b", 1.0)], &mut host);

        let (_, timer) = *host.pending.keys().next().unwrap();
        controller.unregister(&"b", &mut host);
        controller.register("b", options, &mut host);
        controller.fire(timer, &mut host);

        assert_eq!(controller.state(&"b"), Some(RevealState::Pending));
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let mut host = RecordingHost::default();
        let mut controller: RevealController<&'static str> = RevealController::new();

        assert!(!controller.unregister(&"ghost", &mut host));
        assert!(controller.is_empty());
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(30);
        for key in ["a", "b", "c", "d"] {
            controller.register(key, options, &mut host);
        }
        controller.on_intersection(&[hit("a", 1.0), hit("b", 1.0), hit("c", 1.0)], &mut host);

        controller.teardown(&mut host);
        host.advance(&mut controller, 1_000);

        assert!(controller.is_empty());
        assert_eq!(host.revealed, vec![(0, "a")]);
        assert!(host.pending.is_empty());
        assert!(host.observing.is_empty());
    }

    #[test]
    fn reset_allows_a_second_reveal() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        controller.register("a", RevealOptions::default(), &mut host);
        controller.on_intersection(&[hit("a", 1.0)], &mut host);

        controller.reset(&"a", &mut host);
        assert_eq!(controller.state(&"a"), Some(RevealState::Pending));
        assert!(host.observing.contains("a"));

        host.now = 70;
        controller.on_intersection(&[hit("a", 1.0)], &mut host);
        assert_eq!(host.revealed, vec![(0, "a"), (70, "a")]);
    }

    #[test]
    fn reset_cancels_in_flight_timer() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        let options = RevealOptions::default().with_stagger(100);
        controller.register("a", options, &mut host);
        controller.register("b", options, &mut host);
        controller.on_intersection(&[hit("a", 1.0), hit("b", 1.0)], &mut host);

        controller.reset(&"b", &mut host);
        host.advance(&mut controller, 500);

        assert_eq!(controller.state(&"b"), Some(RevealState::Pending));
        assert_eq!(host.revealed, vec![(0, "a")]);
    }

    #[test]
    fn threshold_is_clamped() {
        let mut host = RecordingHost::default();
        let mut controller = RevealController::new();
        controller.register("high", RevealOptions::default().with_threshold(4.0), &mut host);
        controller.register("nan", RevealOptions::default().with_threshold(f64::NAN), &mut host);

        assert_eq!(controller.options(&"high").map(|o| o.threshold), Some(1.0));
        assert_eq!(
            controller.options(&"nan").map(|o| o.threshold),
            Some(config::DEFAULT_REVEAL_THRESHOLD)
        );
    }

    #[test]
    fn root_margin_css() {
        assert_eq!(RootMargin::bottom(-100).to_css(), "0px 0px -100px 0px");
    }

    const KEYS: [&str; 4] = ["a", "b", "c", "d"];

    #[derive(Clone, Debug)]
    enum Op {
        Register(usize, u32),
        Unregister(usize),
        Batch(Vec<(usize, u8, bool)>),
        Advance(u16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..KEYS.len(), 0u32..80).prop_map(|(k, s)| Op::Register(k, s)),
            (0..KEYS.len()).prop_map(Op::Unregister),
            prop::collection::vec((0..KEYS.len(), 0u8..=10, any::<bool>()), 0..6).prop_map(Op::Batch),
            (0u16..200).prop_map(Op::Advance),
        ]
    }

    proptest! {
        #[test]
        fn revealed_never_returns_to_pending(ops in prop::collection::vec(op(), 1..40)) {
            let mut host = RecordingHost::default();
            let mut controller = RevealController::new();

            for op in ops {
                let before: Vec<_> = KEYS.iter().map(|k| controller.state(k)).collect();
                let mut removed = HashSet::new();
                match op {
                    Op::Register(k, stagger) => {
                        controller.register(KEYS[k], RevealOptions::default().with_stagger(stagger), &mut host);
                    }
                    Op::Unregister(k) => {
                        controller.unregister(&KEYS[k], &mut host);
                        removed.insert(k);
                    }
                    Op::Batch(events) => {
                        let batch: Vec<_> = events
                            .into_iter()
                            .map(|(k, r, i)| IntersectionEvent {
                                key: KEYS[k],
                                ratio: r as f64 / 10.0,
                                is_intersecting: i,
                                time_ms: host.now as f64,
                            })
                            .collect();
                        controller.on_intersection(&batch, &mut host);
                    }
                    Op::Advance(ms) => host.advance(&mut controller, ms as u64),
                }
                for (k, state) in before.into_iter().enumerate() {
                    if state == Some(RevealState::Revealed) && !removed.contains(&k) {
                        prop_assert_eq!(controller.state(&KEYS[k]), Some(RevealState::Revealed));
                    }
                }
                prop_assert_eq!(controller.in_flight(), host.pending.len());
                for key in host.observing.iter() {
                    prop_assert_eq!(controller.state(key), Some(RevealState::Pending));
                }
            }
        }
    }
}
