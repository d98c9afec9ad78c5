//! Extensibility hooks: named filters and actions registered at startup.
//!
//! A [`HookRegistry`] is built once while the server boots, then shared
//! read-only. Callbacks run in ascending priority order; callbacks with the
//! same priority run in registration order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Priority used when a caller has no ordering preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A filter receives the current value and returns the replacement.
pub type FilterFn = Arc<dyn Fn(String) -> String + Send + Sync>;

/// An action is notified that something happened.
pub type ActionFn = Arc<dyn Fn() + Send + Sync>;

struct Registered<F> {
    priority: i32,
    seq: u64,
    callback: F,
}

/// Ordered registry of filter and action callbacks keyed by hook name.
#[derive(Default)]
pub struct HookRegistry {
    filters: HashMap<String, Vec<Registered<FilterFn>>>,
    actions: HashMap<String, Vec<Registered<ActionFn>>>,
    next_seq: u64,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter callback under `hook`.
    pub fn add_filter<F>(&mut self, hook: &str, priority: i32, callback: F)
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        let entry: Registered<FilterFn> = Registered {
            priority,
            seq: self.bump(),
            callback: Arc::new(callback),
        };
        insert_sorted(self.filters.entry(hook.to_string()).or_default(), entry);
    }

    /// Register an action callback under `hook`.
    pub fn add_action<F>(&mut self, hook: &str, priority: i32, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let entry: Registered<ActionFn> = Registered {
            priority,
            seq: self.bump(),
            callback: Arc::new(callback),
        };
        insert_sorted(self.actions.entry(hook.to_string()).or_default(), entry);
    }

    /// Run `value` through every filter registered under `hook`.
    pub fn apply_filters(&self, hook: &str, value: String) -> String {
        match self.filters.get(hook) {
            Some(chain) => chain.iter().fold(value, |acc, f| (f.callback)(acc)),
            None => value,
        }
    }

    /// Invoke every action registered under `hook`, returning how many ran.
    pub fn do_action(&self, hook: &str) -> usize {
        let Some(chain) = self.actions.get(hook) else {
            return 0;
        };
        for action in chain {
            (action.callback)();
        }
        chain.len()
    }

    pub fn has_filter(&self, hook: &str) -> bool {
        self.filters.get(hook).is_some_and(|c| !c.is_empty())
    }

    pub fn has_action(&self, hook: &str) -> bool {
        self.actions.get(hook).is_some_and(|c| !c.is_empty())
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

fn insert_sorted<F>(chain: &mut Vec<Registered<F>>, entry: Registered<F>) {
    let pos = chain
        .iter()
        .position(|e| (e.priority, e.seq) > (entry.priority, entry.seq))
        .unwrap_or(chain.len());
    chain.insert(pos, entry);
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("filters", &hook_counts(&self.filters))
            .field("actions", &hook_counts(&self.actions))
            .finish()
    }
}

fn hook_counts<F>(hooks: &HashMap<String, Vec<Registered<F>>>) -> Vec<(String, usize)> {
    let mut counts: Vec<_> = hooks.iter().map(|(k, c)| (k.clone(), c.len())).collect();
    counts.sort();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn unknown_filter_returns_value_unchanged() {
        let hooks = HookRegistry::new();
        assert_eq!(hooks.apply_filters("nothing", "v".into()), "v");
        assert!(!hooks.has_filter("nothing"));
    }

    #[test]
    fn filters_run_by_priority_then_registration() {
        let mut hooks = HookRegistry::new();
        hooks.add_filter("f", 20, |v| format!("{v}c"));
        hooks.add_filter("f", DEFAULT_PRIORITY, |v| format!("{v}a"));
        hooks.add_filter("f", DEFAULT_PRIORITY, |v| format!("{v}b"));
        assert_eq!(hooks.apply_filters("f", String::new()), "abc");
    }

    #[test]
    fn actions_run_in_order_and_are_counted() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        for (name, priority) in [("late", 99), ("early", 1)] {
            let log = Arc::clone(&log);
            hooks.add_action("a", priority, move || log.lock().unwrap().push(name));
        }
        assert_eq!(hooks.do_action("a"), 2);
        assert_eq!(*log.lock().unwrap(), vec!["early", "late"]);
    }

    #[test]
    fn missing_action_runs_nothing() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut hooks = HookRegistry::new();
        let counter = Arc::clone(&hits);
        hooks.add_action("a", DEFAULT_PRIORITY, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hooks.do_action("b"), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(hooks.has_action("a"));
    }
}
