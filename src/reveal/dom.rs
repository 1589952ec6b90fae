use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::Callback;

use super::controller::{IntersectionEvent, RevealController, RevealHost, RevealOptions, TimerId};
use crate::config;

pub type RevealKey = u32;

#[derive(Debug, Error)]
pub enum RevealError {
    #[error("could not create IntersectionObserver: {0}")]
    Observer(String),
    #[error("could not update class list: {0}")]
    ClassList(String),
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// Browsers take one threshold and root margin per observer, so elements are
// grouped by the pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ObserverKey {
    threshold_bits: u64,
    root_margin: String,
}

impl ObserverKey {
    fn for_options(options: &RevealOptions) -> Self {
        Self {
            threshold_bits: options.threshold.to_bits(),
            root_margin: options.root_margin.to_css(),
        }
    }
}

struct Observer {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}

struct DomHost {
    shared: Weak<RefCell<Shared>>,
    visible_class: String,
    elements: HashMap<RevealKey, Element>,
    listeners: HashMap<RevealKey, Callback<()>>,
    observers: HashMap<ObserverKey, Observer>,
    observed_by: HashMap<RevealKey, ObserverKey>,
    timers: HashMap<TimerId, Timeout>,
    just_revealed: Vec<RevealKey>,
}

impl DomHost {
    fn observer_for(&mut self, options: &RevealOptions) -> Result<&IntersectionObserver, RevealError> {
        let key = ObserverKey::for_options(options);
        if !self.observers.contains_key(&key) {
            let observer = self.create_observer(options)?;
            self.observers.insert(key.clone(), observer);
        }
        self.observers
            .get(&key)
            .map(|observer| &observer.inner)
            .ok_or_else(|| RevealError::Observer("observer vanished".to_string()))
    }

    fn create_observer(&self, options: &RevealOptions) -> Result<Observer, RevealError> {
        let shared = self.shared.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<IntersectionEvent<RevealKey>> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let key = entry
                        .target()
                        .get_attribute(config::REVEAL_KEY_ATTR)?
                        .parse()
                        .ok()?;
                    Some(IntersectionEvent {
                        key,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                        time_ms: entry.time(),
                    })
                })
                .collect();
            if let Some(shared) = shared.upgrade() {
                Shared::with(&shared, |controller, host| controller.on_intersection(&batch, host));
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_css());
        let inner = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| RevealError::Observer(js_error(e)))?;
        debug!(
            "reveal: new observer threshold={} margin={}",
            options.threshold,
            options.root_margin.to_css()
        );
        Ok(Observer { inner, _callback: callback })
    }

    /// Shows an element that could not be observed and notifies its listener,
    /// as if it had scrolled into view.
    fn show_unobserved(&mut self, key: &RevealKey, error: RevealError) {
        warn!("reveal: {}; showing element {} immediately", error, key);
        self.reveal(key);
    }

    fn add_visible_class(&self, element: &Element) -> Result<(), RevealError> {
        element
            .class_list()
            .add_1(&self.visible_class)
            .map_err(|e| RevealError::ClassList(js_error(e)))
    }
}

impl RevealHost<RevealKey> for DomHost {
    fn observe(&mut self, key: &RevealKey, options: &RevealOptions) {
        let Some(element) = self.elements.get(key).cloned() else {
            return;
        };
        match self.observer_for(options) {
            Ok(observer) => {
                observer.observe(&element);
                self.observed_by.insert(*key, ObserverKey::for_options(options));
            }
            Err(e) => self.show_unobserved(key, e),
        }
    }

    fn unobserve(&mut self, key: &RevealKey) {
        let Some(observer_key) = self.observed_by.remove(key) else {
            return;
        };
        if let (Some(element), Some(observer)) = (self.elements.get(key), self.observers.get(&observer_key)) {
            observer.inner.unobserve(element);
        }
    }

    fn schedule(&mut self, timer: TimerId, delay_ms: u32) {
        let shared = self.shared.clone();
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(shared) = shared.upgrade() {
                Shared::with(&shared, |controller, host| {
                    // Dropping a Timeout from inside its own callback would free the running closure.
                    if let Some(fired) = host.timers.remove(&timer) {
                        let _ = fired.forget();
                    }
                    controller.fire(timer, host);
                });
            }
        });
        self.timers.insert(timer, timeout);
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }

    fn reveal(&mut self, key: &RevealKey) {
        if let Some(element) = self.elements.get(key) {
            if let Err(e) = self.add_visible_class(element) {
                warn!("reveal: {}", e);
            }
        }
        self.just_revealed.push(*key);
    }
}

struct Shared {
    controller: RevealController<RevealKey>,
    host: DomHost,
    next_key: RevealKey,
}

impl Shared {
    /// Runs `f` against the controller, then notifies listeners of anything it
    /// revealed once the borrow is released. Listener callbacks may re-render
    /// components that unregister themselves.
    fn with<R>(
        shared: &Rc<RefCell<Shared>>,
        f: impl FnOnce(&mut RevealController<RevealKey>, &mut DomHost) -> R,
    ) -> Option<R> {
        let (result, listeners) = {
            let Ok(mut guard) = shared.try_borrow_mut() else {
                warn!("reveal: re-entrant update dropped");
                return None;
            };
            let Shared { controller, host, .. } = &mut *guard;
            let result = f(controller, host);
            let listeners: Vec<Callback<()>> = mem::take(&mut host.just_revealed)
                .into_iter()
                .filter_map(|key| host.listeners.get(&key).cloned())
                .collect();
            (result, listeners)
        };
        for listener in listeners {
            listener.emit(());
        }
        Some(result)
    }
}

/// Browser binding of [`RevealController`]: one instance per mounted page.
#[derive(Clone)]
pub struct DomReveal {
    shared: Rc<RefCell<Shared>>,
}

impl PartialEq for DomReveal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl DomReveal {
    pub fn new(visible_class: &str) -> Self {
        let shared = Rc::new_cyclic(|weak| {
            RefCell::new(Shared {
                controller: RevealController::new(),
                host: DomHost {
                    shared: weak.clone(),
                    visible_class: visible_class.to_string(),
                    elements: HashMap::new(),
                    listeners: HashMap::new(),
                    observers: HashMap::new(),
                    observed_by: HashMap::new(),
                    timers: HashMap::new(),
                    just_revealed: Vec::new(),
                },
                next_key: 0,
            })
        });
        Self { shared }
    }

    /// Starts watching `element`. The returned key is needed to unregister it.
    pub fn register(
        &self,
        element: &Element,
        options: RevealOptions,
        on_reveal: Option<Callback<()>>,
    ) -> Option<RevealKey> {
        let key = {
            let mut guard = self.shared.try_borrow_mut().ok()?;
            let key = guard.next_key;
            guard.next_key += 1;
            key
        };
        if let Err(e) = element.set_attribute(config::REVEAL_KEY_ATTR, &key.to_string()) {
            warn!("reveal: could not tag element: {}", js_error(e));
            return None;
        }
        let element = element.clone();
        Shared::with(&self.shared, move |controller, host| {
            host.elements.insert(key, element);
            if let Some(on_reveal) = on_reveal {
                host.listeners.insert(key, on_reveal);
            }
            controller.register(key, options, host);
        })?;
        Some(key)
    }

    pub fn unregister(&self, key: RevealKey) {
        Shared::with(&self.shared, |controller, host| {
            controller.unregister(&key, host);
            host.elements.remove(&key);
            host.listeners.remove(&key);
            if controller.is_empty() {
                debug!("reveal: nothing left to watch");
            }
        });
    }

    pub fn teardown(&self) {
        Shared::with(&self.shared, |controller, host| {
            debug!(
                "reveal: tearing down {} elements, {} staggers in flight",
                controller.len(),
                controller.in_flight()
            );
            controller.teardown(host);
            host.elements.clear();
            host.listeners.clear();
            host.observers.clear();
        });
    }
}
