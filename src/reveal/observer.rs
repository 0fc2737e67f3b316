use std::rc::Rc;

use log::debug;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::{Callback, NodeRef};

use super::controller::{Intersection, RevealController, TargetId};
use super::scheduler::BrowserScheduler;
use crate::config::RevealConfig;

#[derive(Debug, Error)]
pub enum RevealError {
    #[error("no browser window")]
    NoWindow,
    #[error("IntersectionObserver is not available")]
    Unsupported,
    #[error("reveal target {0} is not mounted")]
    MissingTarget(usize),
    #[error("failed to create IntersectionObserver: {0}")]
    Observer(String),
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Reveal controller wired to a page's cards through an `IntersectionObserver`.
///
/// Owned by the page that mounted the cards. Dropping it disconnects the
/// observer and cancels every stagger timer that has not fired yet.
pub struct ScrollReveal {
    controller: RevealController<BrowserScheduler>,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ScrollReveal {
    pub fn attach(
        targets: &[NodeRef],
        config: RevealConfig,
        on_reveal: Callback<TargetId>,
    ) -> Result<Self, RevealError> {
        let window = web_sys::window().ok_or(RevealError::NoWindow)?;
        let supported = Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !supported {
            return Err(RevealError::Unsupported);
        }

        let elements = targets
            .iter()
            .enumerate()
            .map(|(index, node)| node.cast::<Element>().ok_or(RevealError::MissingTarget(index)))
            .collect::<Result<Vec<_>, _>>()?;
        let elements = Rc::new(elements);

        let controller = RevealController::new(config, BrowserScheduler, on_reveal);
        for _ in elements.iter() {
            controller.register();
        }

        let callback: ObserverCallback = {
            let controller = controller.clone();
            let elements = elements.clone();
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                let batch: Vec<Intersection> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = entry.target();
                        elements
                            .iter()
                            .position(|element| *element == target)
                            .map(|index| Intersection {
                                target: TargetId(index),
                                is_intersecting: entry.is_intersecting(),
                                ratio: entry.intersection_ratio(),
                            })
                    })
                    .collect();

                for id in controller.observe_batch(batch) {
                    if let Some(element) = elements.get(id.0) {
                        observer.unobserve(element);
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| RevealError::Observer(format!("{:?}", e)))?;

        for element in elements.iter() {
            observer.observe(element);
        }
        debug!("scroll reveal watching {} cards", elements.len());

        Ok(Self {
            controller,
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ScrollReveal {
    fn drop(&mut self) {
        self.observer.disconnect();
        if !self.controller.is_disposed() {
            debug!(
                "scroll reveal detached with {} revealed, {} never shown",
                self.controller.revealed_count(),
                self.controller.pending_count()
            );
            self.controller.dispose();
        }
    }
}
