//! Widget lookup by identifier.
//!
//! A registry holds at most one widget factory. Resolving an identifier asks
//! the factory for a handle bound to that identifier; with no factory
//! installed every lookup misses and the miss is logged once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

type WidgetFactory<W> = Arc<dyn Fn(&str) -> W + Send + Sync>;

pub struct WidgetRegistry<W> {
    factory: RwLock<Option<WidgetFactory<W>>>,
    missing_logged: AtomicBool,
}

impl<W> Default for WidgetRegistry<W> {
    fn default() -> Self {
        Self {
            factory: RwLock::new(None),
            missing_logged: AtomicBool::new(false),
        }
    }
}

impl<W> WidgetRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(factory: impl Fn(&str) -> W + Send + Sync + 'static) -> Self {
        let registry = Self::default();
        registry.install(factory);
        registry
    }

    pub fn install(&self, factory: impl Fn(&str) -> W + Send + Sync + 'static) {
        let mut slot = self.factory.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(factory));
        self.missing_logged.store(false, Ordering::Relaxed);
    }

    pub fn uninstall(&self) {
        let mut slot = self.factory.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn is_installed(&self) -> bool {
        self.factory
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn resolve(&self, widget_id: &str) -> Option<W> {
        let factory = self
            .factory
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match factory {
            Some(factory) => Some(factory(widget_id)),
            None => {
                if !self.missing_logged.swap(true, Ordering::Relaxed) {
                    tracing::error!(
                        widget_id,
                        "feedback widget not registered; loading, success and error displays are disabled"
                    );
                }
                None
            }
        }
    }
}
