//! Capability registry
//!
//! Implementations of a capability (a provisioning provider, a template
//! source, ...) are registered under a `(namespace, name)` key with a factory.
//! The factory runs at most once per key on success; every later `resolve`
//! returns the same shared instance. A failed construction is not memoized,
//! so the next `resolve` retries it.

use crate::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Capability kind under which implementations are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(&'static str);

impl Namespace {
    pub const PROVISIONING_PROVIDER: Namespace = Namespace("provisioning-provider");
    pub const TEMPLATE_SOURCE: Namespace = Namespace("template-source");
    pub const REMOTE_ENVIRONMENT_STORE: Namespace = Namespace("remote-environment-store");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A capability type that can live in the registry.
///
/// Implemented for trait objects such as `dyn ProvisionProvider`, tying each
/// one to its namespace so lookups are typed.
pub trait Capability: Send + Sync + 'static {
    const NAMESPACE: Namespace;
}

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn() -> Result<Instance> + Send + Sync>;

struct Slot {
    factory: Factory,
    /// Held while the factory runs, so concurrent resolvers wait for it
    instance: Mutex<Option<Instance>>,
}

type Key = (Namespace, String);

/// Keyed store of lazily constructed, shared capability instances.
///
/// Safe to share across threads; registration takes `&self`.
#[derive(Default)]
pub struct CapabilityRegistry {
    slots: RwLock<HashMap<Key, Arc<Slot>>>,
    defaults: RwLock<HashMap<Namespace, String>>,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `C` under `name`.
    ///
    /// Fails with [`Error::DuplicateRegistration`] when the key is taken.
    pub fn register_named<C, F>(&self, name: impl Into<String>, factory: F) -> Result<()>
    where
        C: Capability + ?Sized,
        F: Fn() -> Result<Arc<C>> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut slots = write(&self.slots);
        let key = (C::NAMESPACE, name);
        if slots.contains_key(&key) {
            return Err(Error::DuplicateRegistration {
                namespace: key.0,
                name: key.1,
            });
        }

        tracing::debug!(namespace = %key.0, name = %key.1, "Registered capability");
        let factory: Factory = Box::new(move || factory().map(|c| Arc::new(c) as Instance));
        slots.insert(
            key,
            Arc::new(Slot {
                factory,
                instance: Mutex::new(None),
            }),
        );
        Ok(())
    }

    /// Resolve the shared instance of `C` registered under `name`.
    ///
    /// Constructs it on first use. Concurrent first calls block on the same
    /// slot, so the factory still runs once.
    pub fn resolve<C>(&self, name: &str) -> Result<Arc<C>>
    where
        C: Capability + ?Sized,
    {
        let namespace = C::NAMESPACE;
        let slot = read(&self.slots)
            .get(&(namespace, name.to_string()))
            .cloned()
            .ok_or_else(|| Error::CapabilityNotFound {
                namespace,
                name: name.to_string(),
            })?;

        let mut guard = slot.instance.lock().unwrap_or_else(PoisonError::into_inner);
        let instance = match guard.as_ref() {
            Some(existing) => {
                tracing::debug!(%namespace, name, "Reusing capability");
                Arc::clone(existing)
            }
            None => {
                tracing::debug!(%namespace, name, "Constructing capability");
                let created = (slot.factory)()?;
                *guard = Some(Arc::clone(&created));
                created
            }
        };
        drop(guard);

        instance
            .downcast_ref::<Arc<C>>()
            .cloned()
            .ok_or_else(|| Error::CapabilityTypeMismatch {
                namespace,
                name: name.to_string(),
            })
    }

    /// Make `name` the default implementation of `namespace`.
    ///
    /// A later binding replaces an earlier one.
    pub fn bind_default(&self, namespace: Namespace, name: impl Into<String>) {
        let name = name.into();
        if let Some(previous) = write(&self.defaults).insert(namespace, name.clone()) {
            if previous != name {
                tracing::debug!(%namespace, %previous, %name, "Replacing default binding");
            }
        }
    }

    /// Name currently bound as the default of `namespace`.
    pub fn default_name(&self, namespace: Namespace) -> Option<String> {
        read(&self.defaults).get(&namespace).cloned()
    }

    /// Resolve the default implementation of `C`.
    pub fn resolve_default<C>(&self) -> Result<Arc<C>>
    where
        C: Capability + ?Sized,
    {
        let name = self
            .default_name(C::NAMESPACE)
            .ok_or(Error::NoDefaultBinding {
                namespace: C::NAMESPACE,
            })?;
        self.resolve::<C>(&name)
    }

    /// Check if a factory is registered under the key.
    pub fn contains(&self, namespace: Namespace, name: &str) -> bool {
        read(&self.slots).contains_key(&(namespace, name.to_string()))
    }

    /// Names registered in `namespace` (sorted).
    pub fn names(&self, namespace: Namespace) -> Vec<String> {
        let mut names: Vec<_> = read(&self.slots)
            .keys()
            .filter(|(ns, _)| *ns == namespace)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = read(&self.slots).keys().cloned().collect();
        keys.sort();
        f.debug_struct("CapabilityRegistry")
            .field("registered", &keys)
            .field("defaults", &*read(&self.defaults))
            .finish()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    impl Capability for dyn Greeter {
        const NAMESPACE: Namespace = Namespace::new("greeter");
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    fn english() -> Result<Arc<dyn Greeter>> {
        Ok(Arc::new(English))
    }

    #[test]
    fn resolve_returns_same_instance() {
        let registry = CapabilityRegistry::new();
        registry.register_named::<dyn Greeter, _>("en", english).unwrap();

        let first = registry.resolve::<dyn Greeter>("en").unwrap();
        let second = registry.resolve::<dyn Greeter>("en").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.greet(), "hello");
    }

    #[test]
    fn unknown_name_is_not_found() {
        let registry = CapabilityRegistry::new();
        let err = registry.resolve::<dyn Greeter>("fr").err().unwrap();
        assert!(matches!(err, Error::CapabilityNotFound { ref name, .. } if name == "fr"));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = CapabilityRegistry::new();
        registry.register_named::<dyn Greeter, _>("en", english).unwrap();
        let err = registry
            .register_named::<dyn Greeter, _>("en", english)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
    }

    #[test]
    fn failed_construction_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = CapabilityRegistry::new();
        let counter = Arc::clone(&calls);
        registry
            .register_named::<dyn Greeter, _>("flaky", move || {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::Console("not yet".to_string()))
                } else {
                    english()
                }
            })
            .unwrap();

        assert!(registry.resolve::<dyn Greeter>("flaky").is_err());
        assert!(registry.resolve::<dyn Greeter>("flaky").is_ok());
        assert!(registry.resolve::<dyn Greeter>("flaky").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn default_binding_is_last_wins() {
        let registry = CapabilityRegistry::new();
        assert!(matches!(
            registry.resolve_default::<dyn Greeter>().err().unwrap(),
            Error::NoDefaultBinding { .. }
        ));

        registry.register_named::<dyn Greeter, _>("en", english).unwrap();
        registry.bind_default(Namespace::new("greeter"), "missing");
        registry.bind_default(Namespace::new("greeter"), "en");
        assert_eq!(registry.resolve_default::<dyn Greeter>().unwrap().greet(), "hello");
    }

    #[test]
    fn names_are_scoped_to_namespace() {
        let registry = CapabilityRegistry::new();
        registry.register_named::<dyn Greeter, _>("en", english).unwrap();
        registry.register_named::<dyn Greeter, _>("de", english).unwrap();

        assert_eq!(registry.names(Namespace::new("greeter")), vec!["de", "en"]);
        assert!(registry.names(Namespace::TEMPLATE_SOURCE).is_empty());
        assert!(registry.contains(Namespace::new("greeter"), "de"));
    }
}
