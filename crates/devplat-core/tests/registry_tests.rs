//! Capability registry behaviour through the public capability traits.

use async_trait::async_trait;
use devplat_core::{
    Cancellation, CapabilityRegistry, Error, Namespace, Result, Template, TemplateSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

struct FixedSource {
    label: &'static str,
}

#[async_trait]
impl TemplateSource for FixedSource {
    fn name(&self) -> &str {
        self.label
    }

    async fn list_templates(&self, _cancel: &Cancellation) -> Result<Vec<Template>> {
        Ok(vec![Template {
            id: format!("{}/starter", self.label),
            name: "starter".to_string(),
            description: None,
            source: self.label.to_string(),
        }])
    }
}

fn fixed(label: &'static str) -> impl Fn() -> Result<Arc<dyn TemplateSource>> + Send + Sync {
    move || {
        let source: Arc<dyn TemplateSource> = Arc::new(FixedSource { label });
        Ok(source)
    }
}

#[test]
fn resolve_is_memoized_per_key() {
    let registry = CapabilityRegistry::new();
    registry
        .register_named::<dyn TemplateSource, _>("awesome", fixed("awesome"))
        .unwrap();
    registry
        .register_named::<dyn TemplateSource, _>("devcenter", fixed("devcenter"))
        .unwrap();

    let a1 = registry.resolve::<dyn TemplateSource>("awesome").unwrap();
    let a2 = registry.resolve::<dyn TemplateSource>("awesome").unwrap();
    let d = registry.resolve::<dyn TemplateSource>("devcenter").unwrap();

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &d));
    assert_eq!(d.name(), "devcenter");
}

#[test]
fn not_found_names_namespace_and_name() {
    let registry = CapabilityRegistry::new();
    let err = registry.resolve::<dyn TemplateSource>("foo").err().unwrap();

    match err {
        Error::CapabilityNotFound { namespace, ref name } => {
            assert_eq!(namespace, Namespace::TEMPLATE_SOURCE);
            assert_eq!(name, "foo");
        }
        ref other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("template-source"), "{message}");
    assert!(message.contains("foo"), "{message}");
}

#[test]
fn duplicate_key_is_rejected_but_other_namespaces_are_free() {
    let registry = CapabilityRegistry::new();
    registry
        .register_named::<dyn TemplateSource, _>("devcenter", fixed("devcenter"))
        .unwrap();

    let err = registry
        .register_named::<dyn TemplateSource, _>("devcenter", fixed("other"))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateRegistration { .. }));

    // The original registration is untouched
    let source = registry.resolve::<dyn TemplateSource>("devcenter").unwrap();
    assert_eq!(source.name(), "devcenter");
}

#[test]
fn concurrent_first_resolve_runs_factory_once() {
    const THREADS: usize = 8;

    let calls = Arc::new(AtomicUsize::new(0));
    let registry = Arc::new(CapabilityRegistry::new());
    let counter = Arc::clone(&calls);
    registry
        .register_named::<dyn TemplateSource, _>("slow", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            let source: Arc<dyn TemplateSource> = Arc::new(FixedSource { label: "slow" });
            Ok(source)
        })
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.resolve::<dyn TemplateSource>("slow").unwrap()
            })
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn default_binding_resolves_bound_name() {
    let registry = CapabilityRegistry::new();
    registry
        .register_named::<dyn TemplateSource, _>("awesome", fixed("awesome"))
        .unwrap();
    registry
        .register_named::<dyn TemplateSource, _>("devcenter", fixed("devcenter"))
        .unwrap();

    registry.bind_default(Namespace::TEMPLATE_SOURCE, "awesome");
    registry.bind_default(Namespace::TEMPLATE_SOURCE, "devcenter");

    let source = registry.resolve_default::<dyn TemplateSource>().unwrap();
    let templates = source.list_templates(&Cancellation::new()).await.unwrap();
    assert_eq!(templates[0].id, "devcenter/starter");
    assert_eq!(
        registry.default_name(Namespace::TEMPLATE_SOURCE).as_deref(),
        Some("devcenter")
    );
}
