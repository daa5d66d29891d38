//! Tests for layered platform config resolution

use devplat_config::{
    EnvironmentVariables, Error, Layer, PlatformConfigResolver, PlatformField, ProjectLayout,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    project: TempDir,
    user: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            user: TempDir::new().unwrap(),
        }
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.project.path())
    }

    fn resolver(&self, env: &[(&str, &str)]) -> PlatformConfigResolver {
        PlatformConfigResolver::new(Some(self.layout()))
            .with_env_vars(EnvironmentVariables::from_pairs(env.iter().copied()))
            .with_user_config_dir(self.user.path())
    }

    fn write_descriptor(&self, content: &str) {
        fs::write(self.project.path().join("devplat.yaml"), content).unwrap();
    }

    fn write_user_config(&self, content: &str) {
        fs::write(self.user.path().join("config.json"), content).unwrap();
    }

    fn write_environment(&self, name: &str, content: &str) {
        write(&self.layout().environment_config_path(name), content);
        self.layout().set_default_environment(name).unwrap();
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn resolve_with_no_sources_is_empty() {
    let fixture = Fixture::new();
    let config = fixture.resolver(&[]).resolve().unwrap();
    assert!(config.is_empty());
}

#[test]
fn resolve_without_project_reads_env_and_user() {
    let user = TempDir::new().unwrap();
    fs::write(
        user.path().join("config.json"),
        r#"{"platform": {"config": {"name": "user-dc"}}}"#,
    )
    .unwrap();

    let config = PlatformConfigResolver::new(None)
        .with_env_vars(EnvironmentVariables::from_pairs([("DEVCENTER_PROJECT", "env-proj")]))
        .with_user_config_dir(user.path())
        .resolve()
        .unwrap();

    assert_eq!(config.get(PlatformField::Name), Some("user-dc"));
    assert_eq!(config.get(PlatformField::Project), Some("env-proj"));
}

#[test]
fn resolve_merges_all_four_layers_field_wise() {
    let fixture = Fixture::new();
    fixture.write_user_config(
        r#"{"platform": {"type": "devcenter", "config": {
            "name": "user-dc", "project": "user-proj", "catalog": "user-cat",
            "environmentType": "user-type", "user": "user-me"
        }}}"#,
    );
    fixture.write_descriptor(
        "name: todo\nplatform:\n  type: devcenter\n  config:\n    project: desc-proj\n    catalog: desc-cat\n    environmentType: desc-type\n",
    );
    fixture.write_environment(
        "dev",
        r#"{"platform": {"config": {"catalog": "env-cat", "environmentType": "env-type"}}}"#,
    );

    let merged = fixture
        .resolver(&[("DEVCENTER_ENVIRONMENT_TYPE", "var-type")])
        .resolve_with_origins()
        .unwrap();

    let config = &merged.config;
    assert_eq!(config.get(PlatformField::EnvironmentType), Some("var-type"));
    assert_eq!(config.get(PlatformField::Catalog), Some("env-cat"));
    assert_eq!(config.get(PlatformField::Project), Some("desc-proj"));
    assert_eq!(config.get(PlatformField::Name), Some("user-dc"));
    assert_eq!(config.get(PlatformField::User), Some("user-me"));
    assert_eq!(config.get(PlatformField::EnvironmentDefinition), None);

    assert_eq!(
        merged.origin(PlatformField::EnvironmentType),
        Some(Layer::ProcessEnvironment)
    );
    assert_eq!(merged.origin(PlatformField::Catalog), Some(Layer::EnvironmentStore));
    assert_eq!(merged.origin(PlatformField::Project), Some(Layer::ProjectDescriptor));
    assert_eq!(merged.origin(PlatformField::Name), Some(Layer::UserDescriptor));
}

#[test]
fn explicit_environment_overrides_default() {
    let fixture = Fixture::new();
    fixture.write_environment("prod", r#"{"platform": {"config": {"project": "prod-proj"}}}"#);
    fixture.write_environment("dev", r#"{"platform": {"config": {"project": "dev-proj"}}}"#);

    let default = fixture.resolver(&[]).resolve().unwrap();
    assert_eq!(default.get(PlatformField::Project), Some("dev-proj"));

    let explicit = fixture.resolver(&[]).with_environment("prod").resolve().unwrap();
    assert_eq!(explicit.get(PlatformField::Project), Some("prod-proj"));
}

#[test]
fn selected_environment_without_config_is_absent_layer() {
    let fixture = Fixture::new();
    fixture.layout().set_default_environment("new-env").unwrap();
    fixture.write_user_config(r#"{"platform": {"config": {"project": "user-proj"}}}"#);

    let config = fixture.resolver(&[]).resolve().unwrap();
    assert_eq!(config.get(PlatformField::Project), Some("user-proj"));
}

#[test]
fn malformed_user_config_aborts_merge() {
    let fixture = Fixture::new();
    fixture.write_user_config("{ broken");

    let err = fixture.resolver(&[]).resolve().unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedConfig {
            layer: Layer::UserDescriptor,
            ..
        }
    ));
}

#[test]
fn null_entries_in_user_config_are_kept_and_ignored() {
    let fixture = Fixture::new();
    fixture.write_user_config(
        r#"{"platform": {"type": "devcenter", "config": {"project": "web", "user": null}}, "telemetry": null}"#,
    );
    let resolver = fixture.resolver(&[]);

    let config = resolver.resolve().unwrap();
    assert_eq!(config.get(PlatformField::Project), Some("web"));
    assert_eq!(config.get(PlatformField::User), None);
    assert!(resolver.is_enabled());

    let tree = resolver.load_user_config().unwrap();
    assert!(tree.get("telemetry").is_some_and(|v| v.is_null()));
}

#[test]
fn malformed_environment_platform_config_names_layer() {
    let fixture = Fixture::new();
    fixture.write_environment("dev", r#"{"platform": {"config": {"catalog": true}}}"#);

    let err = fixture.resolver(&[]).resolve().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("environment store"), "{message}");
    assert!(message.contains("catalog"), "{message}");
}

#[test]
fn resolve_is_repeatable() {
    let fixture = Fixture::new();
    fixture.write_descriptor("platform:\n  type: devcenter\n  config:\n    project: p\n");
    fixture.write_user_config(r#"{"platform": {"config": {"name": "dc"}}}"#);

    let resolver = fixture.resolver(&[("DEVCENTER_CATALOG", "c")]);
    assert_eq!(resolver.resolve().unwrap(), resolver.resolve().unwrap());
}

#[test]
fn is_enabled_from_descriptor() {
    let fixture = Fixture::new();
    assert!(!fixture.resolver(&[]).is_enabled());

    fixture.write_descriptor("platform:\n  type: devcenter\n");
    assert!(fixture.resolver(&[]).is_enabled());
}

#[test]
fn is_enabled_from_user_config_ignores_case() {
    let fixture = Fixture::new();
    fixture.write_user_config(r#"{"platform": {"type": "DevCenter"}}"#);
    assert!(fixture.resolver(&[]).is_enabled());

    fixture.write_user_config(r#"{"platform": {"type": "other"}}"#);
    assert!(!fixture.resolver(&[]).is_enabled());
}

#[test]
fn is_enabled_false_when_user_config_unreadable() {
    let fixture = Fixture::new();
    fixture.write_user_config("not json");
    assert!(!fixture.resolver(&[]).is_enabled());
}

#[test]
fn user_config_round_trips() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver(&[]);

    let mut tree = resolver.load_user_config().unwrap();
    assert!(tree.is_empty());
    tree.set("platform.type", "devcenter").unwrap();
    tree.set("platform.config.project", "web").unwrap();
    resolver.save_user_config(&tree).unwrap();

    let reloaded = resolver.load_user_config().unwrap();
    assert_eq!(reloaded, tree);
    assert_eq!(
        resolver.resolve().unwrap().get(PlatformField::Project),
        Some("web")
    );
}
