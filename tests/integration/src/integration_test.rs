//! End-to-end resolution against real git repositories
//!
//! Exercises the complete flow with both version-control backends:
//! branch discovery -> chain discovery -> layered load -> substitution.

use params_core::{BranchSource, DocumentFormat, Error, Orchestrator, Settings};
use params_fs::LayerKind;
use params_git::{GitCli, LibGit, VcsQuery};
use params_test_utils::TestTree;
use params_test_utils::git::{checkout_new_branch, detach_head, real_git_repo_with_commit};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Cli,
    Lib,
}

impl Backend {
    fn vcs(self) -> Box<dyn VcsQuery> {
        match self {
            Backend::Cli => Box::new(GitCli::new()),
            Backend::Lib => Box::new(LibGit::new()),
        }
    }
}

/// A committed repository with a three-level property layout.
fn deploy_repo() -> TestTree {
    let tree = TestTree::new();
    real_git_repo_with_commit(tree.path());
    tree.properties(
        "",
        "infra.properties",
        &[("account", "111"), ("region", "eu-west-1"), ("stage", "dev")],
    );
    tree.properties("services", "infra.properties", &[("team", "platform")]);
    tree.properties("services/api", "infra.properties", &[("stage", "api-dev")]);
    tree.properties("", "infra-release.properties", &[("stage", "prod")]);
    tree.properties("services/api", "infra-release.properties", &[("region", "us-east-1")]);
    tree
}

#[rstest]
#[case::git_cli(Backend::Cli)]
#[case::libgit(Backend::Lib)]
#[tokio::test]
async fn resolves_layers_on_main(#[case] backend: Backend) {
    let tree = deploy_repo();
    let start = tree.dir("services/api");

    let orchestrator = Orchestrator::new(Settings::default(), backend.vcs());
    let resolution = orchestrator.resolve(&start, None).await.unwrap();

    assert_eq!(resolution.branch.name, "main");
    assert!(matches!(resolution.branch.source, BranchSource::Discovered { .. }));
    assert_eq!(resolution.chain.root(), &tree.root());
    assert_eq!(resolution.chain.len(), 3);
    assert_eq!(resolution.parameters["stage"], "api-dev");
    assert_eq!(resolution.parameters["team"], "platform");
    assert_eq!(resolution.parameters["region"], "eu-west-1");
}

#[rstest]
#[case::git_cli(Backend::Cli)]
#[case::libgit(Backend::Lib)]
#[tokio::test]
async fn branch_layer_beats_every_common_file(#[case] backend: Backend) {
    let tree = deploy_repo();
    checkout_new_branch(tree.path(), "release");
    let start = tree.dir("services/api");

    let orchestrator = Orchestrator::new(Settings::default(), backend.vcs());
    let resolution = orchestrator.resolve(&start, None).await.unwrap();

    assert_eq!(resolution.branch.name, "release");
    // root-level branch file outranks the deeper common file
    assert_eq!(resolution.parameters["stage"], "prod");
    assert_eq!(resolution.parameters["region"], "us-east-1");
    assert_eq!(resolution.parameters["account"], "111");
}

#[rstest]
#[case::git_cli(Backend::Cli)]
#[case::libgit(Backend::Lib)]
#[tokio::test]
async fn detached_head_needs_an_override(#[case] backend: Backend) {
    let tree = deploy_repo();
    detach_head(tree.path());
    let start = tree.root();

    let orchestrator = Orchestrator::new(Settings::default(), backend.vcs());
    let err = orchestrator.resolve(&start, None).await.unwrap_err();
    assert!(matches!(err, Error::BranchResolution { .. }));

    let resolution = orchestrator
        .resolve(&start, Some("release".to_string()))
        .await
        .unwrap();
    assert_eq!(resolution.branch.source, BranchSource::Override);
    assert_eq!(resolution.parameters["stage"], "prod");
}

#[tokio::test]
async fn root_override_inside_repository() {
    let tree = deploy_repo();
    tree.properties("services", "infra-root.properties", &[("account", "222")]);
    let start = tree.dir("services/api");

    let settings = Settings {
        root_override: true,
        ..Settings::default()
    };
    let orchestrator = Orchestrator::new(settings, Box::new(GitCli::new()));
    let resolution = orchestrator.resolve(&start, None).await.unwrap();

    assert_eq!(resolution.override_boundary, Some(tree.dir("services")));
    assert_eq!(resolution.chain.len(), 2);
    assert_eq!(resolution.parameters["account"], "222");
    // repository root files are outside the trimmed chain
    assert!(!resolution.parameters.contains_key("region"));

    let override_sources: Vec<_> = resolution
        .sources()
        .filter(|(kind, _)| *kind == LayerKind::RootOverride)
        .collect();
    assert_eq!(override_sources.len(), 1);
}

#[tokio::test]
async fn applies_to_yaml_descriptor() {
    let tree = deploy_repo();
    checkout_new_branch(tree.path(), "release");
    let start = tree.dir("services/api");
    let yaml = "\
service: api-((stage))
serverless:
  variables: ((stage))
provider:
  region: ((region))
  account: '((account))'
  tags:
    - ((team))
    - ((missing))
";
    let document = DocumentFormat::Yaml.parse(yaml).unwrap();

    let orchestrator = Orchestrator::new(Settings::default(), Box::new(GitCli::new()));
    let applied = orchestrator
        .resolve_and_apply(&start, None, &document)
        .await
        .unwrap();

    let expected = DocumentFormat::Yaml
        .parse(
            "\
service: api-prod
serverless:
  variables: ((stage))
provider:
  region: us-east-1
  account: '111'
  tags:
    - platform
    - ((missing))
",
        )
        .unwrap();
    assert_eq!(applied.document, expected);
}

#[tokio::test]
async fn directory_outside_any_repository_is_rejected() {
    let tree = TestTree::new();
    tree.properties("", "infra.properties", &[("stage", "dev")]);

    let orchestrator = Orchestrator::new(Settings::default(), Box::new(GitCli::new()));
    let err = orchestrator
        .resolve(&tree.root(), Some("main".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Resolution { .. }));
}
