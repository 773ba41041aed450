//! Tests for placeholder substitution over nested documents

use params_core::{DocumentFormat, Node, Properties, Scalar, Substituter, substitute_document};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn params(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn rewrites_strings_at_every_depth() {
    let document: Node = json!({
        "service": "app-((env))",
        "provider": {
            "stage": "((env))",
            "environment": [
                {"NAME": "((env))-db"},
                ["nested-((env))", 3]
            ]
        }
    })
    .into();

    let result = substitute_document(&document, &params(&[("env", "prod")]), None).unwrap();

    let expected: Node = json!({
        "service": "app-prod",
        "provider": {
            "stage": "prod",
            "environment": [
                {"NAME": "prod-db"},
                ["nested-prod", 3]
            ]
        }
    })
    .into();
    assert_eq!(result, expected);
}

#[test]
fn non_string_scalars_are_untouched() {
    let document: Node = json!({"memory": 512, "debug": false, "ratio": 1.5, "none": null}).into();

    let result = substitute_document(&document, &params(&[("512", "x"), ("false", "y")]), None)
        .unwrap();

    assert_eq!(result, document);
}

#[test]
fn mapping_keys_are_not_substituted() {
    let document: Node = json!({"((env))": "((env))"}).into();

    let result = substitute_document(&document, &params(&[("env", "prod")]), None).unwrap();

    assert_eq!(result, json!({"((env))": "prod"}).into());
}

#[test]
fn reserved_field_is_skipped_only_at_top_level() {
    let document: Node = json!({
        "service": "app-((env))",
        "serverless": {"config": "((env))"},
        "custom": {"serverless": "((env))"}
    })
    .into();

    let result =
        substitute_document(&document, &params(&[("env", "prod")]), Some("serverless")).unwrap();

    let expected: Node = json!({
        "service": "app-prod",
        "serverless": {"config": "((env))"},
        "custom": {"serverless": "prod"}
    })
    .into();
    assert_eq!(result, expected);
}

#[test]
fn reserved_string_field_is_untouched() {
    let document: Node = json!({"service": "app-((env))", "self": "((env))-ref"}).into();

    let result = substitute_document(&document, &params(&[("env", "prod")]), Some("self")).unwrap();

    assert_eq!(
        result,
        json!({"service": "app-prod", "self": "((env))-ref"}).into()
    );
}

#[test]
fn top_level_scalar_document_is_substituted() {
    let result =
        substitute_document(&Node::string("((a))"), &params(&[("a", "b")]), Some("a")).unwrap();
    assert_eq!(result, Node::string("b"));
}

#[test]
fn yaml_document_keeps_layout_after_substitution() {
    let yaml = "service: app-((env))\nprovider:\n  name: aws\n  memorySize: 256\n";
    let document = DocumentFormat::Yaml.parse(yaml).unwrap();

    let result = substitute_document(&document, &params(&[("env", "dev")]), None).unwrap();
    let rendered = DocumentFormat::Yaml.render(&result).unwrap();

    assert_eq!(
        rendered,
        "service: app-dev\nprovider:\n  name: aws\n  memorySize: 256\n"
    );
}

#[test]
fn yaml_tags_survive_substitution() {
    let yaml = "\
service: app-((env))
resources:
  Role: !GetAtt LambdaRole.Arn
  Bucket: !Ref DeployBucket
  Name: !Sub \"x-((env))\"
";
    let document = DocumentFormat::Yaml.parse(yaml).unwrap();

    let result = substitute_document(&document, &params(&[("env", "prod")]), None).unwrap();
    let rendered = DocumentFormat::Yaml.render(&result).unwrap();

    assert!(rendered.contains("service: app-prod"), "{rendered}");
    assert!(rendered.contains("Role: !GetAtt LambdaRole.Arn"), "{rendered}");
    assert!(rendered.contains("Bucket: !Ref DeployBucket"), "{rendered}");
    assert_eq!(
        result.get("resources").and_then(|r| r.get("Name")),
        Some(&Node::Tagged {
            tag: "!Sub".to_string(),
            value: Box::new(Node::string("x-prod")),
        })
    );
}

#[test]
fn large_parameter_sets_substitute() {
    let params: Properties = (0..20_000)
        .map(|i| {
            (
                format!("some.reasonably.long.property.key.number_{i}"),
                format!("value-{i}"),
            )
        })
        .collect();
    let document: Node = json!({
        "first": "((some.reasonably.long.property.key.number_0))",
        "last": "[((some.reasonably.long.property.key.number_19999))]",
        "unknown": "((some.reasonably.long.property.key.number_20000))"
    })
    .into();

    let result = substitute_document(&document, &params, None).unwrap();

    let expected: Node = json!({
        "first": "value-0",
        "last": "[value-19999]",
        "unknown": "((some.reasonably.long.property.key.number_20000))"
    })
    .into();
    assert_eq!(result, expected);
}

fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.-]{0,10}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9 /:-]{0,12}"
}

fn leaf_text(keys: Vec<String>) -> impl Strategy<Value = String> {
    let token = if keys.is_empty() {
        Just("plain".to_string()).boxed()
    } else {
        prop::sample::select(keys)
            .prop_map(|k| format!("(({k}))"))
            .boxed()
    };
    prop::collection::vec(prop_oneof![token, value()], 0..5).prop_map(|parts| parts.concat())
}

fn tree(keys: Vec<String>) -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        leaf_text(keys).prop_map(Node::string),
        any::<i64>().prop_map(|i| Node::Scalar(Scalar::Integer(i))),
        any::<bool>().prop_map(|b| Node::Scalar(Scalar::Bool(b))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|entries| Node::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn params_and_tree() -> impl Strategy<Value = (Properties, Node)> {
    prop::collection::btree_map(key(), value(), 0..6).prop_flat_map(|params| {
        let keys: Vec<String> = params.keys().cloned().collect();
        (Just(params), tree(keys))
    })
}

fn contains_placeholder(node: &Node, params: &Properties) -> bool {
    match node {
        Node::Scalar(Scalar::String(s)) => params.keys().any(|k| s.contains(&format!("(({k}))"))),
        Node::Scalar(_) => false,
        Node::Sequence(items) => items.iter().any(|n| contains_placeholder(n, params)),
        Node::Mapping(map) => map.values().any(|n| contains_placeholder(n, params)),
        Node::Tagged { value, .. } => contains_placeholder(value, params),
    }
}

proptest! {
    #[test]
    fn substitution_is_idempotent((params, document) in params_and_tree()) {
        let substituter = Substituter::new(&params);
        let once = substituter.apply(&document, None);
        let twice = substituter.apply(&once, None);

        // Values are placeholder-free here, so nothing is left to expand
        prop_assert!(!contains_placeholder(&once, &params));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn values_are_inserted_verbatim(k in key(), other in key(), other_value in value()) {
        prop_assume!(k != other);
        let params: Properties = [
            (k.clone(), format!("(({other}))")),
            (other.clone(), other_value),
        ]
        .into_iter()
        .collect();

        let result = Substituter::new(&params).substitute_str(&format!("(({k}))")).into_owned();

        prop_assert_eq!(result, format!("(({other}))"));
    }

    #[test]
    fn unknown_placeholders_survive(text in "[a-z ]{0,10}") {
        let params = params(&[("known", "v")]);
        let input = format!("{text}((unknown)){text}");

        let result = Substituter::new(&params).substitute_str(&input).into_owned();

        prop_assert_eq!(result, input);
    }
}
