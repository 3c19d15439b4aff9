use jsx::{RenderConfig, render, transform, transform_to_call_text};
use jsx_test_support::cases::{CaseStatus, TransformCase, load_transform_cases};
use jsx_test_support::escape_text;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn tests_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

fn run_case(case: &TransformCase) -> String {
    transform_to_call_text(&case.input).unwrap_or_else(|err| {
        panic!(
            "case '{}' hit a fatal error: {err}\ninput: \"{}\"",
            case.id,
            escape_text(&case.input)
        )
    })
}

#[test]
fn toml_case_corpus() {
    let cases = load_transform_cases(&tests_dir().join("cases.toml"));
    assert!(!cases.is_empty(), "case corpus is empty");
    for case in &cases {
        let actual = run_case(case);
        let matched = actual == case.expected;
        match case.status {
            CaseStatus::Active => assert!(
                matched,
                "case '{}' mismatch\ninput:    \"{}\"\nexpected: {}\nactual:   {}",
                case.id,
                escape_text(&case.input),
                case.expected,
                actual
            ),
            CaseStatus::Xfail => assert!(
                !matched,
                "case '{}' matched expected output but is marked xfail; reason: {}",
                case.id,
                case.reason.as_deref().unwrap_or("<missing reason>")
            ),
            CaseStatus::Skip => {}
        }
    }
}

#[derive(Debug, Deserialize)]
struct RenderNames {
    configs: Vec<RenderNameCase>,
}

#[derive(Debug, Deserialize)]
struct RenderNameCase {
    factory: String,
    fragment: String,
    no_props: String,
    input: String,
    expected: String,
}

#[test]
fn render_names_from_toml() {
    let path = tests_dir().join("render_names.toml");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read render names {path:?}: {err}"));
    let names: RenderNames = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse render names {path:?}: {err}"));
    for case in names.configs {
        let config = RenderConfig {
            factory: case.factory,
            fragment: case.fragment,
            no_props: case.no_props,
        };
        let node = transform(&case.input).expect("transform");
        assert_eq!(render(&node, &config), case.expected, "config: {config:?}");
    }
}

#[test]
fn malformed_inputs_never_fail_or_hang() {
    let inputs = [
        "<",
        "<>",
        "</>",
        "<a",
        "<a>",
        "<a b=",
        "<a b='",
        "<a b={",
        "<a>{",
        "<a>{'}",
        "<a></b>",
        "<a><b></a>",
        "<<<<>>>>",
        "{}{}{}",
        "<a/></a>",
        "<a>\u{0}</a>",
        "<é/>",
        "<a>é<</a>",
    ];
    for input in inputs {
        let first = transform_to_call_text(input);
        assert!(first.is_ok(), "input {input:?} failed: {first:?}");
        assert_eq!(first, transform_to_call_text(input), "input {input:?}");
    }
}
