use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const TRANSFORM_CASES_FORMAT_V1: &str = "jsx-transform-cases-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct CaseManifest {
    format: String,
    cases: Vec<TransformCase>,
}

/// One input/output pair of a TOML case corpus.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TransformCase {
    pub id: String,
    pub input: String,
    /// Expected call text with default render names.
    pub expected: String,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    #[default]
    Active,
    Xfail,
    Skip,
}

pub fn load_transform_cases(path: &Path) -> Vec<TransformCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case TOML {path:?}: {err}"));
    let manifest: CaseManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse case TOML {path:?}: {err}"));
    assert_eq!(
        manifest.format, TRANSFORM_CASES_FORMAT_V1,
        "unsupported case manifest format in {path:?}"
    );

    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate case id in {path:?}: {}",
            case.id
        );
        if case.status != CaseStatus::Active {
            assert!(
                case.reason.as_deref().is_some_and(|r| !r.trim().is_empty()),
                "non-active case '{}' missing reason in {path:?}",
                case.id
            );
        }
    }
    manifest.cases
}
