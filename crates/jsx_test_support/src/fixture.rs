use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CALL_FORMAT_V1: &str = "jsx-call-v1";
pub const OUTLINE_FORMAT_V1: &str = "jsx-outline-v1";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureStatus {
    Active,
    Xfail,
    Skip,
}

impl FixtureStatus {
    pub fn parse(raw: Option<&str>, path: &Path) -> Self {
        match raw {
            Some("active") | None => FixtureStatus::Active,
            Some("xfail") => FixtureStatus::Xfail,
            Some("skip") => FixtureStatus::Skip,
            Some(other) => panic!("unsupported status '{other}' in {path:?}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExpectedFile {
    pub format: String,
    pub status: FixtureStatus,
    pub reason: Option<String>,
    pub lines: Vec<String>,
}

/// Parse an expected-output file: `# key: value` headers, then content lines.
///
/// `format` is required and must come first; `xfail`/`skip` need a `reason`.
pub fn parse_expected_file(path: &Path) -> ExpectedFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read expected file {path:?}: {err}"));
    let mut lines = Vec::new();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("# ") {
            let (key, value) = stripped
                .split_once(':')
                .unwrap_or_else(|| panic!("invalid header in {path:?}: '{line}'"));
            let key = key.trim().to_ascii_lowercase();
            assert!(
                matches!(key.as_str(), "format" | "status" | "reason"),
                "unsupported header '{key}' in {path:?}"
            );
            if headers.is_empty() {
                assert_eq!(
                    key, "format",
                    "first header must be 'format' in {path:?}, found '{key}'"
                );
            }
            if headers.insert(key.clone(), value.trim().to_string()).is_some() {
                panic!("duplicate header '{key}' in {path:?}");
            }
        } else {
            lines.push(line.to_string());
        }
    }

    let format = headers
        .get("format")
        .cloned()
        .unwrap_or_else(|| panic!("missing format header in {path:?}"));
    assert!(
        format == CALL_FORMAT_V1 || format == OUTLINE_FORMAT_V1,
        "unsupported format '{format}' in {path:?}"
    );
    let status = FixtureStatus::parse(headers.get("status").map(String::as_str), path);
    let reason = headers.get("reason").cloned();
    if matches!(status, FixtureStatus::Xfail | FixtureStatus::Skip)
        && reason.as_deref().unwrap_or("").is_empty()
    {
        panic!("non-active fixture missing reason in {path:?}");
    }
    if lines.is_empty() {
        panic!("expected file {path:?} has no content lines");
    }

    ExpectedFile {
        format,
        status,
        reason,
        lines,
    }
}
