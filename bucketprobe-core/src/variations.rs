//! Deterministic bucket name variation catalogue.

use std::collections::HashSet;

const ENV_TOKENS: &[&str] = &["dev", "staging", "test", "qa", "prod"];

const RESOURCE_TOKENS: &[&str] = &[
    "logs", "backups", "archive", "resources", "files", "images", "static", "uploads", "cdn",
    "content", "assets", "config", "data", "api",
];

/// Produce the ordered, deduplicated set of candidate names for `base`.
///
/// This is a pure function: the same input always yields the same sequence,
/// with `base` itself first. Duplicates (which arise naturally, e.g. the
/// separator substitutions on a name without separators) are removed by
/// first occurrence.
pub fn generate_variations(base: &str) -> Vec<String> {
    let b = base;
    let mut names: Vec<String> = vec![
        b.to_string(),
        format!("www.{b}"),
        format!("{b}-www"),
        format!("{b}.com"),
        format!("www.{b}.com"),
        format!("{b}-com"),
        format!("www-{b}-com"),
    ];
    names.extend(ENV_TOKENS.iter().map(|e| format!("{b}-{e}")));
    names.extend(ENV_TOKENS.iter().map(|e| format!("{e}-{b}")));
    names.extend(RESOURCE_TOKENS.iter().map(|s| format!("{b}-{s}")));
    names.extend(RESOURCE_TOKENS.iter().map(|s| format!("{s}-{b}")));
    names.extend([
        format!("{b}-s3"),
        format!("s3-{b}"),
        b.replace('_', "-"),
        b.replace('-', "_"),
        format!("{b}-app"),
        format!("app-{b}"),
        format!("{b}-service"),
        format!("service-{b}"),
        format!("{b}-storage"),
        format!("{b}-dist"),
        format!("{b}-v1"),
        format!("{b}-v2"),
        format!("{b}-old"),
        format!("{b}-new"),
        format!("v1-{b}"),
        format!("v2-{b}"),
        format!("{b}.com-dev"),
        format!("{b}.com-test"),
        format!("{b}.com-prod"),
        format!("dev-{b}.com"),
        format!("test-{b}.com"),
        format!("prod-{b}.com"),
    ]);

    let dashed = b.replace('.', "-");
    names.extend([
        dashed.clone(),
        format!("www-{dashed}"),
        format!("{dashed}-dev"),
        format!("{dashed}-prod"),
        format!("{dashed}-logs"),
        format!("{dashed}-assets"),
    ]);

    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    names
}
