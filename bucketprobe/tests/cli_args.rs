//! CLI surface checks that never touch the network.

use assert_cmd::Command;
use predicates::prelude::*;

fn bucketprobe() -> Command {
    Command::cargo_bin("bucketprobe").expect("binary built")
}

#[test]
fn help_documents_the_flags() {
    bucketprobe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--web-only"))
        .stdout(predicate::str::contains("--cli-only"))
        .stdout(predicate::str::contains("--variations"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--test-write"));
}

#[test]
fn bucket_or_file_is_required() {
    bucketprobe().assert().failure();
}

#[test]
fn bucket_and_file_conflict() {
    bucketprobe()
        .args(["-b", "acme", "-f", "names.txt"])
        .assert()
        .failure();
}

#[test]
fn web_only_and_cli_only_conflict() {
    bucketprobe()
        .args(["-b", "acme", "-w", "-c"])
        .assert()
        .failure();
}

#[test]
fn names_file_without_channel_restriction_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("names.txt");
    std::fs::write(&path, "acme\nacme-dev\n").expect("write names");

    bucketprobe()
        .args(["-f", path.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--web-only or --cli-only"));
}

#[test]
fn missing_tool_exits_with_distinct_code_before_probing() {
    // scrub PATH so the AWS CLI cannot be found
    bucketprobe()
        .args(["-b", "acme", "--cli-only"])
        .env("PATH", "")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("aws"));
}

#[test]
fn empty_bucket_name_is_rejected() {
    bucketprobe()
        .args(["-b", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_read_requires_test_write() {
    bucketprobe()
        .args(["-b", "acme", "--test-read"])
        .assert()
        .failure();
}
