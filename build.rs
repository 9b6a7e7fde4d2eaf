use std::{fs, process::Command, time::SystemTime};

fn main() {
  let now = SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map(|d| d.as_millis())
    .unwrap_or_default();
  println!("cargo:rustc-env=BUILD_TIME={}", now);
  println!("cargo:rerun-if-changed=.git/HEAD");

  let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_else(head_branch);
  let commit = git(&["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  let commit_time = git(&["show", "-s", "--format=%ct", "HEAD"])
    .and_then(|s| s.parse::<u64>().ok())
    .map(|secs| secs * 1000)
    .unwrap_or(0);

  println!("cargo:rustc-env=GIT_BRANCH={}", branch);
  println!("cargo:rustc-env=GIT_COMMIT={}", commit);
  println!("cargo:rustc-env=GIT_COMMIT_TIME={}", commit_time);
}

fn git(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
  (!value.is_empty()).then_some(value)
}

// Falls back to reading .git/HEAD when the git binary is unavailable.
fn head_branch() -> String {
  fs::read_to_string(".git/HEAD")
    .ok()
    .and_then(|head| {
      head
        .strip_prefix("ref: ")
        .and_then(|r| r.trim().rsplit('/').next())
        .map(str::to_string)
    })
    .unwrap_or_else(|| "unknown".to_string())
}
