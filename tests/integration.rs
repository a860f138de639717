use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn pitch_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pitch");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(
        root.join("teams.txt"),
        "West:\nPrasad\nSuresh\n\nEast:\nRavi\n",
    )
    .unwrap();

    // The hashed provider keeps tests deterministic and fully offline;
    // wide vectors keep the tiny test vocabulary collision-free.
    let config_content = format!(
        r#"[corpus]
path = "{}/teams.txt"

[embedding]
provider = "hashed"
dims = 65536
"#,
        root.display()
    );

    let config_path = root.join("pitchside.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_pitch(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = pitch_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run pitch binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn run_pitch_with_stdin(config_path: &Path, args: &[&str], input: &str) -> (String, String, bool) {
    let binary = pitch_binary();
    let mut child = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to run pitch binary at {:?}: {}", binary, e));

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_ask_member_specific_answer() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_pitch(&config_path, &["ask", "ravi"]);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Ravi belongs to East."));
    assert!(stdout.contains("• Ravi"));
}

#[test]
fn test_ask_label_generic_answer() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_pitch(&config_path, &["ask", "west"]);
    assert!(success);
    assert!(stdout.contains("West Players:"));
    assert!(stdout.contains("• Prasad"));
    assert!(stdout.contains("• Suresh"));
    assert!(!stdout.contains("belongs to"));
}

#[test]
fn test_ask_far_query_falls_back() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_pitch(&config_path, &["ask", "badminton schedule"]);
    assert!(success);
    assert!(stdout.contains("Sorry, I don't have information related to your question."));
}

#[test]
fn test_ask_empty_query_falls_back() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_pitch(&config_path, &["ask", "   "]);
    assert!(success);
    assert!(stdout.contains("Sorry, I don't have information related to your question."));
}

#[test]
fn test_corpus_lists_chunks() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_pitch(&config_path, &["corpus"]);
    assert!(success, "corpus failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Total chunks: 2"));
    assert!(stdout.contains("West"));
    assert!(stdout.contains("East"));
}

#[test]
fn test_corpus_override_flag() {
    let (tmp, config_path) = setup_test_env();

    let other = tmp.path().join("other.txt");
    fs::write(&other, "North:\nKiran\n").unwrap();

    let (stdout, _, success) = run_pitch(
        &config_path,
        &["corpus", "--corpus", other.to_str().unwrap()],
    );
    assert!(success);
    assert!(stdout.contains("Total chunks: 1"));
    assert!(stdout.contains("North"));
}

#[test]
fn test_chat_answers_then_exits_on_sentinel() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_pitch_with_stdin(&config_path, &["chat"], "ravi\nexit\n");
    assert!(success, "chat failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Loaded 2 chunks"));
    assert!(stdout.contains("Answer:"));
    assert!(stdout.contains("Ravi belongs to East."));
}

#[test]
fn test_chat_exit_sentinel_is_case_insensitive() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_pitch_with_stdin(&config_path, &["chat"], "EXIT\n");
    assert!(success);
}

#[test]
fn test_chat_ends_on_eof() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_pitch_with_stdin(&config_path, &["chat"], "west team\n");
    assert!(success);
    assert!(stdout.contains("West Players:"));
}

#[test]
fn test_missing_corpus_file_is_fatal() {
    let (tmp, _) = setup_test_env();

    let config_path = tmp.path().join("bad.toml");
    fs::write(
        &config_path,
        "[corpus]\npath = \"/nonexistent/teams.txt\"\n\n[embedding]\nprovider = \"hashed\"\n",
    )
    .unwrap();

    let (_, stderr, success) = run_pitch(&config_path, &["ask", "ravi"]);
    assert!(!success);
    assert!(stderr.contains("corpus"), "stderr: {}", stderr);
}

#[test]
fn test_empty_corpus_is_fatal() {
    let (tmp, config_path) = setup_test_env();

    fs::write(tmp.path().join("teams.txt"), "\n\n   \n\n").unwrap();

    let (_, stderr, success) = run_pitch(&config_path, &["ask", "ravi"]);
    assert!(!success);
    assert!(stderr.contains("no chunks"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_is_fatal() {
    let (tmp, _) = setup_test_env();

    let config_path = tmp.path().join("bad.toml");
    fs::write(
        &config_path,
        "[corpus]\npath = \"k.txt\"\n\n[embedding]\nprovider = \"faiss\"\n",
    )
    .unwrap();

    let (_, stderr, success) = run_pitch(&config_path, &["ask", "ravi"]);
    assert!(!success);
    assert!(stderr.contains("provider"), "stderr: {}", stderr);
}
