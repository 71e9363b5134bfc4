//! The assistant binary end to end: exit codes and interrupt handling

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_assistant");

/// The binary with a clean environment and a throwaway home directory
fn assistant(home: &TempDir) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_clear()
        .env("HOME", home.path())
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .stdin(Stdio::null());
    cmd
}

#[test]
fn test_missing_key_exits_with_guidance() {
    let home = TempDir::new().unwrap();
    let output = assistant(&home).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: ANTHROPIC_API_KEY environment variable not set"));
    assert!(stderr.contains("Run: export ANTHROPIC_API_KEY='your-key-here'"));
}

#[test]
fn test_blank_key_exits_with_guidance() {
    let home = TempDir::new().unwrap();
    let output = assistant(&home)
        .env("ANTHROPIC_API_KEY", "  ")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ANTHROPIC_API_KEY"));
}

#[test]
fn test_help_exits_zero() {
    let home = TempDir::new().unwrap();
    let output = assistant(&home).arg("-h").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--voice"));
    assert!(stdout.contains("--text"));
}

#[test]
fn test_voice_and_text_flags_conflict() {
    let home = TempDir::new().unwrap();
    let output = assistant(&home)
        .env("ANTHROPIC_API_KEY", "sk-ant-test")
        .args(["-v", "-t"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_end_of_input_says_goodbye() {
    let home = TempDir::new().unwrap();
    let output = assistant(&home)
        .env("ANTHROPIC_API_KEY", "sk-ant-test")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("=== Termux Assistant (Text Mode) ==="));
    assert!(stdout.ends_with("You: Goodbye!\n"));
    assert!(home.path().join("notes").is_dir());
}

#[cfg(unix)]
#[tokio::test]
async fn test_ctrl_c_exits_while_stdin_stays_open() {
    use tokio::io::AsyncReadExt;

    let home = TempDir::new().unwrap();
    let mut child = tokio::process::Command::new(BIN)
        .env_clear()
        .env("HOME", home.path())
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .env("ANTHROPIC_API_KEY", "sk-ant-test")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap();
    let _keyboard = child.stdin.take().unwrap();
    let mut stdout = child.stdout.take().unwrap();

    let mut printed = Vec::new();
    let mut chunk = [0u8; 256];
    tokio::time::timeout(Duration::from_secs(10), async {
        while !String::from_utf8_lossy(&printed).contains("You: ") {
            let n = stdout.read(&mut chunk).await.unwrap();
            assert!(n > 0, "output ended before the prompt");
            printed.extend_from_slice(&chunk[..n]);
        }
    })
    .await
    .expect("prompt should appear");

    // Let the Ctrl-C listener register before signalling
    tokio::time::sleep(Duration::from_millis(300)).await;
    let pid = child.id().unwrap().to_string();
    let sent = Command::new("kill").args(["-INT", pid.as_str()]).status().unwrap();
    assert!(sent.success());

    let status = tokio::time::timeout(Duration::from_secs(5), child.wait())
        .await
        .expect("process should exit with stdin still open")
        .unwrap();
    assert!(status.success());

    stdout.read_to_end(&mut printed).await.unwrap();
    assert!(String::from_utf8_lossy(&printed).ends_with("You: \nGoodbye!\n"));
}
