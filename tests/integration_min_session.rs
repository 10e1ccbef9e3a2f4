// Drives the compiled binary through a PTY to exercise the real event loop
// and crossterm input handling.
//
// Requires a TTY; expectrl allocates a pseudo terminal. Ignored by default:
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn quick_test_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("typingo");
    let dir = tempfile::tempdir()?;
    let cmd = format!(
        "{} --config {} --mode quick --offline",
        bin.display(),
        dir.path().join("config.json").display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(300));

    // space starts the quick test
    p.send(" ")?;
    p.send(typingo::mode::QUICK_TEXT)?;
    std::thread::sleep(Duration::from_millis(300));

    // results: back to the menu, then quit
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}
