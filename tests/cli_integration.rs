use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn lanry(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lanry").unwrap();
    cmd.arg("--dir")
        .arg(dir)
        .env_remove("LANRY_HOME")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_then_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    lanry(temp_dir.path())
        .args(["add", "2", "The", "Journey"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Chapter 2: The Journey"));
    lanry(temp_dir.path())
        .args(["add", "1", "The Beginning"])
        .assert()
        .success();

    assert!(temp_dir
        .path()
        .join("Chapters/Chapter_001_The Beginning.txt")
        .is_file());

    let output = lanry(temp_dir.path()).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("The Beginning").unwrap();
    let second = stdout.find("The Journey").unwrap();
    assert!(first < second);
}

#[test]
fn test_list_is_default_and_hints_when_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No chapters yet"));
}

#[test]
fn test_existing_files_are_discovered() {
    let temp_dir = tempfile::tempdir().unwrap();
    let chapters = temp_dir.path().join("Chapters");
    fs::create_dir_all(&chapters).unwrap();
    fs::write(chapters.join("Chapter_001_Intro.txt"), "a").unwrap();
    fs::write(chapters.join("Chapter_002_Middle_Part.txt"), "b").unwrap();
    fs::write(chapters.join("notes.txt"), "ignored").unwrap();

    lanry(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Intro"))
        .stdout(predicate::str::contains("Middle Part"))
        .stdout(predicate::str::contains("notes").not());
}

#[test]
fn test_write_from_stdin_then_view() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path())
        .args(["add", "3", "The Revelation"])
        .assert()
        .success();

    lanry(temp_dir.path())
        .args(["write", "3"])
        .write_stdin("It was a dark and stormy night.")
        .assert()
        .success();

    lanry(temp_dir.path())
        .args(["view", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 3: The Revelation"))
        .stdout(predicate::str::contains("Words: 7"))
        .stdout(predicate::str::contains("It was a dark and stormy night."));

    lanry(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("7 words"));

    assert_eq!(
        fs::read_to_string(
            temp_dir
                .path()
                .join("Chapters/Chapter_003_The Revelation.txt")
        )
        .unwrap(),
        "It was a dark and stormy night."
    );
}

#[test]
fn test_write_from_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("draft.txt");
    fs::write(&source, "from a file").unwrap();

    lanry(temp_dir.path()).args(["add", "1", "Intro"]).assert().success();
    lanry(temp_dir.path())
        .args(["write", "1", "--file"])
        .arg(&source)
        .assert()
        .success();

    lanry(temp_dir.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from a file"));
}

#[test]
fn test_duplicate_add_warns_and_keeps_original() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path()).args(["add", "1", "Original"]).assert().success();
    lanry(temp_dir.path())
        .args(["write", "1"])
        .write_stdin("keep me")
        .assert()
        .success();

    lanry(temp_dir.path())
        .args(["add", "1", "Impostor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert!(!temp_dir
        .path()
        .join("Chapters/Chapter_001_Impostor.txt")
        .exists());
    lanry(temp_dir.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));
}

#[test]
fn test_sanitized_title_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path())
        .args(["add", "1", "Chapter: The/End"])
        .assert()
        .success();
    lanry(temp_dir.path())
        .args(["write", "1"])
        .write_stdin("fin")
        .assert()
        .success();

    assert!(temp_dir
        .path()
        .join("Chapters/Chapter_001_Chapter_ The_End.txt")
        .is_file());
    lanry(temp_dir.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fin"));
}

#[test]
fn test_unknown_chapter_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path())
        .args(["view", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chapter not found: 9"));
}

#[test]
fn test_zero_chapter_number_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path())
        .args(["add", "0", "Prologue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chapter number"));
}

#[test]
fn test_path_prints_chapter_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path()).args(["add", "4", "Rain"]).assert().success();
    lanry(temp_dir.path())
        .args(["path", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter_004_Rain.txt"));
}

#[test]
fn test_export_archive_and_plain() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path()).args(["add", "1", "Intro"]).assert().success();
    lanry(temp_dir.path())
        .args(["write", "1"])
        .write_stdin("hello")
        .assert()
        .success();

    let archive = temp_dir.path().join("book.tar.gz");
    lanry(temp_dir.path())
        .args(["export", "--output"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 chapter(s)"));
    let bytes = fs::read(&archive).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    let plain = temp_dir.path().join("intro.txt");
    lanry(temp_dir.path())
        .args(["export", "1", "--plain", "--output"])
        .arg(&plain)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&plain).unwrap(), "hello");

    lanry(temp_dir.path())
        .args(["export", "--plain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one chapter"));
}

#[test]
fn test_init_and_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "SUPABASE_URL=https://example.supabase.co\nSUPABASE_KEY=\"abcdefghijkl\"\n",
    )
    .unwrap();

    lanry(temp_dir.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .arg("init")
        .assert()
        .success();
    assert!(temp_dir.path().join("Chapters").is_dir());
    assert!(temp_dir.path().join("lanry.json").is_file());

    lanry(temp_dir.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("supabase_url = https://example.supabase.co"))
        .stdout(predicate::str::contains("abcd*"))
        .stdout(predicate::str::contains("abcdefghijkl").not());
}

#[test]
fn test_upload_without_service_url_fails_before_network() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("lanry.json"), "{}").unwrap();
    lanry(temp_dir.path()).args(["add", "1", "Intro"]).assert().success();
    lanry(temp_dir.path())
        .args(["write", "1"])
        .write_stdin("text")
        .assert()
        .success();

    lanry(temp_dir.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .args([
            "upload", "1", "--novel", "n-1", "--email", "a@b.c", "--password", "pw",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SUPABASE_URL"));
}

#[test]
fn test_edit_with_scripted_editor() {
    let temp_dir = tempfile::tempdir().unwrap();
    lanry(temp_dir.path()).args(["add", "1", "Intro"]).assert().success();

    if cfg!(unix) {
        let script = temp_dir.path().join("editor.sh");
        fs::write(&script, "#!/bin/sh\nprintf 'edited body' > \"$1\"\n").unwrap();

        lanry(temp_dir.path())
            .env("EDITOR", format!("sh {}", script.display()))
            .args(["edit", "1"])
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Chapters/Chapter_001_Intro.txt")).unwrap(),
            "edited body"
        );
    }
}
