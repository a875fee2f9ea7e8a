use std::fs;

use clap::Parser;
use tempfile::tempdir;

use icrom::IcromError;
use icrom_cli::{Args, run};

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["icrom", "--log-level", "off"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

fn signal_names(xml: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(xml).expect("output is well-formed XML");
    doc.descendants()
        .filter(|n| n.has_tag_name("signal"))
        .filter_map(|n| n.attribute("name").map(str::to_string))
        .collect()
}

#[test]
fn e2e_generates_board_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("rom.bin");
    let output = temp_dir.path().join("rom.brd");
    fs::write(&input, [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67]).unwrap();

    run(&args(&[
        "-w",
        "8",
        "-b",
        "8",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--title",
        "smoke",
    ]))
    .expect("run succeeds");

    let xml = fs::read_to_string(&output).unwrap();
    let names = signal_names(&xml);
    assert_eq!(names.len(), 16);
    assert_eq!(names[0], "word000");
    assert_eq!(names[15], "bit007");
    assert!(xml.contains(">smoke</text>"));
}

#[test]
fn e2e_millimetre_flags() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("rom.bin");
    let output = temp_dir.path().join("rom.brd");
    fs::write(&input, [0x5A; 4]).unwrap();

    run(&args(&[
        "-w",
        "4",
        "-b",
        "8",
        "-u",
        "mm",
        "--width",
        "60",
        "--length",
        "60",
        "--drive-pitch",
        "1.27",
        "--sense-pitch",
        "1.27",
        "--no-labels",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]))
    .expect("run succeeds");

    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(signal_names(&xml).len(), 12);
    assert!(!xml.contains("<text"));
}

#[test]
fn e2e_config_file() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("icrom.toml");
    let input = temp_dir.path().join("rom.bin");
    let output = temp_dir.path().join("rom.brd");
    fs::write(&config, "[array]\nwords = 2\nbits = 16\n\n[outline]\narray_frame = false\n").unwrap();
    fs::write(&input, [0xFF, 0x00, 0x0F, 0xF0]).unwrap();

    run(&args(&[
        "-c",
        config.to_str().unwrap(),
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]))
    .expect("run succeeds");

    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(signal_names(&xml).len(), 18);
    assert!(!xml.contains("<rectangle"));
}

#[test]
fn e2e_size_mismatch_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("rom.bin");
    let output = temp_dir.path().join("rom.brd");
    fs::write(&input, [0u8; 3]).unwrap();

    let err = run(&args(&[
        "-w",
        "4",
        "-b",
        "8",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]))
    .unwrap_err();

    assert!(matches!(err, IcromError::Data(_)));
    assert!(!output.exists());
}

#[test]
fn e2e_malformed_length() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("rom.bin");
    let output = temp_dir.path().join("rom.brd");
    fs::write(&input, [0u8; 8]).unwrap();

    let err = run(&args(&[
        "-w",
        "8",
        "-b",
        "8",
        "--sense-trace",
        "37ug",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]))
    .unwrap_err();

    match err {
        IcromError::Parse { src, .. } => assert_eq!(src, "37ug"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().unwrap();
    let err = run(&args(&[
        "-i",
        temp_dir.path().join("absent.bin").to_str().unwrap(),
    ]))
    .unwrap_err();
    assert!(matches!(err, IcromError::Io(_)));
}
