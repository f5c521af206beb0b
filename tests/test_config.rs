use std::io::Write;
use std::path::PathBuf;

use sky_shooter::config::*;
use sky_shooter::error::GameError;

#[test]
fn defaults_are_valid() {
    let c = Config::default();
    assert_eq!(c.fps, DEFAULT_FPS);
    assert_eq!(c.seed, None);
    assert_eq!(c.audio, AudioMode::Log);
    assert_eq!(c.log_file, PathBuf::from("sky_shooter.log"));
    assert!(c.validate().is_ok());
    assert_eq!(c.frame_ms(), 16);
}

#[test]
fn empty_file_yields_defaults() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn fields_are_read_from_toml() {
    let c = Config::from_toml_str(
        r#"
        fps = 30
        seed = 1234
        audio = "bell"
        log_file = "/tmp/shooter.log"
        log_filter = "sky_shooter=debug"
        "#,
    )
    .unwrap();
    assert_eq!(c.fps, 30);
    assert_eq!(c.seed, Some(1234));
    assert_eq!(c.audio, AudioMode::Bell);
    assert_eq!(c.log_file, PathBuf::from("/tmp/shooter.log"));
    assert_eq!(c.log_filter, "sky_shooter=debug");
    assert_eq!(c.frame_ms(), 33);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Config::from_toml_str("speed = 3").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn bad_audio_mode_is_rejected() {
    let err = Config::from_toml_str(r#"audio = "loud""#).unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn out_of_range_fps_is_rejected() {
    for fps in [0, MIN_FPS - 1, MAX_FPS + 1] {
        let err = Config::from_toml_str(&format!("fps = {fps}")).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "fps", .. }), "{err}");
    }
    assert!(Config::from_toml_str(&format!("fps = {MAX_FPS}")).is_ok());
}

#[test]
fn blank_log_filter_is_rejected() {
    let c = Config {
        log_filter: "  ".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConfig { field: "log_filter", .. })
    ));
}

#[test]
fn load_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fps = 120\naudio = \"off\"").unwrap();
    let c = Config::load(file.path()).unwrap();
    assert_eq!(c.fps, 120);
    assert_eq!(c.audio, AudioMode::Off);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}
