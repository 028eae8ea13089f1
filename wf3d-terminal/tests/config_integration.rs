//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use wf3d_core::{DividePolicy, Solid};
use wf3d_terminal::AppConfig;

fn config_dir(name: &str, default: &str, user: Option<&str>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wf3d-config-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("default.toml"), default).unwrap();
    if let Some(user) = user {
        fs::write(dir.join("user.toml"), user).unwrap();
    }
    dir
}

#[test]
#[serial]
fn test_env_override() {
    let dir = config_dir("env", "[scene]\ninitial_solid = \"cube\"\n", None);

    std::env::set_var("WF3D_SCENE__INITIAL_SOLID", "icosahedron");
    std::env::set_var("WF3D_INPUT__ZOOM_STEP", "1.25");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("WF3D_SCENE__INITIAL_SOLID");
    std::env::remove_var("WF3D_INPUT__ZOOM_STEP");

    let config = config.unwrap();
    assert_eq!(config.scene.initial_solid, Solid::Icosahedron);
    assert_eq!(config.input.zoom_step, 1.25);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = config_dir(
        "user",
        "[scene]\ninitial_solid = \"cube\"\nculling = false\n\n[terminal]\ntarget_fps = 20\n",
        Some("[scene]\ninitial_solid = \"dodecahedron\"\ndivide_policy = \"propagate\"\n"),
    );

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.scene.initial_solid, Solid::Dodecahedron);
    assert_eq!(config.scene.divide_policy, DividePolicy::Propagate);
    // untouched keys fall through to the lower layers
    assert!(!config.scene.culling);
    assert_eq!(config.terminal.target_fps, 20);
    assert_eq!(config.terminal.units_per_row, 8.0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    let config = AppConfig::load_from("definitely/not/a/config/dir").unwrap();
    assert_eq!(config.scene.initial_solid, Solid::Pyramid);
    assert_eq!(config.input.rotate_divisor, 20.0);
}

#[test]
#[serial]
fn test_unknown_solid_is_an_error() {
    let dir = config_dir("bad", "[scene]\ninitial_solid = \"teapot\"\n", None);
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_repository_default_config_loads() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config");
    let config = AppConfig::load_from(dir).unwrap();
    assert_eq!(config.scene.initial_solid, Solid::Pyramid);
    assert!(config.scene.culling);
    assert_eq!(config.debug.filter(), "warn");
}
