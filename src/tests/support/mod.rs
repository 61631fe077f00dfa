pub mod app_state_builder;
pub mod auth_helper;
pub mod fixtures;
pub mod media_fakes;
pub mod sqlite;
pub mod stubs;

use std::path::PathBuf;

pub fn load_test_env() {
    dotenvy::from_filename(".env.test").ok();
}

/// Fresh directory under the system temp dir; callers remove it when done.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("portfolio-{label}-{}", uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
