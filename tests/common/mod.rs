use assert_cmd::Command;
use std::path::Path;

pub fn gymrat_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gymrat").unwrap();
    cmd.env_remove("GYMRAT_DATA_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command already pointed at `data_dir`
#[allow(dead_code)]
pub fn gymrat_in(data_dir: &Path) -> Command {
    let mut cmd = gymrat_cmd();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}
