use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

/// The `wikt` binary with colors disabled, run from `dir` so that no config
/// outside the test is discovered.
pub fn wikt_cmd(dir: &std::path::Path) -> Command {
	let mut cmd = Command::new(get_cargo_bin("wikt"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").current_dir(dir);
	cmd
}
