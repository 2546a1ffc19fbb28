/// Platform-specific helpers for Windows compatibility.
use std::process::Command;

/// Resolve an npm-installed CLI command name for the current platform.
///
/// On Windows, npm installs create `.cmd` shims (e.g., `npx.cmd`, `vite.cmd`)
/// which `Command::new` cannot find, since it only searches for `.exe` files. This
/// routes the command through `cmd /C` on Windows so the shim resolves.
pub fn npm_cmd(name: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", name]);
        cmd
    } else {
        Command::new(name)
    }
}
