//! Side-effect-free presence checks.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::client::{ClientContext, process};

/// Whether the directory holding `config_path` exists, or failing that the
/// application directory one level up.
///
/// The parent is skipped when it is a shared root (home, `~/.config`,
/// Application Support, AppData) since those exist on every machine.
pub fn config_dir_present(ctx: &ClientContext, config_path: &Path) -> bool {
    let Some(config_dir) = config_path.parent() else {
        return false;
    };
    if config_dir.is_dir() {
        return true;
    }
    match config_dir.parent() {
        Some(app_dir) if !is_shared_root(ctx, app_dir) => app_dir.is_dir(),
        _ => false,
    }
}

fn is_shared_root(ctx: &ClientContext, dir: &Path) -> bool {
    let shared = [
        ctx.home_dir.clone(),
        ctx.xdg_config_dir(),
        ctx.app_support_dir(),
        ctx.app_data_dir(),
        ctx.home_dir.join("Library"),
        ctx.home_dir.join(".config"),
    ];
    shared.iter().any(|root| root == dir)
}

/// Whether any of `paths` exists.
pub fn any_exists(paths: &[PathBuf]) -> bool {
    paths.iter().any(|path| path.exists())
}

/// Locate an agent executable.
///
/// Order: `candidates` (agent-specific install dirs), the context's system
/// directories, then the search path. The first file that answers
/// `--version` within the context's command timeout wins.
pub fn find_binary(ctx: &ClientContext, name: &str, candidates: &[PathBuf]) -> Option<PathBuf> {
    let fixed = candidates
        .iter()
        .cloned()
        .chain(ctx.system_bin_dirs.iter().map(|dir| dir.join(name)))
        .filter(|path| path.is_file());

    let on_path = std::iter::once_with(|| {
        which::which_in(name, ctx.search_path.as_ref(), &ctx.working_dir)
            .inspect_err(|err| debug!(binary = name, error = %err, "not on search path"))
            .ok()
    })
    .flatten();

    let found = fixed
        .chain(on_path)
        .find(|path| responds_to_version(path, ctx.command_timeout));
    match &found {
        Some(path) => debug!(binary = name, path = %path.display(), "agent CLI found"),
        None => debug!(binary = name, "no agent CLI answered --version"),
    }
    found
}

fn responds_to_version(path: &Path, timeout: Duration) -> bool {
    match process::status_within(Command::new(path).arg("--version"), timeout) {
        Ok(status) => status.success(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "--version check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Platform;
    use tempfile::TempDir;

    #[test]
    fn config_dir_counts_as_present() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux);
        std::fs::create_dir_all(temp.path().join(".kiro")).expect("mkdir");

        assert!(config_dir_present(&ctx, &temp.path().join(".kiro/mcp.json")));
        assert!(!config_dir_present(&ctx, &temp.path().join(".warp/mcp.json")));
    }

    #[test]
    fn app_dir_counts_unless_it_is_a_shared_root() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux);
        std::fs::create_dir_all(temp.path().join(".config/Code")).expect("mkdir");

        // ~/.config/Code exists, ~/.config/Code/User does not.
        assert!(config_dir_present(
            &ctx,
            &temp.path().join(".config/Code/User/mcp.json")
        ));
        // ~/.config exists but is shared by every application.
        assert!(!config_dir_present(
            &ctx,
            &temp.path().join(".config/cursor/mcp.json")
        ));
    }

    #[test]
    fn missing_binary_is_not_found() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux);

        assert_eq!(find_binary(&ctx, "claude", &[temp.path().join("claude")]), None);
    }

    #[cfg(unix)]
    #[test]
    fn binary_must_answer_version() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("create temp dir");
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).expect("mkdir");
        for (name, body) in [("good", "exit 0"), ("broken", "exit 3")] {
            let path = bin.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("chmod");
        }
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux).with_search_path(&bin);

        assert_eq!(find_binary(&ctx, "good", &[]), Some(bin.join("good")));
        assert_eq!(find_binary(&ctx, "broken", &[]), None);
    }

    #[cfg(unix)]
    #[test]
    fn broken_install_dir_binary_falls_through_to_search_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("create temp dir");
        let stale = temp.path().join(".local/bin/amp");
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(stale.parent().expect("parent")).expect("mkdir");
        std::fs::create_dir_all(&bin).expect("mkdir");
        for (path, body) in [(stale.clone(), "exit 1"), (bin.join("amp"), "exit 0")] {
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("chmod");
        }
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux).with_search_path(&bin);

        assert_eq!(find_binary(&ctx, "amp", &[stale]), Some(bin.join("amp")));
    }

    #[cfg(unix)]
    #[test]
    fn hanging_binary_is_not_found_after_timeout() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let temp = TempDir::new().expect("create temp dir");
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).expect("mkdir");
        let path = bin.join("amp");
        std::fs::write(&path, "#!/bin/sh\nexec sleep 5\n").expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux)
            .with_search_path(&bin)
            .with_command_timeout(Duration::from_millis(300));

        let started = Instant::now();
        assert_eq!(find_binary(&ctx, "amp", &[]), None);
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
