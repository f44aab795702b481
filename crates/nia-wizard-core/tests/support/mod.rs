//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nia_wizard_core::client::{ClientContext, Platform};
use nia_wizard_core::mcp::{ApiKey, InstallMode, InstallRequest, ServerConfigBuilder};
use tempfile::TempDir;

pub const API_KEY: &str = "nk_test_key_123";

/// A temporary home directory and a context that sees nothing else.
pub struct Sandbox {
    pub temp: TempDir,
    pub ctx: ClientContext,
}

impl Sandbox {
    pub fn new(platform: Platform) -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), platform);
        Self { temp, ctx }
    }

    pub fn linux() -> Self {
        Self::new(Platform::Linux)
    }

    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path(relative);
        std::fs::create_dir_all(&dir).expect("create dir");
        dir
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, contents).expect("write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("read file")
    }

    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).expect("valid JSON")
    }
}

pub fn api_key() -> ApiKey {
    ApiKey::parse(API_KEY).expect("valid key")
}

pub fn request<'a>(
    key: &'a ApiKey,
    mode: InstallMode,
    builder: &'a ServerConfigBuilder,
) -> InstallRequest<'a> {
    InstallRequest::new(key, mode, builder)
}

/// Install a fake agent executable into `bin`.
///
/// The script answers `--version`, appends every other invocation to
/// `<bin>/<name>.log` and keeps a registered-server list in
/// `<bin>/<name>.servers` for `mcp add`/`mcp remove`/`mcp list`.
/// `add_exit` is the exit code of `mcp add`.
#[cfg(unix)]
pub fn fake_agent(bin: &Path, name: &str, add_exit: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(bin).expect("create bin dir");
    let log = bin.join(format!("{name}.log"));
    let servers = bin.join(format!("{name}.servers"));
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "{name} 1.0.0"
  exit 0
fi
echo "$@" >> "{log}"
case "$1 $2" in
  "mcp list")
    cat "{servers}" 2>/dev/null
    exit 0
    ;;
  "mcp add")
    if [ {add_exit} -ne 0 ]; then
      echo "add refused" >&2
      exit {add_exit}
    fi
    if grep -q "^nia:" "{servers}" 2>/dev/null; then
      echo "server nia already exists" >&2
      exit 1
    fi
    echo "nia: registered" >> "{servers}"
    exit 0
    ;;
  "mcp remove")
    grep -v "^nia:" "{servers}" > "{servers}.tmp" 2>/dev/null
    mv "{servers}.tmp" "{servers}"
    exit 0
    ;;
esac
exit 2
"#,
        log = log.display(),
        servers = servers.display(),
    );
    let path = bin.join(name);
    std::fs::write(&path, script).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

/// Lines logged by a fake agent, one per invocation.
#[cfg(unix)]
pub fn agent_log(bin: &Path, name: &str) -> Vec<String> {
    std::fs::read_to_string(bin.join(format!("{name}.log")))
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
