#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Self-contained test environment: a temp stack tree plus stub `docker` and
/// `apt-get` binaries, so no test ever touches the real engine or package
/// manager.
pub struct TestContext {
    pub root: TempDir,
    pub engine: PathBuf,
    pub apt: PathBuf,
}

impl TestContext {
    /// Base command with stubs wired in and the settle/poll timing collapsed.
    pub fn run_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "run",
            "--base-dir",
            self.base_dir(),
            "--engine-bin",
            self.engine.to_str().unwrap(),
            "--apt-bin",
            self.apt.to_str().unwrap(),
            "--settle-secs",
            "0",
            "--health-timeout-secs",
            "2",
            "--no-prune",
        ]);
        cmd
    }

    pub fn check_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["check", "--base-dir", self.base_dir()]);
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_stackpatrol"));
        cmd.timeout(Duration::from_secs(60));
        // Keep a webhook configured in the outer environment from leaking in
        cmd.env_remove("STACKPATROL_WEBHOOK_URL");
        cmd
    }

    pub fn base_dir(&self) -> &str {
        self.root.path().to_str().unwrap()
    }

    pub fn write_stack(&self, name: &str, body: &str) -> PathBuf {
        let dir = self.root.path().join("stacks").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("docker-compose.yml"), body).unwrap();
        dir
    }

    /// Make one compose step fail for one stack. `step` is `pull`, `down`,
    /// or `up`; the stub engine checks for the marker in its working
    /// directory.
    pub fn fail_step(&self, stack_dir: &Path, step: &str) {
        fs::write(stack_dir.join(format!(".fail_{}", step)), "").unwrap();
    }

    /// Replace the apt stub with one whose steps fail as requested.
    pub fn stub_apt(&self, fail_update: bool, fail_upgrade: bool) {
        write_stub_apt(&self.apt, fail_update, fail_upgrade);
    }
}

pub fn context() -> TestContext {
    let root = TempDir::new().unwrap();
    let engine = root.path().join("bin/docker-stub");
    let apt = root.path().join("bin/apt-stub");
    fs::create_dir_all(root.path().join("bin")).unwrap();
    write_stub_engine(&engine);
    write_stub_apt(&apt, false, false);
    TestContext { root, engine, apt }
}

fn write_stub_engine(path: &Path) {
    let script = "#!/bin/sh\n\
        case \"$1 $2 $3\" in\n\
        \"compose pull \")\n\
        \x20 [ -f .fail_pull ] && { echo 'manifest unknown' >&2; exit 1; }; exit 0 ;;\n\
        \"compose down \")\n\
        \x20 [ -f .fail_down ] && { echo 'network busy' >&2; exit 1; }; exit 0 ;;\n\
        \"compose up -d\")\n\
        \x20 [ -f .fail_up ] && { echo 'port already in use' >&2; exit 1; }; exit 0 ;;\n\
        \"compose ps -q\")\n\
        \x20 [ -f .no_containers ] && exit 0; echo cid1; exit 0 ;;\n\
        esac\n\
        case \"$1\" in\n\
        inspect)\n\
        \x20 if [ -f .unhealthy ]; then\n\
        \x20   echo '{\"Status\":\"running\",\"Health\":{\"Status\":\"unhealthy\"}}'\n\
        \x20 else\n\
        \x20   echo '{\"Status\":\"running\",\"Health\":{\"Status\":\"healthy\"}}'\n\
        \x20 fi\n\
        \x20 exit 0 ;;\n\
        esac\n\
        exit 0\n";
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn write_stub_apt(path: &Path, fail_update: bool, fail_upgrade: bool) {
    let update_body = if fail_update {
        "echo 'mirror unreachable' >&2; exit 1"
    } else {
        "exit 0"
    };
    let upgrade_body = if fail_upgrade {
        "echo 'dpkg interrupted' >&2; exit 1"
    } else {
        "exit 0"
    };
    let script = format!(
        "#!/bin/sh\ncase \"$1\" in\nupdate) {} ;;\nupgrade) {} ;;\nesac\nexit 0\n",
        update_body, upgrade_body
    );
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
