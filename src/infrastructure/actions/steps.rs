//! Idempotent recipe steps
//!
//! Every step probes the host first and reports [`Outcome::Unchanged`]
//! without side effects when the target state already holds.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::ports::{ActionError, CommandOutput, Host};

pub const GRUB_DEFAULTS: &str = "/etc/default/grub";
pub const GRUB_CONFIG: &str = "/boot/grub/grub.cfg";
const CMDLINE_KEY: &str = "GRUB_CMDLINE_LINUX_DEFAULT=";

/// A program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
}

impl Cmd {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn run(&self, host: &dyn Host) -> Result<CommandOutput, ActionError> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        host.run(&self.program, &args)
            .map_err(|source| ActionError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    /// Run and require a zero exit status
    fn run_checked(&self, host: &dyn Host) -> Result<CommandOutput, ActionError> {
        let output = self.run(host)?;
        if output.success {
            Ok(output)
        } else {
            Err(ActionError::CommandFailed {
                program: self.to_string(),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One idempotent unit of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Fail with `MissingTool` unless the program is on `PATH`
    RequireTool(String),
    /// Install a pacman package unless it is already installed
    Package(String),
    /// Enable and start a systemd unit
    EnableService(String),
    /// Disable and stop a systemd unit
    DisableService(String),
    /// Write a file when its content differs, then run `on_change`
    File {
        path: PathBuf,
        content: String,
        on_change: Option<Cmd>,
    },
    /// Append a parameter to the kernel command line and regenerate grub.cfg
    KernelParam(String),
    /// Apply commands unless `probe` output contains `marker`, then verify
    Ensure {
        probe: Cmd,
        marker: String,
        apply: Vec<Cmd>,
    },
    /// Fetch a URL with curl unless the destination exists
    Download { url: String, dest: PathBuf },
}

impl Step {
    pub fn require_tool(program: &str) -> Self {
        Step::RequireTool(program.to_string())
    }

    pub fn package(name: &str) -> Self {
        Step::Package(name.to_string())
    }

    pub fn enable_service(unit: &str) -> Self {
        Step::EnableService(unit.to_string())
    }

    pub fn disable_service(unit: &str) -> Self {
        Step::DisableService(unit.to_string())
    }

    pub fn file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Step::File {
            path: path.into(),
            content: content.into(),
            on_change: None,
        }
    }

    /// Sysctl drop-in that is reloaded when written
    pub fn sysctl(path: impl Into<PathBuf>, settings: &[(&str, &str)]) -> Self {
        let content: String = settings
            .iter()
            .map(|(key, value)| format!("{} = {}\n", key, value))
            .collect();
        Step::File {
            path: path.into(),
            content,
            on_change: Some(Cmd::new("sysctl", ["--system"])),
        }
    }

    pub fn kernel_param(param: &str) -> Self {
        Step::KernelParam(param.to_string())
    }
}

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

/// Run `steps` in order, stopping at the first error
pub fn execute(host: &dyn Host, steps: &[Step]) -> Result<Vec<Outcome>, ActionError> {
    steps
        .iter()
        .map(|step| {
            let outcome = apply(host, step)?;
            debug!(?step, ?outcome, "step done");
            Ok(outcome)
        })
        .collect()
}

fn apply(host: &dyn Host, step: &Step) -> Result<Outcome, ActionError> {
    match step {
        Step::RequireTool(program) => {
            if host.has_tool(program) {
                Ok(Outcome::Unchanged)
            } else {
                Err(ActionError::MissingTool(program.clone()))
            }
        }

        Step::Package(name) => {
            if !host.has_tool("pacman") {
                return Err(ActionError::MissingTool("pacman".to_string()));
            }
            if Cmd::new("pacman", ["-Q", name.as_str()]).run(host)?.success {
                return Ok(Outcome::Unchanged);
            }
            info!(package = %name, "installing package");
            Cmd::new("pacman", ["-S", "--needed", "--noconfirm", name.as_str()])
                .run_checked(host)?;
            Ok(Outcome::Changed)
        }

        Step::EnableService(unit) => {
            let enabled = unit_state(host, "is-enabled", unit)? == "enabled";
            let active = unit_state(host, "is-active", unit)? == "active";
            if enabled && active {
                return Ok(Outcome::Unchanged);
            }
            info!(unit = %unit, "enabling service");
            Cmd::new("systemctl", ["enable", "--now", unit.as_str()]).run_checked(host)?;
            Ok(Outcome::Changed)
        }

        Step::DisableService(unit) => {
            let enabled = unit_state(host, "is-enabled", unit)? == "enabled";
            let active = unit_state(host, "is-active", unit)? == "active";
            if !enabled && !active {
                return Ok(Outcome::Unchanged);
            }
            info!(unit = %unit, "disabling service");
            Cmd::new("systemctl", ["disable", "--now", unit.as_str()]).run_checked(host)?;
            Ok(Outcome::Changed)
        }

        Step::File {
            path,
            content,
            on_change,
        } => {
            if host.exists(path) && host.read(path)? == *content {
                return Ok(Outcome::Unchanged);
            }
            info!(path = %path.display(), "writing file");
            host.write(path, content)?;
            if let Some(cmd) = on_change {
                cmd.run_checked(host)?;
            }
            Ok(Outcome::Changed)
        }

        Step::KernelParam(param) => {
            let grub_path = PathBuf::from(GRUB_DEFAULTS);
            if !host.exists(&grub_path) {
                return Err(ActionError::Unsupported(format!(
                    "{} not found; only GRUB boot setups are supported",
                    GRUB_DEFAULTS
                )));
            }
            let current = host.read(&grub_path)?;
            let Some(updated) = add_kernel_param(&current, param)? else {
                return Ok(Outcome::Unchanged);
            };
            info!(param = %param, "adding kernel parameter");
            host.write(&grub_path, &updated)?;
            Cmd::new("grub-mkconfig", ["-o", GRUB_CONFIG]).run_checked(host)?;
            Ok(Outcome::Changed)
        }

        Step::Ensure {
            probe,
            marker,
            apply,
        } => {
            if probe.run(host)?.stdout_contains(marker) {
                return Ok(Outcome::Unchanged);
            }
            for cmd in apply {
                info!(command = %cmd, "applying");
                cmd.run_checked(host)?;
            }
            if probe.run(host)?.stdout_contains(marker) {
                Ok(Outcome::Changed)
            } else {
                Err(ActionError::Verification(format!(
                    "'{}' does not report '{}'",
                    probe, marker
                )))
            }
        }

        Step::Download { url, dest } => {
            if host.exists(dest) {
                return Ok(Outcome::Unchanged);
            }
            if !host.has_tool("curl") {
                return Err(ActionError::MissingTool("curl".to_string()));
            }
            let dest_arg = dest.to_string_lossy().into_owned();
            info!(url = %url, dest = %dest_arg, "downloading");
            Cmd::new(
                "curl",
                ["-fsSL", "--create-dirs", "-o", dest_arg.as_str(), url.as_str()],
            )
            .run_checked(host)?;
            Ok(Outcome::Changed)
        }
    }
}

fn unit_state(host: &dyn Host, query: &str, unit: &str) -> Result<String, ActionError> {
    // is-enabled/is-active exit non-zero for disabled/inactive units
    let output = Cmd::new("systemctl", [query, unit]).run(host)?;
    Ok(output.stdout.trim().to_string())
}

/// Append `param` to `GRUB_CMDLINE_LINUX_DEFAULT`.
///
/// Returns `None` when the parameter is already present.
pub fn add_kernel_param(grub: &str, param: &str) -> Result<Option<String>, ActionError> {
    let mut found = false;
    let mut changed = false;
    let mut out = String::with_capacity(grub.len() + param.len() + 1);

    for line in grub.lines() {
        match line.strip_prefix(CMDLINE_KEY) {
            Some(value) if !found => {
                found = true;
                let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'');
                let inner = match quote {
                    Some(q) => value.trim_start_matches(q).trim_end_matches(q),
                    None => value,
                };
                if inner.split_whitespace().any(|p| p == param) {
                    out.push_str(line);
                } else {
                    let q = quote.unwrap_or('"');
                    let joined = if inner.trim().is_empty() {
                        param.to_string()
                    } else {
                        format!("{} {}", inner.trim(), param)
                    };
                    out.push_str(&format!("{}{}{}{}", CMDLINE_KEY, q, joined, q));
                    changed = true;
                }
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }

    if !found {
        return Err(ActionError::Unsupported(format!(
            "{} has no {} line",
            GRUB_DEFAULTS,
            CMDLINE_KEY.trim_end_matches('=')
        )));
    }
    Ok(changed.then_some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::host::ScriptedHost;

    const GRUB: &str = "GRUB_DEFAULT=0\nGRUB_CMDLINE_LINUX_DEFAULT=\"loglevel=3 quiet\"\nGRUB_CMDLINE_LINUX=\"\"\n";

    #[test]
    fn add_kernel_param_appends_inside_quotes() {
        let updated = add_kernel_param(GRUB, "mitigations=auto,nosmt")
            .unwrap()
            .unwrap();
        assert!(updated
            .contains("GRUB_CMDLINE_LINUX_DEFAULT=\"loglevel=3 quiet mitigations=auto,nosmt\"\n"));
        assert!(updated.contains("GRUB_CMDLINE_LINUX=\"\"\n"));
    }

    #[test]
    fn add_kernel_param_is_idempotent() {
        let once = add_kernel_param(GRUB, "apparmor=1").unwrap().unwrap();
        assert_eq!(add_kernel_param(&once, "apparmor=1").unwrap(), None);
    }

    #[test]
    fn add_kernel_param_requires_cmdline_line() {
        let err = add_kernel_param("GRUB_DEFAULT=0\n", "apparmor=1").unwrap_err();
        assert!(matches!(err, ActionError::Unsupported(_)));
    }

    #[test]
    fn package_already_installed_is_unchanged() {
        let host = ScriptedHost::new().with_tool("pacman");

        let outcomes = execute(&host, &[Step::package("openvpn")]).unwrap();

        assert_eq!(outcomes, vec![Outcome::Unchanged]);
        assert_eq!(host.commands(), vec!["pacman -Q openvpn"]);
    }

    #[test]
    fn package_missing_is_installed() {
        let host = ScriptedHost::new()
            .with_tool("pacman")
            .respond("pacman -Q apparmor", CommandOutput::failed(1, "not found"));

        let outcomes = execute(&host, &[Step::package("apparmor")]).unwrap();

        assert_eq!(outcomes, vec![Outcome::Changed]);
        assert!(host.ran("pacman -S --needed --noconfirm apparmor"));
    }

    #[test]
    fn missing_tool_stops_the_recipe() {
        let host = ScriptedHost::new();

        let err = execute(
            &host,
            &[Step::require_tool("nft"), Step::enable_service("nftables")],
        )
        .unwrap_err();

        assert!(matches!(err, ActionError::MissingTool(ref t) if t == "nft"));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn file_with_same_content_is_not_rewritten() {
        let host = ScriptedHost::new().with_file("/etc/sysctl.d/90-test.conf", "a = 1\n");

        let outcomes = execute(
            &host,
            &[Step::sysctl("/etc/sysctl.d/90-test.conf", &[("a", "1")])],
        )
        .unwrap();

        assert_eq!(outcomes, vec![Outcome::Unchanged]);
        assert!(!host.ran("sysctl --system"));
    }

    #[test]
    fn changed_file_runs_follow_up() {
        let host = ScriptedHost::new();

        execute(
            &host,
            &[Step::sysctl("/etc/sysctl.d/90-test.conf", &[("a", "1")])],
        )
        .unwrap();

        assert_eq!(
            host.file("/etc/sysctl.d/90-test.conf").as_deref(),
            Some("a = 1\n")
        );
        assert!(host.ran("sysctl --system"));
    }

    #[test]
    fn ensure_fails_verification_when_marker_never_appears() {
        let host = ScriptedHost::new()
            .respond("ufw status", CommandOutput::ok("Status: inactive"));
        let step = Step::Ensure {
            probe: Cmd::new("ufw", ["status"]),
            marker: "status: active".to_string(),
            apply: vec![Cmd::new("ufw", ["--force", "enable"])],
        };

        let err = execute(&host, &[step]).unwrap_err();

        assert!(matches!(err, ActionError::Verification(_)));
        assert!(host.ran("ufw --force enable"));
    }

    #[test]
    fn failed_command_reports_stderr() {
        let host = ScriptedHost::new()
            .with_tool("pacman")
            .respond("pacman -Q ufw", CommandOutput::failed(1, ""))
            .respond(
                "pacman -S --needed --noconfirm ufw",
                CommandOutput::failed(1, "error: you cannot perform this operation unless you are root.\n"),
            );

        let err = execute(&host, &[Step::package("ufw")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "'pacman -S --needed --noconfirm ufw' failed (exit status: 1): error: you cannot perform this operation unless you are root."
        );
    }

    #[test]
    fn disable_service_already_off_is_unchanged() {
        let host = ScriptedHost::new()
            .respond(
                "systemctl is-enabled systemd-timesyncd",
                CommandOutput::failed(1, ""),
            )
            .respond(
                "systemctl is-active systemd-timesyncd",
                CommandOutput::failed(3, ""),
            );

        let outcomes = execute(&host, &[Step::disable_service("systemd-timesyncd")]).unwrap();

        assert_eq!(outcomes, vec![Outcome::Unchanged]);
    }
}
