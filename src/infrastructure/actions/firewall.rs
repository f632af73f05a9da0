//! Firewall recipes, one per radio choice.

use crate::catalog::labels::{USE_IPTABLES, USE_NFTABLES, USE_UFW};
use crate::domain::ports::{ActionContext, ActionError};

use super::steps::{Cmd, Step};

pub fn plan(ctx: &ActionContext) -> Result<Vec<Step>, ActionError> {
    match ctx.choice.as_deref() {
        Some(USE_UFW) => Ok(vec![
            Step::package("ufw"),
            Step::Ensure {
                probe: Cmd::new("ufw", ["status"]),
                marker: "status: active".to_string(),
                apply: vec![Cmd::new("ufw", ["--force", "enable"])],
            },
            Step::enable_service("ufw"),
        ]),
        Some(USE_NFTABLES) => Ok(vec![
            Step::package("nftables"),
            Step::require_tool("nft"),
            Step::enable_service("nftables"),
        ]),
        Some(USE_IPTABLES) => Ok(iptables()),
        Some(other) => Err(ActionError::Unsupported(format!(
            "unknown firewall '{}'",
            other
        ))),
        None => Err(ActionError::Unsupported("no firewall chosen".to_string())),
    }
}

fn iptables() -> Vec<Step> {
    let input_rules = || Cmd::new("iptables", ["-S", "INPUT"]);
    let rule = |spec: &[&str]| Step::Ensure {
        probe: input_rules(),
        marker: format!("-A INPUT {}", spec.join(" ")),
        apply: vec![Cmd::new(
            "iptables",
            ["-A", "INPUT"].iter().chain(spec.iter()).copied(),
        )],
    };

    vec![
        Step::require_tool("iptables"),
        rule(&["-i", "lo", "-j", "ACCEPT"]),
        rule(&[
            "-m",
            "conntrack",
            "--ctstate",
            "RELATED,ESTABLISHED",
            "-j",
            "ACCEPT",
        ]),
        Step::Ensure {
            probe: input_rules(),
            marker: "-P INPUT DROP".to_string(),
            apply: vec![Cmd::new("iptables", ["-P", "INPUT", "DROP"])],
        },
        Step::Ensure {
            probe: Cmd::new("systemctl", ["is-enabled", "iptables"]),
            marker: "enabled".to_string(),
            apply: vec![
                Cmd::new("iptables-save", ["-f", "/etc/iptables/iptables.rules"]),
                Cmd::new("systemctl", ["enable", "iptables"]),
            ],
        },
    ]
}
