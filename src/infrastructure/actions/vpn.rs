//! OpenVPN install, kill switch, provider archives and DNS.

use crate::catalog::labels::{
    ovpn_provider, EXPRESSVPN, INSTALL_OPENVPN, KILL_SWITCH, NORDVPN, PROTONVPN,
};
use crate::config::VpnConfig;
use crate::domain::ports::{ActionContext, ActionError};

use super::steps::{Cmd, Step};

pub const KILL_SWITCH_RULES: &str = "/etc/nftables.d/archsecure-killswitch.nft";
pub const RESOLVED_DROPIN: &str = "/etc/systemd/resolved.conf.d/archsecure-vpn.conf";

const DNS_PROVIDERS: &[&str] = &[NORDVPN, EXPRESSVPN, PROTONVPN];

const KILL_SWITCH_RULESET: &str = "\
table inet archsecure_killswitch
delete table inet archsecure_killswitch
table inet archsecure_killswitch {
    chain output {
        type filter hook output priority 0; policy drop;
        oifname \"lo\" accept
        oifname \"tun*\" accept
        ct state established,related accept
        udp dport { 53, 1194 } accept
        tcp dport { 443, 1194 } accept
    }
}
";

pub fn plan(ctx: &ActionContext, vpn: &VpnConfig) -> Result<Vec<Step>, ActionError> {
    let mut steps = Vec::new();

    if ctx.is_selected(INSTALL_OPENVPN) {
        steps.push(Step::package("openvpn"));
    }

    if ctx.is_selected(KILL_SWITCH) {
        steps.push(Step::require_tool("nft"));
        steps.push(Step::File {
            path: KILL_SWITCH_RULES.into(),
            content: KILL_SWITCH_RULESET.to_string(),
            on_change: Some(Cmd::new("nft", ["-f", KILL_SWITCH_RULES])),
        });
    }

    for provider in ctx.selected.iter().filter_map(|label| ovpn_provider(label)) {
        let url = vpn.ovpn_url(provider).ok_or_else(|| {
            ActionError::Unsupported(format!(
                "no OVPN download URL for {}; set vpn.ovpn_urls.{} in the config file",
                provider, provider
            ))
        })?;
        steps.push(Step::Download {
            url: url.to_string(),
            dest: vpn
                .ovpn_dir
                .join(format!("{}-ovpn.zip", provider.to_lowercase())),
        });
    }

    // The DNS submenu is a radio level, so at most one provider is checked
    if let Some(provider) = DNS_PROVIDERS.iter().copied().find(|p| ctx.is_selected(p)) {
        steps.push(dns(provider, vpn)?);
    }

    Ok(steps)
}

fn dns(provider: &str, vpn: &VpnConfig) -> Result<Step, ActionError> {
    let servers = vpn.dns_servers(provider);
    if servers.is_empty() {
        return Err(ActionError::Unsupported(format!(
            "no DNS servers known for {}; set vpn.dns.{} in the config file",
            provider, provider
        )));
    }
    Ok(Step::File {
        path: RESOLVED_DROPIN.into(),
        content: format!(
            "# Written by archsecure for {}\n[Resolve]\nDNS={}\nDomains=~.\n",
            provider,
            servers.join(" ")
        ),
        on_change: Some(Cmd::new("systemctl", ["restart", "systemd-resolved"])),
    })
}
