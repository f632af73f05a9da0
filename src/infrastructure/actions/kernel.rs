use crate::catalog::labels::{
    CPU_MITIGATIONS, KERNEL_SELF_PROTECTION, NETWORK_STACK, REDUNDANT_COMPONENTS,
};
use crate::domain::ports::{ActionContext, ActionError};

use super::steps::Step;

const SELF_PROTECTION_CONF: &str = "/etc/sysctl.d/90-archsecure-kernel.conf";
const NETWORK_CONF: &str = "/etc/sysctl.d/90-archsecure-network.conf";
const BLACKLIST_CONF: &str = "/etc/modprobe.d/archsecure-blacklist.conf";

const SELF_PROTECTION: &[(&str, &str)] = &[
    ("kernel.kptr_restrict", "2"),
    ("kernel.dmesg_restrict", "1"),
    ("kernel.unprivileged_bpf_disabled", "1"),
    ("net.core.bpf_jit_harden", "2"),
    ("kernel.yama.ptrace_scope", "2"),
    ("kernel.kexec_load_disabled", "1"),
];

const NETWORK: &[(&str, &str)] = &[
    ("net.ipv4.tcp_syncookies", "1"),
    ("net.ipv4.tcp_rfc1337", "1"),
    ("net.ipv4.conf.all.rp_filter", "1"),
    ("net.ipv4.conf.default.rp_filter", "1"),
    ("net.ipv4.conf.all.accept_redirects", "0"),
    ("net.ipv4.conf.default.accept_redirects", "0"),
    ("net.ipv4.conf.all.secure_redirects", "0"),
    ("net.ipv4.conf.all.send_redirects", "0"),
    ("net.ipv6.conf.all.accept_redirects", "0"),
    ("net.ipv6.conf.default.accept_redirects", "0"),
    ("net.ipv4.conf.all.accept_source_route", "0"),
    ("net.ipv6.conf.all.accept_source_route", "0"),
    ("net.ipv4.icmp_echo_ignore_all", "1"),
];

/// Modules with no place on a desktop: obscure protocols and file systems
const BLACKLISTED_MODULES: &[&str] = &[
    "dccp", "sctp", "rds", "tipc", "n-hdlc", "ax25", "netrom", "x25", "rose", "decnet",
    "econet", "af_802154", "ipx", "appletalk", "psnap", "p8023", "p8022", "can", "atm",
    "cramfs", "freevxfs", "jffs2", "hfs", "hfsplus", "udf",
];

pub fn plan(ctx: &ActionContext) -> Result<Vec<Step>, ActionError> {
    let mut steps = Vec::new();
    if ctx.is_selected(KERNEL_SELF_PROTECTION) {
        steps.push(Step::sysctl(SELF_PROTECTION_CONF, SELF_PROTECTION));
    }
    if ctx.is_selected(NETWORK_STACK) {
        steps.push(Step::sysctl(NETWORK_CONF, NETWORK));
    }
    if ctx.is_selected(CPU_MITIGATIONS) {
        steps.push(Step::kernel_param("mitigations=auto,nosmt"));
    }
    if ctx.is_selected(REDUNDANT_COMPONENTS) {
        steps.push(Step::file(BLACKLIST_CONF, blacklist()));
    }
    Ok(steps)
}

fn blacklist() -> String {
    let mut content = String::from("# Written by archsecure\n");
    for module in BLACKLISTED_MODULES {
        content.push_str(&format!("install {} /bin/false\n", module));
    }
    content
}
