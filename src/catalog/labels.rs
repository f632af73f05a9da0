//! Option labels of the built-in catalog.
//!
//! Labels are identities: the action registry is keyed by the top-level
//! ones and recipes match on the nested ones.

pub const FIREWALL: &str = "Harden Firewall";
pub const USE_UFW: &str = "Use UFW";
pub const USE_NFTABLES: &str = "Use NFtables";
pub const USE_IPTABLES: &str = "Use iptables";

pub const KERNEL: &str = "Harden Kernel";
pub const KERNEL_SELF_PROTECTION: &str = "Kernel Self-Protection";
pub const NETWORK_STACK: &str = "Harden Network Stack";
pub const CPU_MITIGATIONS: &str = "Apply CPU mitigations";
pub const REDUNDANT_COMPONENTS: &str = "Disable redundant Kernel components";

pub const APPARMOR: &str = "Install & Enable Apparmor";
pub const APPARMOR_GRUB: &str = "Auto boot in Grub";
pub const COMMON_PROFILES: &str = "Include Common Profiles";
pub const WHONIX_PROFILES: &str = "Include Whonix Profiles (For those under constant attack)";

pub const VPN: &str = "Install & Configure VPN";
pub const INSTALL_OPENVPN: &str = "Install Openvpn";
pub const KILL_SWITCH: &str = "Deploy VPN Kill Switch";
pub const DOWNLOAD_OVPN: &str = "Download OVPN files";
pub const DOWNLOAD_NORDVPN: &str = "Download NordVPN OVPN files";
pub const DOWNLOAD_EXPRESSVPN: &str = "Download ExpressVPN OVPN files";
pub const DOWNLOAD_PROTONVPN: &str = "Download ProtonVPN OVPN files";
pub const AUTO_DNS: &str = "Auto Configure DNS";
pub const NORDVPN: &str = "NordVPN";
pub const EXPRESSVPN: &str = "ExpressVPN";
pub const PROTONVPN: &str = "ProtonVPN";

pub const XORG: &str = "Harden Xorg";
pub const TIMESTAMPS: &str = "Disable TCP and ICMP Timestamps";
pub const NTP_CLIENT: &str = "Disable NTP Client";
pub const MAC_RANDOMIZE: &str = "Securely Randomize Mac Address on boot";

/// Provider name for a "Download ... OVPN files" entry
pub fn ovpn_provider(label: &str) -> Option<&'static str> {
    match label {
        DOWNLOAD_NORDVPN => Some(NORDVPN),
        DOWNLOAD_EXPRESSVPN => Some(EXPRESSVPN),
        DOWNLOAD_PROTONVPN => Some(PROTONVPN),
        _ => None,
    }
}
