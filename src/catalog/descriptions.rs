//! Description text shown next to the menu.

use super::labels::*;

pub fn builtin() -> &'static [(&'static str, &'static str)] {
    &[
        (
            FIREWALL,
            "Configures a firewall that blocks unsolicited incoming connections. \
             Pick one firewall solution from the submenu.",
        ),
        (
            KERNEL,
            "Tunes kernel parameters to shrink the attack surface: self-protection \
             features, network stack hardening and CPU vulnerability mitigations.",
        ),
        (
            APPARMOR,
            "Installs and enables AppArmor, which confines applications through \
             mandatory access control profiles.",
        ),
        (
            VPN,
            "Installs and configures OpenVPN so traffic is encrypted and your IP \
             address is hidden from the networks you connect through.",
        ),
        (
            XORG,
            "Runs Xorg without root rights, limiting what an exploited display \
             server can reach.",
        ),
        (
            TIMESTAMPS,
            "Disables TCP timestamps so remote hosts cannot estimate uptime or \
             fingerprint the system from its clock.",
        ),
        (
            NTP_CLIENT,
            "Stops and disables the systemd NTP client to avoid leaking the system \
             clock over unauthenticated time synchronization.",
        ),
        (
            MAC_RANDOMIZE,
            "Makes NetworkManager use a random MAC address for every connection, \
             reducing tracking on public networks.",
        ),
        (
            USE_UFW,
            "UFW is a simple front end for managing netfilter rules. It is enabled \
             with its default deny-incoming policy.",
        ),
        (
            USE_NFTABLES,
            "nftables is the modern replacement for iptables. The nftables service \
             is enabled and started with the system ruleset.",
        ),
        (
            USE_IPTABLES,
            "Allows loopback and established traffic with iptables and drops every \
             other incoming packet.",
        ),
        (
            KERNEL_SELF_PROTECTION,
            "Restricts kernel pointer and log exposure, unprivileged BPF, ptrace \
             and kexec to make kernel exploitation harder.",
        ),
        (
            NETWORK_STACK,
            "Enables SYN cookies and reverse path filtering and ignores ICMP \
             redirects and source-routed packets.",
        ),
        (
            CPU_MITIGATIONS,
            "Turns on all CPU vulnerability mitigations and disables SMT on the \
             kernel command line.",
        ),
        (
            REDUNDANT_COMPONENTS,
            "Prevents rarely used network protocols and file systems from being \
             loaded as kernel modules.",
        ),
        (
            APPARMOR_GRUB,
            "Adds the boot parameters that load AppArmor as a security module to \
             the GRUB kernel command line.",
        ),
        (
            COMMON_PROFILES,
            "Installs the AppArmor userspace and its profiles and loads them at \
             boot.",
        ),
        (
            WHONIX_PROFILES,
            "Installs the full-system AppArmor policy from Whonix for machines \
             under constant attack. Expect some applications to need tuning.",
        ),
        (
            INSTALL_OPENVPN,
            "Installs OpenVPN, the open-source VPN client the other entries build \
             on.",
        ),
        (
            KILL_SWITCH,
            "Loads an nftables ruleset that blocks all traffic outside the VPN \
             tunnel, so nothing leaks when the VPN drops.",
        ),
        (
            DOWNLOAD_OVPN,
            "Downloads OpenVPN configuration files from your VPN provider. Pick \
             the providers in the submenu.",
        ),
        (
            DOWNLOAD_NORDVPN,
            "Downloads the NordVPN OpenVPN configuration archive.",
        ),
        (
            DOWNLOAD_EXPRESSVPN,
            "Downloads the ExpressVPN OpenVPN configuration archive. Needs a \
             download URL in the configuration file.",
        ),
        (
            DOWNLOAD_PROTONVPN,
            "Downloads the ProtonVPN OpenVPN configuration archive. Needs a \
             download URL in the configuration file.",
        ),
        (
            AUTO_DNS,
            "Points systemd-resolved at your VPN provider's DNS servers so queries \
             are resolved inside the tunnel.",
        ),
        (NORDVPN, "Uses the NordVPN DNS servers."),
        (EXPRESSVPN, "Uses the ExpressVPN DNS servers."),
        (PROTONVPN, "Uses the ProtonVPN DNS server."),
    ]
}
