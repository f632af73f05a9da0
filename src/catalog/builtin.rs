//! The built-in option tree.

use super::labels::*;
use crate::domain::selection::OptionSpec;

pub fn options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::group(
            FIREWALL,
            vec![
                OptionSpec::radio(USE_UFW),
                OptionSpec::radio(USE_NFTABLES),
                OptionSpec::radio(USE_IPTABLES),
            ],
        ),
        OptionSpec::group(
            KERNEL,
            vec![
                OptionSpec::checkbox(KERNEL_SELF_PROTECTION),
                OptionSpec::checkbox(NETWORK_STACK),
                OptionSpec::checkbox(CPU_MITIGATIONS),
                OptionSpec::checkbox(REDUNDANT_COMPONENTS),
            ],
        ),
        OptionSpec::group(
            APPARMOR,
            vec![
                OptionSpec::checkbox(APPARMOR_GRUB),
                OptionSpec::checkbox(COMMON_PROFILES),
                OptionSpec::checkbox(WHONIX_PROFILES),
            ],
        ),
        OptionSpec::group(
            VPN,
            vec![
                OptionSpec::checkbox(INSTALL_OPENVPN),
                OptionSpec::checkbox(KILL_SWITCH),
                OptionSpec::group(
                    DOWNLOAD_OVPN,
                    vec![
                        OptionSpec::checkbox(DOWNLOAD_NORDVPN),
                        OptionSpec::checkbox(DOWNLOAD_EXPRESSVPN),
                        OptionSpec::checkbox(DOWNLOAD_PROTONVPN),
                    ],
                ),
                OptionSpec::group(
                    AUTO_DNS,
                    vec![
                        OptionSpec::radio(NORDVPN),
                        OptionSpec::radio(EXPRESSVPN),
                        OptionSpec::radio(PROTONVPN),
                    ],
                ),
            ],
        ),
        OptionSpec::checkbox(XORG),
        OptionSpec::checkbox(TIMESTAMPS),
        OptionSpec::checkbox(NTP_CLIENT),
        OptionSpec::checkbox(MAC_RANDOMIZE),
    ]
}
