//! Single-purpose recipes for the standalone checkboxes.

use crate::domain::ports::ActionError;

use super::steps::Step;

const XWRAPPER: &str = "/etc/X11/Xwrapper.config";
const TIMESTAMPS_CONF: &str = "/etc/sysctl.d/90-archsecure-timestamps.conf";
const MAC_CONF: &str = "/etc/NetworkManager/conf.d/archsecure-mac.conf";

const MAC_SETTINGS: &str = "\
[device]
wifi.scan-rand-mac-address=yes

[connection]
wifi.cloned-mac-address=random
ethernet.cloned-mac-address=random
";

pub fn xorg() -> Result<Vec<Step>, ActionError> {
    Ok(vec![Step::file(XWRAPPER, "needs_root_rights = no\n")])
}

pub fn timestamps() -> Result<Vec<Step>, ActionError> {
    Ok(vec![Step::sysctl(
        TIMESTAMPS_CONF,
        &[("net.ipv4.tcp_timestamps", "0")],
    )])
}

pub fn ntp_client() -> Result<Vec<Step>, ActionError> {
    Ok(vec![Step::disable_service("systemd-timesyncd")])
}

pub fn mac_randomize() -> Result<Vec<Step>, ActionError> {
    Ok(vec![
        Step::require_tool("NetworkManager"),
        Step::file(MAC_CONF, MAC_SETTINGS),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use crate::infrastructure::actions::steps::execute;
    use crate::infrastructure::host::ScriptedHost;

    #[test]
    fn ntp_already_disabled_is_left_alone() {
        let host = ScriptedHost::new()
            .respond(
                "systemctl is-enabled systemd-timesyncd",
                CommandOutput::failed(1, "").with_stdout("disabled\n"),
            )
            .respond(
                "systemctl is-active systemd-timesyncd",
                CommandOutput::failed(3, "").with_stdout("inactive\n"),
            );

        execute(&host, &ntp_client().unwrap()).unwrap();

        assert!(!host.ran("systemctl disable --now systemd-timesyncd"));
    }

    #[test]
    fn mac_randomization_needs_network_manager() {
        let host = ScriptedHost::new();
        let err = execute(&host, &mac_randomize().unwrap()).unwrap_err();
        assert!(matches!(err, ActionError::MissingTool(tool) if tool == "NetworkManager"));
    }

    #[test]
    fn xorg_drops_root_rights() {
        let host = ScriptedHost::new();
        execute(&host, &xorg().unwrap()).unwrap();
        assert_eq!(host.file(XWRAPPER).unwrap(), "needs_root_rights = no\n");
    }
}
