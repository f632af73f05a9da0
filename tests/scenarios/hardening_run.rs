//! Scenario: select options in the menu, then harden.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use archsecure::catalog::labels;
use archsecure::config::VpnConfig;
use archsecure::domain::navigator::NavInput;
use archsecure::domain::ports::{RunEvent, RunEventSink};
use archsecure::domain::value_objects::RunStatus;
use archsecure::infrastructure::{default_registry, ScriptedHost};
use archsecure::{
    AbortReason, CancelToken, Catalog, HardeningRunner, MenuOutcome, Navigator, Pacing,
    RunOptions, SelectionTree,
};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<RunEvent>>,
    cancel_on_first_start: Option<CancelToken>,
}

impl RunEventSink for Recorder {
    fn on_event(&self, event: RunEvent) {
        if let (RunEvent::NodeStarted { .. }, Some(token)) = (&event, &self.cancel_on_first_start)
        {
            token.cancel();
        }
        self.events.lock().unwrap().push(event);
    }
}

impl Recorder {
    fn finished(&self) -> Vec<(String, RunStatus)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                RunEvent::NodeFinished { label, status, .. } => Some((label.clone(), *status)),
                _ => None,
            })
            .collect()
    }
}

fn press(tree: &mut SelectionTree, inputs: &[NavInput]) -> MenuOutcome {
    let mut nav = Navigator::new(tree);
    let mut outcome = MenuOutcome::Continue;
    for &input in inputs {
        outcome = nav.handle(input);
        if outcome.is_finished() {
            break;
        }
    }
    outcome
}

fn arch_host() -> Rc<ScriptedHost> {
    Rc::new(ScriptedHost::new().with_tools(&["pacman", "systemctl", "nft", "sysctl"]))
}

fn runner(host: &Rc<ScriptedHost>) -> HardeningRunner {
    HardeningRunner::new(default_registry(host.clone(), &VpnConfig::default()))
}

fn options() -> RunOptions {
    RunOptions::new().with_pacing(Pacing::none())
}

use NavInput::{Cancel, Down, Select};

#[test]
fn scenario_firewall_and_xorg_from_menu() {
    let mut tree = Catalog::builtin().build_tree(&[]).unwrap();

    // Firewall submenu: choose nftables, then back out.
    // Root order: Firewall, Kernel, AppArmor, VPN, Xorg, Timestamps, NTP, MAC, Execute.
    let outcome = press(
        &mut tree,
        &[
            Select, Down, Select, Down, Down, Select, // nftables, back
            Down, Down, Down, Down, Select, // Xorg
            Down, Down, Down, Down, Select, // Secure Computer!
        ],
    );
    assert_eq!(outcome, MenuOutcome::Execute);
    assert_eq!(
        tree.checked_labels(),
        vec![labels::USE_NFTABLES, labels::XORG]
    );

    let host = arch_host();
    let sink = Arc::new(Recorder::default());
    let report = runner(&host).run_with_events(&tree, &options(), sink.clone());

    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    let summary = report.summary();
    assert_eq!((summary.succeeded, summary.failed, summary.skipped), (2, 0, 6));

    assert!(host.ran("systemctl enable --now nftables"));
    assert_eq!(
        host.file("/etc/X11/Xwrapper.config").as_deref(),
        Some("needs_root_rights = no\n")
    );

    let finished = sink.finished();
    assert_eq!(finished.len(), 8);
    assert_eq!(
        finished[0],
        (labels::FIREWALL.to_string(), RunStatus::Succeeded)
    );
    assert_eq!(finished[4], (labels::XORG.to_string(), RunStatus::Succeeded));
    assert!(finished
        .iter()
        .filter(|(label, _)| label != labels::FIREWALL && label != labels::XORG)
        .all(|(_, status)| *status == RunStatus::Skipped));
}

#[test]
fn scenario_failed_recipe_does_not_stop_the_run() {
    let tree = Catalog::builtin()
        .build_tree(&[
            labels::CPU_MITIGATIONS.to_string(),
            labels::TIMESTAMPS.to_string(),
        ])
        .unwrap();
    let host = arch_host();

    let report = runner(&host).run(&tree, &options());

    let kernel = report.entry(labels::KERNEL).unwrap();
    assert_eq!(kernel.status, RunStatus::Failed);
    assert!(kernel
        .error
        .as_ref()
        .unwrap()
        .to_string()
        .contains("/etc/default/grub not found"));
    assert_eq!(
        report.entry(labels::TIMESTAMPS).unwrap().status,
        RunStatus::Succeeded
    );
    assert!(host
        .file("/etc/sysctl.d/90-archsecure-timestamps.conf")
        .unwrap()
        .contains("net.ipv4.tcp_timestamps = 0"));
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn scenario_grub_command_line_gets_mitigations() {
    let tree = Catalog::builtin()
        .build_tree(&[labels::CPU_MITIGATIONS.to_string()])
        .unwrap();
    let host = Rc::new(
        ScriptedHost::new()
            .with_tools(&["grub-mkconfig"])
            .with_file("/etc/default/grub", "GRUB_CMDLINE_LINUX_DEFAULT=\"quiet\"\n"),
    );

    let report = runner(&host).run(&tree, &options());

    assert!(report.is_success());
    assert_eq!(
        host.file("/etc/default/grub").unwrap(),
        "GRUB_CMDLINE_LINUX_DEFAULT=\"quiet mitigations=auto,nosmt\"\n"
    );
    assert!(host.ran("grub-mkconfig -o /boot/grub/grub.cfg"));
}

#[test]
fn scenario_cancel_in_menu_changes_nothing() {
    let mut tree = Catalog::builtin()
        .build_tree(&[labels::XORG.to_string()])
        .unwrap();

    let outcome = press(&mut tree, &[Select, Cancel, Cancel]);

    assert_eq!(outcome, MenuOutcome::Abort(AbortReason::Cancelled));
    assert_eq!(tree.checked_labels(), vec![labels::XORG]);
}

#[test]
fn scenario_abort_entry_ends_the_menu() {
    let mut tree = Catalog::builtin().build_tree(&[]).unwrap();
    let mut inputs = vec![Down; 9];
    inputs.push(Select);

    assert_eq!(
        press(&mut tree, &inputs),
        MenuOutcome::Abort(AbortReason::Selected)
    );
}

#[test]
fn scenario_cancel_during_run_skips_the_rest() {
    let tree = Catalog::builtin()
        .build_tree(&[
            labels::XORG.to_string(),
            labels::TIMESTAMPS.to_string(),
            labels::NTP_CLIENT.to_string(),
        ])
        .unwrap();
    let host = arch_host();
    let cancel = CancelToken::new();
    let sink = Arc::new(Recorder {
        cancel_on_first_start: Some(cancel.clone()),
        ..Recorder::default()
    });

    let report =
        runner(&host).run_with_events(&tree, &options().with_cancel(cancel), sink.clone());

    assert!(report.cancelled);
    assert_eq!(
        report.entry(labels::XORG).unwrap().status,
        RunStatus::Succeeded
    );
    assert_eq!(
        report.entry(labels::TIMESTAMPS).unwrap().status,
        RunStatus::Skipped
    );
    assert!(!host.ran("systemctl disable --now systemd-timesyncd"));
    assert!(host.file("/etc/sysctl.d/90-archsecure-timestamps.conf").is_none());
}

#[test]
fn scenario_site_catalog_with_custom_actions() {
    use archsecure::{ActionRegistry, OptionSpec};
    use std::cell::RefCell;

    let tree = SelectionTree::build(&[
        OptionSpec::checkbox("Rotate keys").checked(),
        OptionSpec::checkbox("Wipe swap"),
        OptionSpec::group(
            "Audit level",
            vec![OptionSpec::radio("Minimal"), OptionSpec::radio("Full")],
        ),
        OptionSpec::checkbox("Lock BIOS").checked(),
    ])
    .unwrap();

    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = ActionRegistry::new();
    for label in ["Rotate keys", "Wipe swap", "Audit level"] {
        let calls = calls.clone();
        registry.register_fn(label, move |ctx| {
            calls.borrow_mut().push(ctx.label.clone());
            true
        });
    }
    registry.register_fn("Lock BIOS", |_| false);

    let sink = Arc::new(Recorder::default());
    let report = HardeningRunner::new(registry).run_with_events(&tree, &options(), sink.clone());

    assert_eq!(*calls.borrow(), vec!["Rotate keys"]);
    assert_eq!(
        sink.finished(),
        vec![
            ("Rotate keys".to_string(), RunStatus::Succeeded),
            ("Wipe swap".to_string(), RunStatus::Skipped),
            ("Audit level".to_string(), RunStatus::Skipped),
            ("Lock BIOS".to_string(), RunStatus::Failed),
        ]
    );
    let summary = report.summary();
    assert_eq!((summary.succeeded, summary.failed, summary.skipped, summary.total), (1, 1, 2, 4));
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn scenario_dns_provider_picked_in_vpn_submenu() {
    let mut tree = Catalog::builtin().build_tree(&[]).unwrap();

    // VPN submenu: Install, Kill switch, Download group, DNS group, Back.
    // DNS submenu: NordVPN, ExpressVPN, ProtonVPN, Back.
    let mut inputs = vec![Down, Down, Down, Select, Down, Down, Down, Select];
    inputs.extend([Down, Down, Select, Cancel, Cancel]);
    inputs.extend(vec![Down; 5]);
    inputs.push(Select);
    assert_eq!(press(&mut tree, &inputs), MenuOutcome::Execute);
    assert_eq!(tree.checked_labels(), vec![labels::PROTONVPN]);

    let host = arch_host();
    let report = runner(&host).run(&tree, &options());

    assert_eq!(
        report.entry(labels::VPN).unwrap().status,
        RunStatus::Succeeded
    );
    assert!(host
        .file("/etc/systemd/resolved.conf.d/archsecure-vpn.conf")
        .unwrap()
        .contains("DNS=10.2.0.1\n"));
}
