use crate::catalog::labels::{APPARMOR_GRUB, COMMON_PROFILES, WHONIX_PROFILES};
use crate::domain::ports::{ActionContext, ActionError};

use super::steps::Step;

const LSM_PARAM: &str = "lsm=landlock,lockdown,yama,integrity,apparmor,bpf";

/// The userspace is always installed; entries add boot wiring and policy
pub fn plan(ctx: &ActionContext) -> Result<Vec<Step>, ActionError> {
    let mut steps = vec![Step::package("apparmor")];
    if ctx.is_selected(APPARMOR_GRUB) {
        steps.push(Step::kernel_param(LSM_PARAM));
    }
    if ctx.is_selected(COMMON_PROFILES) {
        steps.push(Step::enable_service("apparmor"));
    }
    if ctx.is_selected(WHONIX_PROFILES) {
        steps.push(Step::package("apparmor-profile-everything"));
    }
    Ok(steps)
}
