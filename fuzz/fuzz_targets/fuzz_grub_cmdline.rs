#![no_main]

use archsecure::infrastructure::actions::steps::add_kernel_param;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(grub) = std::str::from_utf8(data) {
        // Adding a parameter twice must be a no-op the second time
        if let Ok(Some(updated)) = add_kernel_param(grub, "mitigations=auto,nosmt") {
            assert_eq!(add_kernel_param(&updated, "mitigations=auto,nosmt").ok(), Some(None));
        }
    }
});
