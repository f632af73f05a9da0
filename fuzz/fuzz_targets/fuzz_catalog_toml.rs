#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // A catalog that parses must also build a tree
        if let Ok(catalog) = archsecure::Catalog::from_toml_str(content, Path::new("fuzz.toml")) {
            let _ = catalog.build_tree(&[]);
        }
    }
});
