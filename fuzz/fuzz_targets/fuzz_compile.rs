#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|source: &str| {
    // Compilation may fail, but it must never panic.
    let _ = compiler::compile(source);
});
