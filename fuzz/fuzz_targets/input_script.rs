#![no_main]
use genesispad::input::InputScript;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(script) = InputScript::parse(text) {
            let reparsed = InputScript::parse(&script.to_text()).expect("rendered script parses");
            assert_eq!(reparsed, script);
        }
    }
});
