#![no_main]

use libfuzzer_sys::fuzz_target;
use mahjong_client::protocol::ActionDescriptor;
use mahjong_client::tiles::{action_choices, tile_font, tile_name};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = tile_name(s);
        assert!(!tile_font(s).is_empty());
    }

    // Every entry of a parsed menu carries a label.
    if let Ok(actions) = serde_json::from_slice::<ActionDescriptor>(data) {
        let menu = action_choices(&actions);
        assert!(menu.iter().all(|choice| !choice.label().is_empty()));
    }
});
