#![no_main]

use libfuzzer_sys::fuzz_target;
use mahjong_client::chat::ChatLog;
use mahjong_client::dispatch::dispatch;
use mahjong_client::protocol::ServerMessage;
use mahjong_client::session::Session;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = serde_json::from_slice::<ServerMessage>(data) else {
        return;
    };

    // Whatever parses must also apply cleanly, from the zero state and from
    // inside a running game.
    let mut session = Session::new();
    let mut chat = ChatLog::new();
    let _ = dispatch(&mut session, &mut chat, msg.clone());

    session.connect("fuzz");
    session.login("fuzz");
    session.join_room("room");
    session.start_game();
    let _ = dispatch(&mut session, &mut chat, msg);
    assert!(session.flags().is_nested());
});
