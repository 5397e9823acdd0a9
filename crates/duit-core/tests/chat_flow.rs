//! End-to-end conversation scripts against a real SQLite file — the same
//! paths the webhook transport drives, minus the HTTP layer.

use std::sync::Arc;

use duit_core::Engine;
use duit_db::Database;

const ALICE_CHAT: i64 = 1001;
const BOB_CHAT: i64 = 1002;

fn engine() -> (tempfile::TempDir, Engine) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(&dir.path().join("duit.db")).unwrap();
    (dir, Engine::new(Arc::new(db)))
}

fn say(engine: &Engine, chat: i64, text: &str) -> String {
    engine
        .handle(chat, text)
        .unwrap_or_else(|| panic!("expected a reply to {text:?}"))
        .text
}

fn register(engine: &Engine, chat: i64, username: &str, password: &str) {
    say(engine, chat, "/register");
    say(engine, chat, username);
    assert_eq!(
        say(engine, chat, password),
        "Registrasi berhasil ✅\nSekarang ketik /login untuk masuk."
    );
}

fn login(engine: &Engine, chat: i64, username: &str, password: &str) {
    say(engine, chat, "/login");
    say(engine, chat, username);
    let welcome = say(engine, chat, password);
    assert!(welcome.contains("Selamat datang"), "got: {welcome}");
}

#[test]
fn start_shows_the_introduction() {
    let (_dir, engine) = engine();
    let intro = say(&engine, ALICE_CHAT, "/start");
    assert!(intro.contains("/register"));
    assert!(intro.contains("/login"));
}

#[test]
fn registration_does_not_log_the_user_in() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    // still anonymous: transaction entry is gated
    assert_eq!(
        say(&engine, ALICE_CHAT, "➕ Uang Masuk"),
        "Kamu belum login. Ketik /login dulu."
    );
}

#[test]
fn registration_reprompts_on_bad_input() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, BOB_CHAT, "/register");
    assert_eq!(
        say(&engine, BOB_CHAT, "al"),
        "Username minimal 3 karakter. Coba lagi:"
    );
    assert_eq!(
        say(&engine, BOB_CHAT, "alice"),
        "Username sudah dipakai. Coba username lain:"
    );
    assert_eq!(say(&engine, BOB_CHAT, "bob"), "Buat password (minimal 6 karakter):");
    assert_eq!(
        say(&engine, BOB_CHAT, "short"),
        "Password minimal 6 karakter. Coba lagi:"
    );
    assert!(say(&engine, BOB_CHAT, "secret2").contains("Registrasi berhasil"));
}

#[test]
fn failed_login_is_terminal_and_uniform() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "/login");
    say(&engine, ALICE_CHAT, "alice");
    let wrong_password = say(&engine, ALICE_CHAT, "wrong");

    say(&engine, ALICE_CHAT, "/login");
    say(&engine, ALICE_CHAT, "nobody");
    let unknown_user = say(&engine, ALICE_CHAT, "secret1");

    // unknown user and wrong password read identically
    assert_eq!(wrong_password, unknown_user);
    assert!(wrong_password.contains("Login gagal"));

    // the dialogue ended: free text is no longer consumed by it
    assert_eq!(engine.handle(ALICE_CHAT, "alice"), None);
    // and the session is still anonymous
    assert_eq!(
        say(&engine, ALICE_CHAT, "📅 Masuk Hari Ini"),
        "Kamu belum login. Ketik /login dulu."
    );
}

#[test]
fn income_entry_strips_separators_and_skips_note() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    assert_eq!(
        say(&engine, ALICE_CHAT, "➕ Uang Masuk"),
        "Masukkan nominal UANG MASUK (angka saja). Contoh: 50000"
    );
    assert_eq!(
        say(&engine, ALICE_CHAT, "50.000"),
        "Catatan (boleh kosong, ketik '-' untuk skip):"
    );
    assert_eq!(
        say(&engine, ALICE_CHAT, "-"),
        "✅ Uang masuk tercatat: Rp.50.000"
    );

    assert_eq!(
        say(&engine, ALICE_CHAT, "📅 Masuk Hari Ini"),
        "📅 Uang MASUK hari ini: Rp.50.000"
    );
}

#[test]
fn comma_separated_amounts_parse_the_same() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "➕ Uang Masuk");
    say(&engine, ALICE_CHAT, "50,000");
    assert_eq!(
        say(&engine, ALICE_CHAT, "gaji"),
        "✅ Uang masuk tercatat: Rp.50.000"
    );
}

#[test]
fn bad_amount_reprompts_without_leaving_the_flow() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "➖ Uang Keluar");
    assert_eq!(say(&engine, ALICE_CHAT, "50a00"), "Nominal harus angka. Coba lagi:");
    assert_eq!(
        say(&engine, ALICE_CHAT, "25.000"),
        "Catatan (boleh kosong, ketik '-' untuk skip):"
    );
    assert_eq!(
        say(&engine, ALICE_CHAT, "makan siang"),
        "✅ Uang keluar tercatat: Rp.25.000"
    );

    assert_eq!(
        say(&engine, ALICE_CHAT, "🗓️ Keluar Minggu Ini"),
        "🗓️ Uang KELUAR minggu ini (Senin–Minggu): Rp.25.000"
    );
}

#[test]
fn month_recap_balance_can_go_negative() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "➕ Uang Masuk");
    say(&engine, ALICE_CHAT, "70000");
    say(&engine, ALICE_CHAT, "-");

    say(&engine, ALICE_CHAT, "➖ Uang Keluar");
    say(&engine, ALICE_CHAT, "100000");
    say(&engine, ALICE_CHAT, "kontrakan");

    assert_eq!(
        say(&engine, ALICE_CHAT, "📆 Rekap Bulan Ini"),
        "📆 Rekap BULAN ini:\n- Masuk : Rp.70.000\n- Keluar: Rp.100.000\n- Saldo : Rp.-30.000"
    );
}

#[test]
fn cancel_clears_the_flow_but_not_the_login() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "➕ Uang Masuk");
    say(&engine, ALICE_CHAT, "50000");
    assert_eq!(say(&engine, ALICE_CHAT, "/cancel"), "Dibatalkan.");

    // nothing was recorded, and the session is still authenticated
    assert_eq!(
        say(&engine, ALICE_CHAT, "📅 Masuk Hari Ini"),
        "📅 Uang MASUK hari ini: Rp.0"
    );
}

#[test]
fn cancel_outside_a_flow_is_ignored() {
    let (_dir, engine) = engine();
    assert_eq!(engine.handle(ALICE_CHAT, "/cancel"), None);
}

#[test]
fn active_flow_consumes_menu_trigger_text() {
    let (_dir, engine) = engine();
    say(&engine, ALICE_CHAT, "/login");

    // the trigger string is just username input while a flow is active
    assert_eq!(say(&engine, ALICE_CHAT, "📅 Masuk Hari Ini"), "Password:");
}

#[test]
fn starting_a_new_flow_abandons_the_old_one() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "/register");
    say(&engine, ALICE_CHAT, "bob");
    // switch mid-registration; the register scratch must be gone
    assert_eq!(say(&engine, ALICE_CHAT, "/login"), "Username:");
    say(&engine, ALICE_CHAT, "alice");
    assert!(say(&engine, ALICE_CHAT, "secret1").contains("Selamat datang, alice"));
}

#[test]
fn sessions_are_isolated_per_chat() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");
    login(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "➕ Uang Masuk");
    say(&engine, ALICE_CHAT, "50000");
    say(&engine, ALICE_CHAT, "-");

    // bob's chat is its own session: anonymous, no flow, no data bleed
    assert_eq!(
        say(&engine, BOB_CHAT, "📅 Masuk Hari Ini"),
        "Kamu belum login. Ketik /login dulu."
    );

    register(&engine, BOB_CHAT, "bob", "secret2");
    login(&engine, BOB_CHAT, "bob", "secret2");
    assert_eq!(
        say(&engine, BOB_CHAT, "📅 Masuk Hari Ini"),
        "📅 Uang MASUK hari ini: Rp.0"
    );
}

#[test]
fn logout_works_from_command_and_menu() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    login(&engine, ALICE_CHAT, "alice", "secret1");
    assert_eq!(
        say(&engine, ALICE_CHAT, "🚪 Logout"),
        "Kamu sudah logout. Ketik /login untuk masuk lagi."
    );
    assert_eq!(
        say(&engine, ALICE_CHAT, "➕ Uang Masuk"),
        "Kamu belum login. Ketik /login dulu."
    );

    login(&engine, ALICE_CHAT, "alice", "secret1");
    assert_eq!(
        say(&engine, ALICE_CHAT, "/logout"),
        "Kamu sudah logout. Ketik /login untuk masuk lagi."
    );
}

#[test]
fn unknown_commands_and_idle_chatter_are_ignored() {
    let (_dir, engine) = engine();
    assert_eq!(engine.handle(ALICE_CHAT, "/selfdestruct"), None);
    assert_eq!(engine.handle(ALICE_CHAT, "halo bot"), None);

    // unknown commands stay ignored inside a flow too
    say(&engine, ALICE_CHAT, "/register");
    assert_eq!(engine.handle(ALICE_CHAT, "/selfdestruct"), None);
    assert_eq!(say(&engine, ALICE_CHAT, "alice"), "Buat password (minimal 6 karakter):");
}

#[test]
fn menu_flag_is_set_only_where_the_menu_belongs() {
    let (_dir, engine) = engine();
    register(&engine, ALICE_CHAT, "alice", "secret1");

    say(&engine, ALICE_CHAT, "/login");
    say(&engine, ALICE_CHAT, "alice");
    let welcome = engine.handle(ALICE_CHAT, "secret1").unwrap();
    assert!(welcome.show_menu);

    let prompt = engine.handle(ALICE_CHAT, "➕ Uang Masuk").unwrap();
    assert!(!prompt.show_menu);
    say(&engine, ALICE_CHAT, "50000");
    let confirmation = engine.handle(ALICE_CHAT, "-").unwrap();
    assert!(confirmation.show_menu);
}
