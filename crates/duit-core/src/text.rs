//! User-facing copy and the fixed menu trigger strings. The bot speaks
//! Indonesian; everything the transport renders comes from here.

use duit_types::models::TxKind;

use crate::money::rupiah;

// -- Menu triggers (exact-match plain text) --

pub const TRIGGER_INCOME: &str = "➕ Uang Masuk";
pub const TRIGGER_EXPENSE: &str = "➖ Uang Keluar";
pub const TRIGGER_INCOME_TODAY: &str = "📅 Masuk Hari Ini";
pub const TRIGGER_EXPENSE_WEEK: &str = "🗓️ Keluar Minggu Ini";
pub const TRIGGER_MONTH_RECAP: &str = "📆 Rekap Bulan Ini";
pub const TRIGGER_LOGOUT: &str = "🚪 Logout";

// -- Notices --

pub const INTRO: &str =
    "Halo! Ini bot pencatatan keuangan.\nKetik /register untuk daftar atau /login untuk masuk.";

pub const ASK_NEW_USERNAME: &str = "Buat username:";
pub const USERNAME_TOO_SHORT: &str = "Username minimal 3 karakter. Coba lagi:";
pub const USERNAME_TAKEN: &str = "Username sudah dipakai. Coba username lain:";
pub const ASK_NEW_PASSWORD: &str = "Buat password (minimal 6 karakter):";
pub const PASSWORD_TOO_SHORT: &str = "Password minimal 6 karakter. Coba lagi:";
pub const REGISTER_DONE: &str = "Registrasi berhasil ✅\nSekarang ketik /login untuk masuk.";

pub const ASK_USERNAME: &str = "Username:";
pub const ASK_PASSWORD: &str = "Password:";
pub const LOGIN_FAILED: &str = "Login gagal ❌ Username/password salah.\nKetik /login untuk coba lagi.";
pub const LOGGED_OUT: &str = "Kamu sudah logout. Ketik /login untuk masuk lagi.";
pub const NOT_LOGGED_IN: &str = "Kamu belum login. Ketik /login dulu.";

pub const ASK_INCOME_AMOUNT: &str = "Masukkan nominal UANG MASUK (angka saja). Contoh: 50000";
pub const ASK_EXPENSE_AMOUNT: &str = "Masukkan nominal UANG KELUAR (angka saja). Contoh: 25000";
pub const AMOUNT_NOT_NUMERIC: &str = "Nominal harus angka. Coba lagi:";
pub const ASK_NOTE: &str = "Catatan (boleh kosong, ketik '-' untuk skip):";

pub const CANCELLED: &str = "Dibatalkan.";
pub const STORE_FAILURE: &str = "Terjadi kesalahan, coba lagi.";

pub fn welcome(username: &str) -> String {
    format!("Login berhasil ✅ Selamat datang, {username}!")
}

pub fn entry_recorded(kind: TxKind, amount: i64) -> String {
    match kind {
        TxKind::In => format!("✅ Uang masuk tercatat: {}", rupiah(amount)),
        TxKind::Out => format!("✅ Uang keluar tercatat: {}", rupiah(amount)),
    }
}

pub fn income_today(total: i64) -> String {
    format!("📅 Uang MASUK hari ini: {}", rupiah(total))
}

pub fn expense_week(total: i64) -> String {
    format!("🗓️ Uang KELUAR minggu ini (Senin–Minggu): {}", rupiah(total))
}

pub fn month_recap(income: i64, expense: i64) -> String {
    let balance = income - expense;
    format!(
        "📆 Rekap BULAN ini:\n- Masuk : {}\n- Keluar: {}\n- Saldo : {}",
        rupiah(income),
        rupiah(expense),
        rupiah(balance)
    )
}
