//! User-facing messages (Indonesian)

/// Shown next to the ingredients field when it is too short
pub const INGREDIENTS_REQUIRED: &str = "Sebutkan setidaknya satu bahan, misal: telur, nasi.";

/// Form-level message when no cooking tool is selected
pub const TOOLS_REQUIRED: &str = "Sebutkan setidaknya satu alat masak.";

/// Informational message for a successful search without results
pub const NO_RECIPES_FOUND: &str = "Tidak ada resep yang ditemukan. Coba ganti bahan atau alatmu.";

/// Banner for a failed suggestion call
pub const SUGGESTION_FAILED: &str =
    "Maaf, terjadi kesalahan saat mencari resep. Silakan coba lagi nanti.";

/// Voice capture: microphone permission denied
pub const VOICE_PERMISSION_DENIED: &str =
    "Izin menggunakan mikrofon ditolak. Aktifkan di pengaturan browser.";

/// Voice capture: nothing was heard
pub const VOICE_NO_SPEECH: &str = "Tidak ada suara yang terdeteksi. Coba lagi.";

/// Voice capture: any other recognizer failure
pub const VOICE_GENERIC_ERROR: &str = "Terjadi kesalahan pada pengenalan suara.";

/// Voice capture: the recognizer refused to start
pub const VOICE_START_FAILED: &str = "Tidak dapat memulai fitur rekam suara.";

/// Title used for voice notifications
pub const VOICE_ERROR_TITLE: &str = "Voice Command Gagal";

/// Title of the error banner
pub const ERROR_BANNER_TITLE: &str = "Oops, ada masalah!";

/// Heading above the recipe list
pub const RESULTS_HEADING: &str = "Ini dia idenya!";

/// Label shown while a card image is generated
pub const IMAGE_LOADING: &str = "Membuat gambar...";

/// Submit button label while a search runs
pub const SEARCHING: &str = "Mencari ide...";
