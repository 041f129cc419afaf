use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "QuickMeds";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/QuickMeds/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("QuickMeds")
}

/// Get the path of the medication store
pub fn database_path() -> PathBuf {
    app_data_dir().join("medicines.db")
}
