use crate::app::domain::settings::ThemeMode;

/// Resolve a theme setting to "dark or not", asking the OS when the user
/// left it on the system default.
pub fn resolve_dark_mode(mode: ThemeMode) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::SystemDefault => detect_system_dark_mode(),
    }
}

/// Best-effort detection of the desktop's dark preference. Falls back to light.
pub fn detect_system_dark_mode() -> bool {
    let detected = os_prefers_dark();
    tracing::debug!(?detected, "system dark mode detection");
    detected.unwrap_or(false)
}

#[cfg(target_os = "windows")]
fn os_prefers_dark() -> Option<bool> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let personalize = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .ok()?;
    // AppsUseLightTheme: 0 = dark, 1 = light
    let light: u32 = personalize.get_value("AppsUseLightTheme").ok()?;
    Some(light == 0)
}

#[cfg(target_os = "linux")]
fn os_prefers_dark() -> Option<bool> {
    let gsettings = |key: &str| -> Option<String> {
        let output = std::process::Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", key])
            .output()
            .ok()?;
        Some(String::from_utf8_lossy(&output.stdout).to_lowercase())
    };

    if gsettings("color-scheme").is_some_and(|s| s.contains("prefer-dark")) {
        return Some(true);
    }
    gsettings("gtk-theme").map(|theme| theme.contains("dark"))
}

#[cfg(target_os = "macos")]
fn os_prefers_dark() -> Option<bool> {
    let output = std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    // The key is absent (non-zero exit) in light mode.
    Some(output.status.success() && String::from_utf8_lossy(&output.stdout).to_lowercase().contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn os_prefers_dark() -> Option<bool> {
    None
}
