//! Light and dark palettes for the dashboard

use std::str::FromStr;
use std::sync::OnceLock;

pub const ENV_THEME: &str = "CAMPUS_THEME";

static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

/// Requested theme, from `CAMPUS_THEME`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "" => Ok(Self::System),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Reads `CAMPUS_THEME`, falling back to the system preference.
pub fn theme_from_env() -> ResolvedTheme {
    let mode = std::env::var(ENV_THEME)
        .ok()
        .map(|raw| {
            raw.parse::<ThemeMode>().unwrap_or_else(|error| {
                tracing::warn!("{}; using system theme", error);
                ThemeMode::System
            })
        })
        .unwrap_or_default();
    resolve_theme(mode)
}

pub fn resolve_theme(mode: ThemeMode) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System if is_system_dark_mode() => ResolvedTheme::Dark,
        ThemeMode::System => ResolvedTheme::Light,
    }
}

/// Detected once; the probe may spawn a subprocess.
pub fn is_system_dark_mode() -> bool {
    *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode)
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    match std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(error) => {
            tracing::warn!("Failed to detect system theme: {}", error);
            false
        }
    }
}

#[cfg(target_os = "windows")]
fn detect_system_dark_mode() -> bool {
    match std::process::Command::new("reg")
        .args([
            "query",
            r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
    {
        // AppsUseLightTheme = 0x0 means dark
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains("0x0"),
        Err(error) => {
            tracing::warn!("Failed to detect system theme: {}", error);
            false
        }
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn detect_system_dark_mode() -> bool {
    std::env::var("GTK_THEME").is_ok_and(|theme| theme.to_lowercase().contains("dark"))
}

#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_overlay: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub info: &'static str,
}

pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f5f7fa",
    bg_overlay: "rgba(15, 23, 42, 0.45)",
    text_primary: "#111827",
    text_secondary: "#4b5563",
    text_muted: "#9ca3af",
    border: "#e5e7eb",
    accent: "#0f766e",
    accent_text: "#ffffff",
    error: "#dc2626",
    success: "#16a34a",
    info: "#2563eb",
};

pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#111827",
    bg_secondary: "#1f2937",
    bg_overlay: "rgba(0, 0, 0, 0.6)",
    text_primary: "#f3f4f6",
    text_secondary: "#d1d5db",
    text_muted: "#6b7280",
    border: "#374151",
    accent: "#2dd4bf",
    accent_text: "#042f2e",
    error: "#f87171",
    success: "#4ade80",
    info: "#60a5fa",
};
