//! Optional cosmetic window effects.
//!
//! Capability-checked strategy: the manager always calls through the same
//! interface with the same small options record, and on platforms without a
//! backend the applier is a no-op. Effects are pure decoration -- failure or
//! absence never prevents a window from displaying or its engine from
//! ticking.

use tauri::WebviewWindow;
use tracing::debug;

/// Fixed options handed to the effect backend after a window's content
/// loads.
#[derive(Debug, Clone)]
pub struct EffectOptions {
    pub corner_radius: u32,
    /// Background tint, `#rrggbb`. Backends without tint support ignore it.
    pub tint: Option<String>,
    /// Named visual variant, for backends that style by preset.
    pub variant: &'static str,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            corner_radius: 24,
            tint: None,
            variant: "overlay",
        }
    }
}

/// The available effect backend for this process, detected once at startup.
#[derive(Debug, Clone, Copy)]
pub enum EffectApplier {
    /// Windows 11 DWM corner rounding.
    #[cfg(windows)]
    Dwm,
    /// No cosmetic backend on this platform.
    Unavailable,
}

impl EffectApplier {
    pub fn detect() -> Self {
        #[cfg(windows)]
        {
            EffectApplier::Dwm
        }
        #[cfg(not(windows))]
        {
            EffectApplier::Unavailable
        }
    }

    pub fn apply(&self, window: &WebviewWindow, options: &EffectOptions) {
        match self {
            #[cfg(windows)]
            EffectApplier::Dwm => {
                if let Err(e) = dwm::apply(window, options) {
                    tracing::warn!(window = %window.label(), error = %e, "cosmetic effect failed");
                }
            }
            EffectApplier::Unavailable => {
                debug!(
                    window = %window.label(),
                    variant = options.variant,
                    tint = ?options.tint,
                    corner_radius = options.corner_radius,
                    "no cosmetic effect backend on this platform"
                );
            }
        }
    }
}

/// Windows 11 DWM integration: rounded corners for frameless windows via
/// the DWMWA_WINDOW_CORNER_PREFERENCE attribute.
#[cfg(windows)]
mod dwm {
    use super::EffectOptions;
    use tauri::WebviewWindow;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    /// DWM window corner preference attribute
    const DWMWA_WINDOW_CORNER_PREFERENCE: i32 = 33;

    /// DWM window corner preference values
    #[repr(i32)]
    enum DwmWindowCornerPreference {
        DoNotRound = 1,
        Round = 2,
        RoundSmall = 3,
    }

    pub fn apply(window: &WebviewWindow, options: &EffectOptions) -> Result<(), String> {
        let hwnd = window.hwnd().map_err(|e| e.to_string())?;
        let preference = match options.corner_radius {
            0 => DwmWindowCornerPreference::DoNotRound,
            1..=7 => DwmWindowCornerPreference::RoundSmall,
            _ => DwmWindowCornerPreference::Round,
        } as i32;

        unsafe {
            DwmSetWindowAttribute(
                HWND(hwnd.0 as _),
                DWMWINDOWATTRIBUTE(DWMWA_WINDOW_CORNER_PREFERENCE),
                &preference as *const i32 as *const core::ffi::c_void,
                std::mem::size_of::<i32>() as u32,
            )
        }
        .map_err(|e| e.to_string())
    }
}
