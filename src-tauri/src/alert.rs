//! One-shot completion alert: system notification plus audible chime.
//!
//! Strictly best-effort. Missing permission, missing audio device, or any
//! other platform gap degrades to a log line; nothing here is allowed to
//! reach the tick loop as an error.

use tauri::AppHandle;
use tauri_plugin_notification::{NotificationExt, PermissionState};
use tracing::{debug, warn};

use tickdown_core::config::NotificationsConfig;

const NOTIFICATION_TITLE: &str = "Timer Complete! \u{23f0}";
const DEFAULT_BODY: &str = "Your timer has finished";

/// Fire the completion alert for one countdown. Called at most once per
/// target assignment (the engine guards re-firing).
pub fn fire(app: &AppHandle, title: &str, config: &NotificationsConfig) {
    if config.enabled {
        notify(app, title);
    }
    if config.chime {
        chime();
    }
}

fn notify(app: &AppHandle, title: &str) {
    let notification = app.notification();

    let state = match notification.permission_state() {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "could not query notification permission");
            return;
        }
    };
    let granted = match state {
        PermissionState::Granted => true,
        PermissionState::Denied => false,
        // Not yet decided: ask now. The user may sit on the prompt for as
        // long as they like; the caller runs us off the tick loop.
        _ => matches!(
            notification.request_permission(),
            Ok(PermissionState::Granted)
        ),
    };
    if !granted {
        debug!("notification permission denied, skipping completion notification");
        return;
    }

    let body = if title.is_empty() { DEFAULT_BODY } else { title };
    if let Err(e) = notification
        .builder()
        .title(NOTIFICATION_TITLE)
        .body(body)
        .show()
    {
        warn!(error = %e, "failed to show completion notification");
    }
}

/// Two-tone chime (C5 then E5), the companion cue to the notification.
/// Runs on a detached thread; a machine with no usable audio output just
/// stays silent.
fn chime() {
    std::thread::spawn(|| {
        use rodio::source::{SineWave, Source};
        use rodio::{OutputStream, Sink};
        use std::time::Duration;

        let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
            debug!("no audio output device, skipping chime");
            return;
        };
        let Ok(sink) = Sink::try_new(&stream_handle) else {
            debug!("audio sink unavailable, skipping chime");
            return;
        };

        let c5 = SineWave::new(523.25)
            .take_duration(Duration::from_millis(150))
            .amplify(0.30);
        let e5 = SineWave::new(659.25)
            .take_duration(Duration::from_millis(250))
            .amplify(0.30);

        sink.append(c5);
        sink.append(e5);
        sink.sleep_until_end();
    });
}
