//! Opening the host's application settings screen.
//!
//! Once a permission is denied permanently the only way forward is for the
//! user to flip it in system settings.

/// Description of the settings screen to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsIntent {
    pub uri: String,
    pub new_task: bool,
    pub no_history: bool,
    pub exclude_from_recents: bool,
}

impl SettingsIntent {
    /// Details screen of the application identified by `app_id`.
    pub fn application_details(app_id: &str) -> Self {
        Self {
            uri: format!("package:{app_id}"),
            new_task: true,
            no_history: true,
            exclude_from_recents: true,
        }
    }
}

/// Fire-and-forget launcher for host settings screens.
pub trait SettingsLauncher {
    fn open(&self, intent: &SettingsIntent);
}

/// Open the application details settings screen.
pub fn launch_application_details_settings(launcher: &dyn SettingsLauncher, app_id: &str) {
    let intent = SettingsIntent::application_details(app_id);
    tracing::debug!(uri = %intent.uri, "opening application settings");
    launcher.open(&intent);
}
