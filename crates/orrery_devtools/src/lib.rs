pub mod settings_overlay;

pub use settings_overlay::SettingsOverlay;
