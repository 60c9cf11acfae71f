pub mod ini;
pub mod interpolation;
pub mod loader;
pub mod profile;
pub mod settings;
pub mod validation;

pub use loader::{load, load_with_home, parse_profile};
pub use profile::{FileMapping, Group, ProfileModel};
pub use settings::{Mode, Settings, SettingsOverlay};
