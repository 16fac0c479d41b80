pub mod local_storage;
pub mod theme;

pub use local_storage::LocalStorage;
pub use theme::{ThemeMode, ThemePreference};
