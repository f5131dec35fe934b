pub mod error;
pub mod format;
pub mod loader;
pub mod options;
pub mod setup;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use options::StoreOptions;
pub use setup::StoreSetup;
pub use store::{DEFAULT_LANGUAGE_NAME, LocalizationStore};
pub use value::{CULTURE_NAME_KEY, Dictionary, Value};
