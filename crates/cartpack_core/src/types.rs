pub use self::alias::*;
pub use self::cartridge::*;
pub use self::config_record::*;
pub use self::entry::*;
pub use self::merge_strategy::*;
pub use self::project_config::*;

mod alias;
mod cartridge;
mod config_record;
mod entry;
mod merge_strategy;
mod project_config;
