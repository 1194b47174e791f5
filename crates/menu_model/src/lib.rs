pub mod domain;
pub mod error;
pub mod menu;

pub use domain::{Callback, Command, CommandKind, FavoriteRule, OwningApp, RawCommand};
pub use error::CommandError;
pub use menu::{collect_actions, find_action, Handler, MenuNode};
