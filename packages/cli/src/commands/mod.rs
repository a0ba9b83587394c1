pub mod export;
pub mod page;
pub mod regen;
pub mod replay;

pub use export::{export, ExportArgs};
pub use regen::{regen, RegenArgs};
pub use replay::{replay, ReplayArgs};
