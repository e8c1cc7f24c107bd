pub mod confirm;
pub mod notifier;
pub mod screen;

pub use confirm::Confirmation;
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use screen::{Kpis, Screen};
