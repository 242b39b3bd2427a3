pub mod event_types;
pub mod event_bus;

pub use event_bus::{ChangeNotifier, EventHandler, NotifierStats};
pub use event_types::{Event, EventPriority, EventType};
