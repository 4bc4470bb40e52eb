//! Session layer: the game manager, its persisted format, and the storage
//! and actuator collaborators it talks to.

pub mod actuator;
pub mod manager;
pub mod snapshot;
pub mod storage;

pub use actuator::{Actuator, Metadata, NullActuator};
pub use manager::{GameManager, InputEvent};
pub use snapshot::GameSnapshot;
pub use storage::{MemoryStorage, StorageManager};
