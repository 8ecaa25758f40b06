mod machine;
mod service;

pub use machine::MachineMemoryPersistence;
pub use service::ServiceMemoryPersistence;
