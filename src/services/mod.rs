mod machine;
mod service;

pub use machine::MachineService;
pub use service::ServiceService;
