pub mod derived_event;
pub mod service;
pub mod service_type;

pub use derived_event::{DerivedEvent, NewDerivedEvent};
pub use service::ServiceConfig;
pub use service_type::ServiceType;
