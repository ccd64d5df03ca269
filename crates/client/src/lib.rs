pub mod http;
pub mod memory;
pub mod messages;
pub mod service;
pub mod transport;

pub use http::HttpTransport;
pub use memory::{MemoryTransport, seed_heroes};
pub use messages::MessageLog;
pub use service::HeroService;
pub use transport::{Transport, TransportError};
