// Domain layer: entity types, request payloads, the session object and ports.
// Nothing here talks to the network.

pub mod model;
pub mod personalized;
pub mod ports;
pub mod requests;
pub mod session;
pub mod tracking;

pub use model::*;
pub use personalized::*;
pub use requests::*;
pub use tracking::*;
pub use session::Session;
