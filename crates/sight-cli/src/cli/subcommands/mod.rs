pub mod auth;
pub mod location;
pub mod observation;

pub use auth::AuthCommands;
pub use location::LocationCommands;
pub use observation::ObservationCommands;
