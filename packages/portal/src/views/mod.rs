mod home;
pub use home::Home;

mod tickets;
pub use tickets::Tickets;
