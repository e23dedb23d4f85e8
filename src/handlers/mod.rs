pub mod discover;
pub mod health;
pub mod poll;
pub mod state;

pub use discover::discover;
pub use health::health;
pub use poll::poll;
pub use state::AppState;
