mod error;
mod recording;
mod service;
mod session;
mod store;
pub use error::*;
pub use recording::*;
pub use service::*;
pub use session::*;
pub use store::*;

pub struct Config {
    /// Source of the game ids.
    pub rng: rand::rngs::StdRng,
    /// Prefix of the `url` of every game shown to clients.
    pub base_url: String,
    pub recorder: Option<recording::Recorder>,
}
