pub use board::*;
pub use errors::*;
pub use protocol_types::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod protocol_types;
mod turn;
mod visualization;
