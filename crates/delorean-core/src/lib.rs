pub mod compact;
pub mod constants;
pub mod error;
pub mod types;

pub use compact::{CompactTarget, DecodedTarget, Target};
pub use constants::*;
pub use error::ParamsError;
pub use primitive_types::U256;
pub use types::*;
