pub mod config;
pub mod escrow;
pub mod lottery;
pub mod player;
pub mod randomness;
pub mod round;
pub mod vault;
pub mod winner;

pub use config::*;
pub use escrow::*;
pub use lottery::*;
pub use player::*;
pub use randomness::*;
pub use round::*;
pub use vault::*;
pub use winner::*;
