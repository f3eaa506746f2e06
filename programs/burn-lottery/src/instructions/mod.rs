pub mod admin;
pub mod claim_prize;
pub mod close_round;
pub mod enter;
pub mod resolve_round;
pub mod sweep_prize;
pub mod views;

pub use admin::*;
pub use claim_prize::*;
pub use close_round::*;
pub use enter::*;
pub use resolve_round::*;
pub use sweep_prize::*;
pub use views::*;
