pub mod cart;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod staff;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use reservation::*;
pub use staff::*;
