//! Read models and drafts behind the staff screens: the POS ticket being keyed in,
//! the kitchen board and the orders dashboard.

pub mod dashboard;
pub mod kitchen;
pub mod pos;

pub use dashboard::{DashboardView, OrderFilter, OrderStats, OrdersDashboard};
pub use kitchen::{KitchenBoard, KitchenDisplay, KitchenTicket};
pub use pos::{PosLine, PosTicket};
