//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The session applies them
//! in a fixed order: win check first, then fullness.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};
