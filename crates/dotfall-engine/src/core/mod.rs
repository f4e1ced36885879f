pub use self::{cell::*, grid::*, layout::*, piece::*};

pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod layout;
pub(crate) mod piece;
