pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod spawn;
