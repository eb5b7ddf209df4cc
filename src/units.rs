//! Newtypes for grid measurements, so a width cannot be passed as a height.

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
