// Domain layer: the instant abstraction and the units it can be stepped by.

pub mod instant;
pub mod unit;
