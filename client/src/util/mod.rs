//! Small shared helpers with no backend or view coupling.

pub mod cookie;
