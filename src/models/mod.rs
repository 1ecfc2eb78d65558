pub mod appointment;
pub mod contact;
pub mod doctor;
pub mod enums;

pub use appointment::*;
pub use contact::*;
pub use doctor::*;
pub use enums::*;
