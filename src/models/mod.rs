pub mod enums;

mod address;
mod image;
mod intake;
mod lookup;
mod patient;
mod phone;

pub use address::*;
pub use image::*;
pub use intake::*;
pub use lookup::*;
pub use patient::*;
pub use phone::*;
