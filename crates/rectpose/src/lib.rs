#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rectpose_core as pose;

#[doc(inline)]
pub use rectpose_restore as restore;
