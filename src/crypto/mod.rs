pub mod gf256;

pub use self::gf256::FieldError;
