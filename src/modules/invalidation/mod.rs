mod broadcaster;

pub use broadcaster::{ViewInvalidation, ViewInvalidator};
