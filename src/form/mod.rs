mod fields;
mod parse;

pub use fields::{CROP_TYPES, FormField, FormFields, SOIL_TYPES};
pub use parse::parse_float;
