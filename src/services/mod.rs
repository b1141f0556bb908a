pub mod collector;
pub mod stormglass;
