pub mod bounds;
pub mod distributions;
pub mod quaternion;
pub mod transform;
pub mod vec;
