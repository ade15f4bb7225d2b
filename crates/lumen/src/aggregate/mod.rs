mod bvh;
mod shapelist;

pub use bvh::Bvh;
pub use shapelist::ShapeList;
