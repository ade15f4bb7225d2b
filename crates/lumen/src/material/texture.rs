use crate::color::Color;

pub type Uv = [f32; 2];

pub trait Texture: Sync + Send {
    fn color(&self, uv: Uv) -> Color;
}

pub struct Uniform(pub Color);

impl Texture for Uniform {
    fn color(&self, _: Uv) -> Color {
        self.0
    }
}
