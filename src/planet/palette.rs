use nalgebra::Vector3;

pub type Rgb = Vector3<f32>;

lazy_static! {
    pub static ref WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub static ref YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);

    /// Base colors for the light bands of gas giants.
    pub static ref BRIGHT: [Rgb; 5] = [
        Rgb::new(0.93, 0.84, 0.62),
        Rgb::new(0.85, 0.72, 0.52),
        Rgb::new(0.78, 0.86, 0.93),
        Rgb::new(0.95, 0.65, 0.42),
        Rgb::new(0.82, 0.88, 0.70),
    ];

    /// Base colors for rock and for the dark bands of gas giants.
    pub static ref DARK: [Rgb; 5] = [
        Rgb::new(0.36, 0.25, 0.20),
        Rgb::new(0.30, 0.30, 0.32),
        Rgb::new(0.45, 0.32, 0.18),
        Rgb::new(0.22, 0.28, 0.36),
        Rgb::new(0.40, 0.18, 0.14),
    ];
}
