/// Surface and damping properties of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution (bounciness), combined by multiplication
    pub restitution: f32,

    /// Coefficient of friction, combined by multiplication
    pub friction: f32,

    /// Linear velocity damping
    pub linear_damping: f32,

    /// Angular velocity damping
    pub angular_damping: f32,
}

impl Material {
    /// Creates a new material with the specified surface properties and no damping
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Returns the material with the given damping factors
    pub fn with_damping(mut self, linear_damping: f32, angular_damping: f32) -> Self {
        self.linear_damping = linear_damping;
        self.angular_damping = angular_damping;
        self
    }
}

impl Default for Material {
    /// Frictionless, perfectly inelastic and undamped, matching an unset descriptor
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}
