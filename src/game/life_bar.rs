/// Time left in a round. Progress only grows; once it reaches `length` the
/// bar stays ended.
#[derive(Clone, Debug)]
pub struct LifeBar {
    progress: f32,
    length: f32,
    speed: f32,
}

impl LifeBar {
    pub fn new(length: f32, speed: f32) -> Self {
        Self {
            progress: 0.0,
            length,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.is_end() || dt <= 0.0 {
            return;
        }
        self.progress = (self.progress + self.speed * dt).min(self.length);
    }

    pub fn is_end(&self) -> bool {
        self.progress >= self.length
    }

    /// Share of the bar already used up, 0.0 to 1.0.
    pub fn fraction(&self) -> f64 {
        if self.length <= 0.0 {
            return 1.0;
        }
        (self.progress as f64 / self.length as f64).clamp(0.0, 1.0)
    }

    /// Seconds until the bar ends at the current speed.
    pub fn remaining_secs(&self) -> f32 {
        ((self.length - self.progress) / self.speed).max(0.0)
    }
}
