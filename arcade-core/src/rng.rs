#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    pub fn next_int(&mut self, max: u32) -> u32 {
        self.next() % max
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        // Top 24 bits keep the result strictly below 1.0.
        f64::from(self.next() >> 8) / f64::from(1u32 << 24)
    }

    /// Uniform draw in `[min, max)`.
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_unit()
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}
