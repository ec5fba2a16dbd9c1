/// Typewriter effect: the first character shows immediately, then one more
/// every `delay` seconds.
#[derive(Debug, Clone)]
pub struct TextReveal {
    text: String,
    delay: f32,
    elapsed: f32,
    visible_bytes: usize,
}

impl TextReveal {
    pub fn new(text: impl Into<String>, delay: f32) -> Self {
        let mut reveal = Self {
            text: text.into(),
            delay: delay.max(0.0),
            elapsed: 0.0,
            visible_bytes: 0,
        };
        reveal.reveal_next();
        reveal
    }

    /// Returns true when more text became visible.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_complete() {
            return false;
        }
        self.elapsed += dt;
        let mut changed = false;
        while !self.is_complete() && self.elapsed >= self.delay {
            self.elapsed -= self.delay;
            changed |= self.reveal_next();
        }
        changed
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.visible_bytes]
    }

    pub fn is_complete(&self) -> bool {
        self.visible_bytes >= self.text.len()
    }

    fn reveal_next(&mut self) -> bool {
        match self.text[self.visible_bytes..].chars().next() {
            Some(ch) => {
                self.visible_bytes += ch.len_utf8();
                true
            }
            None => false,
        }
    }
}
