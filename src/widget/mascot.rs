// Mascot state: eye tracking and the blink cycle
//
// The mascot blinks at a random interval while awake. A blink is two timer
// hops on the same Timer: BlinkStart closes the eyes, BlinkEnd opens them and
// arms the next cycle. Sleeping cancels the cycle outright.

use crate::config::TimerConfig;
use crate::events::AppEvent;
use crate::schedule::Timer;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;

/// Largest eye offset in cells, each axis
const MAX_EYE_MOVE: f64 = 1.0;

/// Pointer distance (in half-cells) per cell of eye movement
const EYE_FALLOFF: f64 = 15.0;

/// What the face should show this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MascotFace {
    /// Eyes open, shifted by (dx, dy) cells
    Awake { dx: i8, dy: i8 },
    Blinking,
    Asleep,
}

#[derive(Debug)]
pub struct Mascot {
    eyes: (i8, i8),
    blinking: bool,
    timer: Timer,
    blink_range: (Duration, Duration),
    blink_duration: Duration,
}

impl Mascot {
    pub fn new(timers: &TimerConfig) -> Self {
        Self {
            eyes: (0, 0),
            blinking: false,
            timer: Timer::new(),
            blink_range: timers.blink_range(),
            blink_duration: timers.blink_duration(),
        }
    }

    /// Restart the blink cycle for the given sleeping state
    pub fn reschedule(&mut self, sleeping: bool, tx: &mpsc::Sender<AppEvent>) {
        self.blinking = false;
        if sleeping {
            self.timer.cancel();
            return;
        }
        let delay = random_delay(self.blink_range);
        self.timer
            .schedule(delay, tx, |generation| AppEvent::BlinkStart { generation });
    }

    pub fn on_blink_start(&mut self, generation: u64, tx: &mpsc::Sender<AppEvent>) -> bool {
        if !self.timer.fire(generation) {
            return false;
        }
        self.blinking = true;
        self.timer
            .schedule(self.blink_duration, tx, |generation| AppEvent::BlinkEnd {
                generation,
            });
        true
    }

    pub fn on_blink_end(&mut self, generation: u64, tx: &mpsc::Sender<AppEvent>) -> bool {
        if !self.timer.fire(generation) {
            return false;
        }
        self.reschedule(false, tx);
        true
    }

    pub fn is_blink_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Point the eyes at a spot `dx`,`dy` cells away from the face centre
    pub fn look_at(&mut self, dx: i32, dy: i32) {
        self.eyes = eye_offset(dx, dy);
    }

    pub fn face(&self, sleeping: bool) -> MascotFace {
        if sleeping {
            MascotFace::Asleep
        } else if self.blinking {
            MascotFace::Blinking
        } else {
            MascotFace::Awake {
                dx: self.eyes.0,
                dy: self.eyes.1,
            }
        }
    }
}

/// Direction to the pointer, scaled down and clamped so the eyes stay on the face
pub fn eye_offset(dx: i32, dy: i32) -> (i8, i8) {
    // Terminal cells are about twice as tall as wide
    let (x, y) = (dx as f64, dy as f64 * 2.0);
    let distance = (x.hypot(y) / EYE_FALLOFF).min(MAX_EYE_MOVE);
    if distance == 0.0 {
        return (0, 0);
    }
    let angle = y.atan2(x);
    (
        (angle.cos() * distance).round() as i8,
        (angle.sin() * distance).round() as i8,
    )
}

fn random_delay((min, max): (Duration, Duration)) -> Duration {
    let (min, max) = (min.as_millis() as u64, max.as_millis() as u64);
    if min >= max {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}
