//! Host-side simulation of a bouncing push button.
//!
//! Two simulated contacts are pressed and released a few times; each press
//! and release bounces for a handful of ticks before settling. The
//! debouncer turns that into one clean rising and one clean falling edge
//! per press.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=debug cargo run -p debounce --example noisy_button --features std,tracing
//! ```

// Desktop example — unwrap/expect/print acceptable here.
#![allow(clippy::expect_used, clippy::print_stdout, clippy::arithmetic_side_effects)]

use debounce::mocks::ScriptedPins;
use debounce::{ButtonBuilder, Debouncer, Edge};
use tracing_subscriber::EnvFilter;

/// Simulated scheduler tick.
const TICK_MS: u32 = 2;

/// Tiny xorshift generator so the example has no extra dependencies.
struct Bounce(u32);

impl Bounce {
    fn sample(&mut self) -> bool {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0 & 1 == 1
    }
}

/// Idle low, then `presses` × (bounce → hold high → bounce → hold low).
fn press_script(noise: &mut Bounce, presses: usize, out: &mut Vec<bool>) {
    out.push(false);
    for _ in 0..presses {
        out.extend((0..6).map(|_| noise.sample()));
        out.extend(std::iter::repeat(true).take(25));
        out.extend((0..6).map(|_| noise.sample()));
        out.extend(std::iter::repeat(false).take(25));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut noise = Bounce(0x2545_f491);
    let mut pins: ScriptedPins<2, 512> = ScriptedPins::new();
    for (pin, presses) in [(0u8, 3usize), (1, 2)] {
        let mut script = Vec::new();
        press_script(&mut noise, presses, &mut script);
        pins.script(pin, &script).expect("script fits");
    }

    let mut buttons = [
        ButtonBuilder::new(0)
            .debounce_ms(20)
            .tick_period_ms(TICK_MS)
            .build()
            .expect("valid button"),
        ButtonBuilder::new(1)
            .debounce_ms(10)
            .tick_period_ms(TICK_MS)
            .build()
            .expect("valid button"),
    ];
    let mut db = Debouncer::new(&mut buttons, pins).expect("valid config");

    for tick in 0..200u32 {
        db.update();
        while let Some(ev) = db.pop_event() {
            let arrow = match ev.edge {
                Edge::Rising => "pressed",
                Edge::Falling => "released",
            };
            println!("{:>5} ms  pin {}  {}", tick * TICK_MS, ev.pin, arrow);
        }
    }
}
