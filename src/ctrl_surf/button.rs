use std::time::Duration;

use super::{
    control::{Command, Context, Feedback},
    output::Output,
    scheduler::{Scheduler, Task},
};
use crate::daw;

pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

mod led {
    pub const ON: u8 = 127;
    pub const OFF: u8 = 0;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedState {
    Off,
    Solid,
    Blinking,
}

/// A momentary button with an LED.
///
/// The LED is addressed by `led`, which is the button's own note unless the
/// button drives another button's LED.
#[derive(Debug)]
pub struct Button {
    note: u8,
    led: u8,
    command: Option<Command>,
    feedback: Option<Feedback>,
    state: LedState,
    is_led_on: bool,
    generation: u32,
}

impl Button {
    pub fn new(note: u8) -> Self {
        Self {
            note,
            led: note,
            command: None,
            feedback: None,
            state: LedState::Off,
            is_led_on: false,
            generation: 0,
        }
    }

    pub fn on_press(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn with_led(mut self, led: u8) -> Self {
        self.led = led;
        self
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn light_up(&mut self, out: &mut Output) {
        self.state = LedState::Solid;
        self.is_led_on = true;
        out.send_note(self.led, led::ON);
    }

    /// Turns the LED off, whether it was blinking or not.
    pub fn stop_blinking(&mut self, out: &mut Output) {
        self.state = LedState::Off;
        self.is_led_on = false;
        out.send_note(self.led, led::OFF);
    }

    pub fn start_blinking(&mut self, out: &mut Output, scheduler: &mut dyn Scheduler) {
        if self.state == LedState::Blinking {
            return;
        }

        self.state = LedState::Blinking;
        self.generation = self.generation.wrapping_add(1);
        self.toggle(out, scheduler);
    }

    /// Handles an expired blink timer.
    ///
    /// Ticks from a cancelled run are dropped.
    pub fn blink_tick(&mut self, generation: u32, out: &mut Output, scheduler: &mut dyn Scheduler) {
        if self.state != LedState::Blinking || generation != self.generation {
            log::trace!("Dropping stale blink tick for {:#04x}", self.note);
            return;
        }

        self.toggle(out, scheduler);
    }

    fn toggle(&mut self, out: &mut Output, scheduler: &mut dyn Scheduler) {
        self.is_led_on = !self.is_led_on;
        out.send_note(self.led, if self.is_led_on { led::ON } else { led::OFF });

        scheduler.schedule(
            BLINK_INTERVAL,
            Task::Blink {
                note: self.note,
                generation: self.generation,
            },
        );
    }

    pub fn show(&mut self, state: LedState, out: &mut Output, scheduler: &mut dyn Scheduler) {
        match state {
            LedState::Off => self.stop_blinking(out),
            LedState::Solid => self.light_up(out),
            LedState::Blinking => self.start_blinking(out, scheduler),
        }
    }

    pub fn handle(&mut self, ctx: &mut Context<'_>) -> Result<(), daw::Error> {
        match self.command {
            Some(command) => command.run(&mut *ctx.daw),
            None => Ok(()),
        }
    }

    pub fn render(&mut self, ctx: &mut Context<'_>) {
        match self.feedback {
            None => (),
            Some(Feedback::TrackName) => {
                if let Some(name) = ctx.track.take_name() {
                    if !name.is_empty() {
                        ctx.daw.show_notification(&name);
                    }
                }
            }
            Some(feedback) => {
                if let Some(state) = feedback.led_state(&*ctx.daw) {
                    self.show(state, &mut *ctx.out, &mut *ctx.scheduler);
                }
            }
        }
    }
}
