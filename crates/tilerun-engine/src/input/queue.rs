use crate::api::types::FrameInput;

/// Logical keys the simulation reacts to. Hosts map physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// Raw input events pushed by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Key events pushed by the host since the last sample, oldest first.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn take(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

/// Held-key state folded from events, sampled into one [`FrameInput`] per frame.
///
/// Left/right are continuous: they stay asserted while held. Jump is an edge:
/// it is reported for the frame in which the key went down, and a repeated
/// `KeyDown(Jump)` while already held (keyboard auto-repeat) is ignored.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    jump_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this frame's events and sample the intents.
    pub fn apply(&mut self, events: &[InputEvent]) -> FrameInput {
        let mut jump_pressed = false;
        for event in events {
            match *event {
                InputEvent::KeyDown(Key::Left) => self.left = true,
                InputEvent::KeyUp(Key::Left) => self.left = false,
                InputEvent::KeyDown(Key::Right) => self.right = true,
                InputEvent::KeyUp(Key::Right) => self.right = false,
                InputEvent::KeyDown(Key::Jump) => {
                    if !self.jump_held {
                        jump_pressed = true;
                    }
                    self.jump_held = true;
                }
                InputEvent::KeyUp(Key::Jump) => self.jump_held = false,
            }
        }
        FrameInput {
            move_left: self.left,
            move_right: self.right,
            jump_pressed,
        }
    }

    /// Drain the queue and sample.
    pub fn sample(&mut self, queue: &mut InputQueue) -> FrameInput {
        let events = queue.take();
        self.apply(&events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_keeps_push_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown(Key::Left));
        q.push(InputEvent::KeyUp(Key::Left));
        assert_eq!(
            q.take(),
            vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyUp(Key::Left)]
        );
        assert!(q.take().is_empty());
    }

    #[test]
    fn movement_is_held_across_frames() {
        let mut state = InputState::new();
        let first = state.apply(&[InputEvent::KeyDown(Key::Right)]);
        assert!(first.move_right);
        let second = state.apply(&[]);
        assert!(second.move_right);
        let third = state.apply(&[InputEvent::KeyUp(Key::Right)]);
        assert!(!third.move_right);
    }

    #[test]
    fn jump_fires_once_per_press() {
        let mut state = InputState::new();
        assert!(state.apply(&[InputEvent::KeyDown(Key::Jump)]).jump_pressed);
        // Held, no new event.
        assert!(!state.apply(&[]).jump_pressed);
        // Auto-repeat while held.
        assert!(!state.apply(&[InputEvent::KeyDown(Key::Jump)]).jump_pressed);
        // Release and press again in the same frame.
        let input = state.apply(&[InputEvent::KeyUp(Key::Jump), InputEvent::KeyDown(Key::Jump)]);
        assert!(input.jump_pressed);
    }

    #[test]
    fn sample_drains_queue() {
        let mut q = InputQueue::new();
        let mut state = InputState::new();
        q.push(InputEvent::KeyDown(Key::Left));
        q.push(InputEvent::KeyDown(Key::Right));
        let input = state.sample(&mut q);
        assert!(q.take().is_empty());
        assert!(input.move_left && input.move_right);
    }
}
