//! Scripted input timeline.
//!
//! A script is a comma-separated list of `<frames>:<keys>` segments, where
//! keys is any combination of `L`, `R` and `J`, or `-` for nothing held.
//! `L`/`R` are held for the whole segment. `J` presses jump on the first
//! frame of the segment and holds it until the segment ends.
//!
//! ```text
//! 60:-,120:R,1:RJ,40:R,30:L
//! ```

use tilerun_engine::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Held {
    left: bool,
    right: bool,
    jump: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    frames: u32,
    held: Held,
}

/// Parsed script, expanded lazily into per-frame key events.
#[derive(Debug, Clone)]
pub struct InputScript {
    segments: Vec<Segment>,
}

impl InputScript {
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (count, keys) = part
                .split_once(':')
                .ok_or_else(|| format!("segment '{}' is missing ':'", part))?;
            let frames: u32 = count
                .trim()
                .parse()
                .map_err(|e| format!("bad frame count in '{}': {}", part, e))?;
            let mut held = Held::default();
            for ch in keys.trim().chars() {
                match ch.to_ascii_uppercase() {
                    'L' => held.left = true,
                    'R' => held.right = true,
                    'J' => held.jump = true,
                    '-' => {}
                    other => return Err(format!("unknown key '{}' in '{}'", other, part)),
                }
            }
            segments.push(Segment { frames, held });
        }
        if segments.is_empty() {
            return Err("script is empty".to_string());
        }
        Ok(Self { segments })
    }

    /// Total number of frames covered by the script.
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| s.frames as u64).sum()
    }

    /// Key events to deliver before each frame, in order.
    pub fn frame_events(&self) -> Vec<Vec<InputEvent>> {
        let mut frames = Vec::with_capacity(self.total_frames() as usize);
        let mut current = Held::default();
        for segment in &self.segments {
            for i in 0..segment.frames {
                let mut events = Vec::new();
                diff_key(&mut events, Key::Left, current.left, segment.held.left);
                diff_key(&mut events, Key::Right, current.right, segment.held.right);
                if segment.held.jump {
                    // Every J segment starts with a fresh press.
                    if i == 0 {
                        if current.jump {
                            events.push(InputEvent::KeyUp(Key::Jump));
                        }
                        events.push(InputEvent::KeyDown(Key::Jump));
                    }
                } else if current.jump {
                    events.push(InputEvent::KeyUp(Key::Jump));
                }
                current = segment.held;
                frames.push(events);
            }
        }
        frames
    }
}

fn diff_key(events: &mut Vec<InputEvent>, key: Key, was: bool, now: bool) {
    match (was, now) {
        (false, true) => events.push(InputEvent::KeyDown(key)),
        (true, false) => events.push(InputEvent::KeyUp(key)),
        _ => {}
    }
}
