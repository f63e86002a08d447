//! Hover/grab highlight.
//!
//! Two flags per interactable, each with its own strength. The tint is the base colour pushed
//! towards white (hover) and towards cyan (grab). Only the flags are stored; the colour is
//! always recomputed from them.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    Hover,
    Grab,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct HighlightSignal {
    pub target: Entity,
    pub kind: HighlightKind,
    pub active: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Highlight {
    pub base: Color,
    pub hover: bool,
    pub grab: bool,
}

impl Highlight {
    const HOVER_STRENGTH: f32 = 0.35;
    const GRAB_STRENGTH: f32 = 0.6;

    pub fn new(base: Color) -> Self {
        Self {
            base,
            hover: false,
            grab: false,
        }
    }

    pub fn set(&mut self, kind: HighlightKind, active: bool) {
        match kind {
            HighlightKind::Hover => self.hover = active,
            HighlightKind::Grab => self.grab = active,
        }
    }

    pub fn tint(&self) -> Color {
        let mut out = self.base.to_srgba();

        if self.hover {
            let h = Self::HOVER_STRENGTH;
            out.red += (1.0 - out.red) * h;
            out.green += (1.0 - out.green) * h;
            out.blue += (1.0 - out.blue) * h;
        }
        if self.grab {
            let g = Self::GRAB_STRENGTH;
            out.red *= 1.0 - g;
            out.green += (1.0 - out.green) * g;
            out.blue += (1.0 - out.blue) * g;
        }

        out.into()
    }
}

pub fn apply_highlight_signals(
    mut reader: MessageReader<HighlightSignal>,
    mut q: Query<(&mut Highlight, &mut Sprite)>,
) {
    for ev in reader.read() {
        let Ok((mut hl, mut sprite)) = q.get_mut(ev.target) else {
            continue;
        };
        hl.set(ev.kind, ev.active);
        sprite.color = hl.tint();
    }
}
