//! Touch controls: a virtual joystick on the left half of the viewport and
//! FIRE / WPN buttons in the lower right.
//!
//! The joystick thrusts once deflected past 30% of its radius; pushing right
//! turns right, pushing left (or down-left) turns left, straight up or down
//! only thrusts. Any new touch also requests a restart, which the simulation
//! honours only after game over. While the host reports game over, a touch
//! only restarts and grabs no control, so the new run starts idle.

use glam::Vec2;

use crate::Bounds;
use crate::sim::TickInput;

pub const JOYSTICK_RADIUS: f32 = 60.0;
/// Deflection (fraction of radius) needed before the stick does anything
pub const JOYSTICK_DEADZONE: f32 = 0.3;
pub const FIRE_BUTTON_RADIUS: f32 = 45.0;
pub const WEAPON_BUTTON_RADIUS: f32 = 35.0;

/// Touch identifier supplied by the host
pub type TouchId = u64;

/// Virtual joystick anchored where the touch began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joystick {
    pub touch: TouchId,
    pub base: Vec2,
    /// Knob position, clamped to the joystick radius
    pub knob: Vec2,
    /// Deflection as a fraction of the radius (0-1)
    pub deflection: f32,
}

impl Joystick {
    fn new(touch: TouchId, base: Vec2) -> Self {
        Self {
            touch,
            base,
            knob: base,
            deflection: 0.0,
        }
    }

    fn drag_to(&mut self, pos: Vec2) {
        let offset = pos - self.base;
        let dist = offset.length();
        self.knob = self.base + offset.clamp_length_max(JOYSTICK_RADIUS);
        self.deflection = (dist / JOYSTICK_RADIUS).min(1.0);
    }

    fn is_engaged(&self) -> bool {
        self.deflection > JOYSTICK_DEADZONE
    }

    /// Turning direction from the knob angle: (left, right)
    fn turn(&self) -> (bool, bool) {
        if !self.is_engaged() {
            return (false, false);
        }
        let offset = self.knob - self.base;
        let deg = offset.y.atan2(offset.x).to_degrees();
        if (-45.0..=45.0).contains(&deg) {
            (false, true)
        } else if (deg > -135.0 && deg < -45.0) || (deg > 45.0 && deg < 135.0) {
            (false, false)
        } else {
            (true, false)
        }
    }
}

/// A round on-screen button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub center: Vec2,
    pub radius: f32,
    /// Touch currently holding the button
    pub touch: Option<TouchId>,
}

impl Button {
    fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) < self.radius
    }

    pub fn is_pressed(&self) -> bool {
        self.touch.is_some()
    }
}

/// Multi-touch state for the on-screen controls
#[derive(Debug, Clone)]
pub struct TouchControls {
    viewport: Bounds,
    pub joystick: Option<Joystick>,
    pub fire: Button,
    pub weapon: Button,
    restart_requested: bool,
    game_over: bool,
}

impl TouchControls {
    pub fn new(viewport: Bounds) -> Self {
        let mut controls = Self {
            viewport,
            joystick: None,
            fire: Button {
                center: Vec2::ZERO,
                radius: FIRE_BUTTON_RADIUS,
                touch: None,
            },
            weapon: Button {
                center: Vec2::ZERO,
                radius: WEAPON_BUTTON_RADIUS,
                touch: None,
            },
            restart_requested: false,
            game_over: false,
        };
        controls.resize(viewport);
        controls
    }

    /// Re-anchor the buttons to the viewport's lower-right corner
    pub fn resize(&mut self, viewport: Bounds) {
        self.viewport = viewport;
        self.fire.center = Vec2::new(viewport.width - 80.0, viewport.height - 80.0);
        self.weapon.center = Vec2::new(viewport.width - 180.0, viewport.height - 60.0);
    }

    /// Mirror the simulation phase; call once per frame before routing touches
    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    pub fn touch_start(&mut self, id: TouchId, pos: Vec2) {
        self.restart_requested = true;
        if self.game_over {
            return;
        }

        if pos.x < self.viewport.width / 2.0 {
            if self.joystick.is_none() {
                self.joystick = Some(Joystick::new(id, pos));
            }
            return;
        }

        for button in [&mut self.fire, &mut self.weapon] {
            if button.touch.is_none() && button.contains(pos) {
                button.touch = Some(id);
            }
        }
    }

    pub fn touch_move(&mut self, id: TouchId, pos: Vec2) {
        if let Some(stick) = self.joystick.as_mut().filter(|s| s.touch == id) {
            stick.drag_to(pos);
        }
    }

    /// Release a touch (touchend or touchcancel)
    pub fn touch_end(&mut self, id: TouchId) {
        if self.joystick.is_some_and(|s| s.touch == id) {
            self.joystick = None;
        }
        for button in [&mut self.fire, &mut self.weapon] {
            if button.touch == Some(id) {
                button.touch = None;
            }
        }
    }

    /// Controls for the next tick. A pending restart request is consumed.
    pub fn take_input(&mut self) -> TickInput {
        let (turn_left, turn_right) = self.joystick.map(|s| s.turn()).unwrap_or_default();
        let input = TickInput {
            turn_left,
            turn_right,
            thrust: self.joystick.is_some_and(|s| s.is_engaged()),
            fire: self.fire.is_pressed(),
            cycle_weapon: self.weapon.is_pressed(),
            restart: self.restart_requested,
            ..Default::default()
        };
        self.restart_requested = false;
        input
    }
}
