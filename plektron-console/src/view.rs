//! The bench view
//!
//! One boxed frame showing every sensor channel:
//!
//! ```text
//! +=============================================================================+
//! |                          * Plektron Sensor Bench *                          |
//! +=============================================================================+
//! | Curr Fret:  16/19                 | Keys Pressed  3:[ ] 2:[x] 1:[ ] 0:[x]   |
//! +-----------------------------------+-----------------------------------------+
//! | RotEnc Value:  64   RotEnc SW:[x] | Potentiometer: 127                      |
//! +-----------------------------------+-----------------------------------------+
//! | IMU x: 01 y:255 z: 63  Lefty:[ ]  | Ultrasonic Distance:  57 cm             |
//! +=============================================================================+
//! ```
//!
//! Rendering fills a [`Screen`] row by row; the serial writer decides
//! when a frame actually goes out.

use core::fmt::Write;

use heapless::String;

use plektron_core::decode::{FRET_COUNT, STRUM_KEY_COUNT};
use plektron_core::state::SensorState;

use crate::screen::{Screen, SCREEN_COLS};

/// Form feed; a terminal repaints in place when a frame starts with it
pub const FRAME_CLEAR: u8 = 0x0C;

/// Width of the left cell in the split rows
const LEFT_CELL: usize = 35;

const HEAVY_RULE: &str =
    "+=============================================================================+";
const SPLIT_RULE: &str =
    "+-----------------------------------+-----------------------------------------+";
const TITLE_ROW: &str =
    "|                          * Plektron Sensor Bench *                          |";

/// Draw the full bench view into `screen`
pub fn render(state: &SensorState, screen: &mut Screen) {
    screen.set_line(0, HEAVY_RULE);
    screen.set_line(1, TITLE_ROW);
    screen.set_line(2, HEAVY_RULE);
    screen.set_line(3, &fret_keys_row(state));
    screen.set_line(4, SPLIT_RULE);
    screen.set_line(5, &encoder_pot_row(state));
    screen.set_line(6, SPLIT_RULE);
    screen.set_line(7, &imu_distance_row(state));
    screen.set_line(8, HEAVY_RULE);
}

fn fret_keys_row(state: &SensorState) -> String<SCREEN_COLS> {
    let mut row = String::new();
    let _ = write!(row, "| Curr Fret: {}/{}", Pad3(state.fret()), FRET_COUNT);
    pad_to(&mut row, 1 + LEFT_CELL);
    let _ = row.push_str("| Keys Pressed  ");
    let keys = state.strum_keys();
    for key in (0..STRUM_KEY_COUNT).rev() {
        let _ = write!(row, "{}:[{}]", key, mark(keys.is_pressed(key)));
        if key > 0 {
            let _ = row.push(' ');
        }
    }
    close_row(row)
}

fn encoder_pot_row(state: &SensorState) -> String<SCREEN_COLS> {
    let mut row = String::new();
    let _ = write!(
        row,
        "| RotEnc Value: {}   RotEnc SW:[{}]",
        Pad3(state.encoder_position()),
        mark(state.encoder_switch())
    );
    pad_to(&mut row, 1 + LEFT_CELL);
    let _ = write!(row, "| Potentiometer: {}", Pad3(state.potentiometer()));
    close_row(row)
}

fn imu_distance_row(state: &SensorState) -> String<SCREEN_COLS> {
    let mut row = String::new();
    let imu = state.imu();
    let _ = write!(
        row,
        "| IMU x:{} y:{} z:{}  Lefty:[{}]",
        Pad3(imu.x),
        Pad3(imu.y),
        Pad3(imu.z),
        mark(state.is_lefty())
    );
    pad_to(&mut row, 1 + LEFT_CELL);
    let _ = write!(row, "| Ultrasonic Distance: {} cm", Pad3(state.distance_cm()));
    close_row(row)
}

/// Three-wide numeric field in the style the bench has always used:
/// space for a missing hundreds digit, zero for a missing tens digit
/// (`" 05"`, `" 42"`, `"123"`)
struct Pad3(u8);

impl core::fmt::Display for Pad3 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0 < 100 {
            f.write_char(' ')?;
        }
        if self.0 < 10 {
            f.write_char('0')?;
        }
        write!(f, "{}", self.0)
    }
}

fn mark(on: bool) -> char {
    if on {
        'x'
    } else {
        ' '
    }
}

fn pad_to(row: &mut String<SCREEN_COLS>, col: usize) {
    while row.len() < col {
        let _ = row.push(' ');
    }
}

fn close_row(mut row: String<SCREEN_COLS>) -> String<SCREEN_COLS> {
    pad_to(&mut row, SCREEN_COLS - 1);
    let _ = row.push('|');
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use plektron_core::config::SensorConfig;
    use plektron_core::state::ImuSample;

    fn rendered(state: &SensorState) -> Screen {
        let mut screen = Screen::new();
        render(state, &mut screen);
        screen
    }

    #[test]
    fn test_every_row_is_exactly_screen_width() {
        let state = SensorState::new(SensorConfig::default());
        let screen = rendered(&state);
        for line in screen.lines() {
            assert_eq!(line.len(), SCREEN_COLS, "row: {:?}", line);
        }
    }

    #[test]
    fn test_frame_rows() {
        let state = SensorState::new(SensorConfig::default());
        let screen = rendered(&state);
        assert_eq!(screen.get_line(0), Some(HEAVY_RULE));
        assert_eq!(screen.get_line(2), Some(HEAVY_RULE));
        assert_eq!(screen.get_line(8), Some(HEAVY_RULE));
        assert_eq!(screen.get_line(4), Some(SPLIT_RULE));
        assert_eq!(screen.get_line(6), Some(SPLIT_RULE));
        assert!(screen.get_line(1).unwrap().contains("* Plektron Sensor Bench *"));
    }

    #[test]
    fn test_fret_field() {
        let mut state = SensorState::new(SensorConfig::default());
        state.update_fret(0, 0, 0x08);
        let screen = rendered(&state);
        assert!(screen.get_line(3).unwrap().contains("Curr Fret:  16/19"));
    }

    #[test]
    fn test_strum_checkboxes_highest_first() {
        let mut state = SensorState::new(SensorConfig::default());
        // Pads 0 and 2: QT2120 key 1 hits pad 2, QT1070 key 3 hits pad 0.
        state.update_strum_keys(0x02, 0, 0x08);
        let screen = rendered(&state);
        assert!(screen
            .get_line(3)
            .unwrap()
            .contains("3:[ ] 2:[x] 1:[ ] 0:[x]"));
    }

    #[test]
    fn test_encoder_fields() {
        let mut state = SensorState::new(SensorConfig::default());
        state.update_encoder_position(64);
        state.update_encoder_switch(true);
        let screen = rendered(&state);
        let row = screen.get_line(5).unwrap();
        assert!(row.contains("RotEnc Value:  64"));
        assert!(row.contains("RotEnc SW:[x]"));
    }

    #[test]
    fn test_pot_and_distance_fields() {
        let mut state = SensorState::new(SensorConfig::default());
        state.update_potentiometer(0);
        state.update_distance(25);
        let screen = rendered(&state);
        assert!(screen.get_line(5).unwrap().contains("Potentiometer: 127"));
        assert!(screen.get_line(7).unwrap().contains("Ultrasonic Distance:  25 cm"));
    }

    #[test]
    fn test_imu_and_lefty_fields() {
        let mut state = SensorState::new(SensorConfig::default());
        state.update_imu(ImuSample { x: 1, y: 255, z: 63 });
        state.set_lefty(true);
        let screen = rendered(&state);
        let row = screen.get_line(7).unwrap();
        assert!(row.contains("IMU x: 01 y:255 z: 63"));
        assert!(row.contains("Lefty:[x]"));
    }

    #[test]
    fn test_pad3_formatting_rule() {
        let mut out: String<4> = String::new();
        let _ = write!(out, "{}", Pad3(5));
        assert_eq!(out.as_str(), " 05");
        out.clear();
        let _ = write!(out, "{}", Pad3(42));
        assert_eq!(out.as_str(), " 42");
        out.clear();
        let _ = write!(out, "{}", Pad3(123));
        assert_eq!(out.as_str(), "123");
        out.clear();
        let _ = write!(out, "{}", Pad3(0));
        assert_eq!(out.as_str(), " 00");
    }
}
