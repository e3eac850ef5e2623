//! Die temperature sensor conversion

/// Temperature sensitivity in LSB/°C
pub const TEMPERATURE_SENSITIVITY: f32 = 333.87;

/// Temperature reported when the output equals the room temperature offset
pub const ROOM_TEMPERATURE_CELSIUS: f32 = 21.0;

/// Convert a raw `TEMP_OUT` value to degrees Celsius
///
/// `°C = (TEMP_OUT - room_temperature_offset) / sensitivity + 21`, with
/// `sensitivity` normally [`TEMPERATURE_SENSITIVITY`].
#[must_use]
pub fn to_celsius(raw: i16, sensitivity: f32, room_temperature_offset: f32) -> f32 {
    (f32::from(raw) - room_temperature_offset) / sensitivity + ROOM_TEMPERATURE_CELSIUS
}
