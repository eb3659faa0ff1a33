//! Unit conversion from Altium measurement units to internal units.
//!
//! Altium stores PCB lengths as `i32` counts of 1/10000 mil. Internal units
//! are nanometres, so one Altium unit is 2.54 nm. The result is snapped to a
//! 10 nm grid: this makes increments of 0.05 mil and 0.01 µm convert without
//! loss.
//!
//! Schematic coordinates use a whole value in units of 10 mil plus a
//! separate `_FRAC` field in units of 1/10000 mil.

/// Number of Altium units per mil.
pub const ALTIUM_UNITS_PER_MIL: f64 = 10_000.0;

/// Nanometres per Altium unit.
const NM_PER_ALTIUM_UNIT: f64 = 2.54;

/// Largest input magnitude that still fits an `i32` after scaling.
const INT_LIMIT: f64 = (i32::MAX as f64 - 10.0) / NM_PER_ALTIUM_UNIT;

/// Round half away from zero, the way integer coordinates are rounded.
#[inline]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Convert a value in Altium units to nanometres.
///
/// The input is clamped so the scaled value cannot overflow, rounded to the
/// nearest nanometre and then to the nearest multiple of 10 nm.
pub fn convert_to_kicad_unit(value: f64) -> i32 {
    let iu = round_to_i32(value.clamp(-INT_LIMIT, INT_LIMIT) * NM_PER_ALTIUM_UNIT);
    round_to_i32(iu as f64 / 10.0) * 10
}

/// Convert a schematic whole/fraction pair to nanometres.
///
/// `whole` is in units of 10 mil, `frac` in units of 1/10000 mil. The two
/// are combined into mils and then scaled through [`convert_to_kicad_unit`].
pub fn sch_unit_to_kicad(whole: i32, frac: i32) -> i32 {
    let mils = whole as f64 * 10.0 + frac as f64 / ALTIUM_UNITS_PER_MIL;
    convert_to_kicad_unit(mils * ALTIUM_UNITS_PER_MIL)
}

/// Convert nanometres back to Altium units.
pub fn kicad_unit_to_altium(value: i32) -> f64 {
    value as f64 / NM_PER_ALTIUM_UNIT
}
