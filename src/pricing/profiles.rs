//! Steel-profile geometry for barrier components.
//!
//! Each component is cold-formed from a flat galvanized strip. Its weight is
//! the strip area times thickness times steel density, plus zinc on both faces.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::ComponentKind;

/// Mass of a 1 m x 1 m steel sheet per mm of thickness (7850 kg/m3)
pub const STEEL_KG_PER_M2_PER_MM: Decimal = dec!(7.85);

/// Galvanized faces per strip
pub const COATED_FACES: Decimal = dec!(2);

const MM_PER_M: Decimal = dec!(1000);
const G_PER_KG: Decimal = dec!(1000);

/// Flat-strip geometry of a formed profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileGeometry {
    /// Girth of the cross-section, i.e. width of the strip before forming
    pub developed_width_mm: Decimal,
    /// Set for parts sold in a single standard length
    pub fixed_length_mm: Option<Decimal>,
}

/// W-beam rail: 483 mm girth, 4318 mm panel (4 m effective + lap)
pub const W_BEAM: ProfileGeometry = ProfileGeometry {
    developed_width_mm: dec!(483),
    fixed_length_mm: Some(dec!(4318)),
};

/// Lipped C-post 150 x 75 x 25
pub const POST: ProfileGeometry = ProfileGeometry {
    developed_width_mm: dec!(350),
    fixed_length_mm: None,
};

/// Channel spacer block 150 x 75
pub const SPACER: ProfileGeometry = ProfileGeometry {
    developed_width_mm: dec!(300),
    fixed_length_mm: None,
};

pub fn geometry(kind: ComponentKind) -> ProfileGeometry {
    match kind {
        ComponentKind::WBeam => W_BEAM,
        ComponentKind::Post => POST,
        ComponentKind::Spacer => SPACER,
    }
}

/// Helpers return `None` when a value exceeds the `Decimal` range.
impl ProfileGeometry {
    /// One-face area of the strip in m2
    pub fn strip_area_m2(&self, length_mm: Decimal) -> Option<Decimal> {
        (self.developed_width_mm / MM_PER_M).checked_mul(length_mm / MM_PER_M)
    }

    /// Uncoated steel weight in kg
    pub fn black_weight_kg(&self, length_mm: Decimal, thickness_mm: Decimal) -> Option<Decimal> {
        self.strip_area_m2(length_mm)?
            .checked_mul(thickness_mm)?
            .checked_mul(STEEL_KG_PER_M2_PER_MM)
    }

    /// Zinc weight in kg for a coating mass given per face in g/m2
    pub fn zinc_weight_kg(&self, length_mm: Decimal, coating_gsm: Decimal) -> Option<Decimal> {
        let grams = self
            .strip_area_m2(length_mm)?
            .checked_mul(COATED_FACES)?
            .checked_mul(coating_gsm)?;
        Some(grams / G_PER_KG)
    }
}
