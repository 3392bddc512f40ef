//! Pure scoring rules.
//!
//! Each rule maps one attribute record to a bounded integer sub-score.
//! Rules are deterministic, side-effect free, and total: a missing record,
//! a missing field, or an unrecognised value contributes the minimum of its
//! component. Numeric inputs outside the expected brackets take the nearest
//! bracket. The per-dimension maxima are published as constants; component
//! caps sum exactly to each maximum.

pub mod pesantren;
pub mod santri;
