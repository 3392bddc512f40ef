//! Subject envelopes — the registry rows scores are computed for.
//!
//! A subject holds identity, display, and location metadata. Everything the
//! scoring rules consume lives in the attribute records
//! ([`crate::attributes`]), which are stored and fetched separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vocab::{JenisKelamin, StatusMukim};

/// Indonesian administrative labels, province down to village.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wilayah {
  pub provinsi:  Option<String>,
  pub kabupaten: Option<String>,
  pub kecamatan: Option<String>,
  pub desa:      Option<String>,
}

/// A WGS84 point. Subjects without one are absent from the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub latitude:  f64,
  pub longitude: f64,
}

// ─── Pesantren ───────────────────────────────────────────────────────────────

/// An Islamic boarding school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pesantren {
  pub pesantren_id:    Uuid,
  pub nama:            String,
  /// National registration number, when the institution has one.
  pub nomor_statistik: Option<String>,
  pub wilayah:         Wilayah,
  pub lokasi:          Option<GeoPoint>,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`crate::store::RegistryStore::add_pesantren`].
/// `pesantren_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPesantren {
  pub nama:            String,
  pub nomor_statistik: Option<String>,
  #[serde(default)]
  pub wilayah:         Wilayah,
  pub lokasi:          Option<GeoPoint>,
}

// ─── Santri ──────────────────────────────────────────────────────────────────

/// A student enrolled at a pesantren.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Santri {
  pub santri_id:     Uuid,
  pub pesantren_id:  Uuid,
  pub nama:          String,
  pub jenis_kelamin: Option<JenisKelamin>,
  pub status_mukim:  Option<StatusMukim>,
  pub lokasi:        Option<GeoPoint>,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::RegistryStore::add_santri`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewSantri {
  pub pesantren_id:  Uuid,
  pub nama:          String,
  pub jenis_kelamin: Option<JenisKelamin>,
  pub status_mukim:  Option<StatusMukim>,
  pub lokasi:        Option<GeoPoint>,
}
