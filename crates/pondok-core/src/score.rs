//! Persisted score records and their draft inputs.
//!
//! A score row is created on first computation and updated in place on
//! every recomputation. The store assigns `skor_id` on insert (and never
//! afterwards) and stamps `calculated_at` on every write, so the engine
//! hands over a `New*Score` draft rather than a full row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vocab::{KategoriKelayakan, KategoriKemiskinan};

// ─── Pesantren ───────────────────────────────────────────────────────────────

/// The eligibility score row for one pesantren. Zero or one per subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PesantrenScore {
  pub skor_id:            Uuid,
  pub pesantren_id:       Uuid,
  pub skor_fisik:         i64,
  pub skor_fasilitas:     i64,
  pub skor_pendidikan:    i64,
  pub skor_total:         i64,
  pub kategori_kelayakan: KategoriKelayakan,
  pub metode:             String,
  pub version:            String,
  pub calculated_at:      DateTime<Utc>,
}

/// Input to [`crate::store::RegistryStore::save_pesantren_score`].
#[derive(Debug, Clone)]
pub struct NewPesantrenScore {
  pub pesantren_id:       Uuid,
  pub skor_fisik:         i64,
  pub skor_fasilitas:     i64,
  pub skor_pendidikan:    i64,
  pub skor_total:         i64,
  pub kategori_kelayakan: KategoriKelayakan,
  pub metode:             String,
  pub version:            String,
}

// ─── Santri ──────────────────────────────────────────────────────────────────

/// The poverty score row for one santri. Zero or one per subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantriScore {
  pub skor_id:             Uuid,
  pub santri_id:           Uuid,
  pub skor_ekonomi:        i64,
  pub skor_rumah:          i64,
  pub skor_aset:           i64,
  pub skor_pembiayaan:     i64,
  pub skor_kesehatan:      i64,
  pub skor_bansos:         i64,
  pub skor_total:          i64,
  pub kategori_kemiskinan: KategoriKemiskinan,
  pub metode:              String,
  pub version:             String,
  pub calculated_at:       DateTime<Utc>,
}

/// Input to [`crate::store::RegistryStore::save_santri_score`].
#[derive(Debug, Clone)]
pub struct NewSantriScore {
  pub santri_id:           Uuid,
  pub skor_ekonomi:        i64,
  pub skor_rumah:          i64,
  pub skor_aset:           i64,
  pub skor_pembiayaan:     i64,
  pub skor_kesehatan:      i64,
  pub skor_bansos:         i64,
  pub skor_total:          i64,
  pub kategori_kemiskinan: KategoriKemiskinan,
  pub metode:              String,
  pub version:             String,
}
