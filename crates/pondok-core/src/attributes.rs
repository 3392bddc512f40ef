//! Attribute records — the structured inputs to the scoring rules.
//!
//! Each subject has at most one record per dimension. Every field is
//! optional: a missing record or field contributes the minimum of its
//! component, never an error. The store normalises raw column text into the
//! [`crate::vocab`] enums when it reads these records; anything it cannot
//! recognise arrives here as `None`.

use serde::{Deserialize, Serialize};

use crate::vocab::{
  AksesAir, AksesJalan, AksesLayanan, Akreditasi, Jenjang, JenisAtap,
  JenisDinding, JenisLantai, Kelayakan, KondisiBangunan, Kurikulum, Prestasi,
  StatusKepemilikan, StatusPembayaran, SumberAir, SumberBiaya,
};

// ─── Pesantren records ───────────────────────────────────────────────────────

/// Physical plant of the institution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fisik {
  pub kondisi_bangunan: Option<KondisiBangunan>,
  pub sanitasi:         Option<Kelayakan>,
  pub sumber_air:       Option<SumberAir>,
  pub kualitas_air:     Option<Kelayakan>,
  pub keamanan:         Option<Kelayakan>,
  pub lantai:           Option<JenisLantai>,
  pub atap:             Option<JenisAtap>,
  pub dinding:          Option<JenisDinding>,
  /// Room-density ratio: santri sleeping in one dormitory room.
  pub santri_per_kamar: Option<i64>,
}

/// Facilities available to santri.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fasilitas {
  pub asrama:       Option<Kelayakan>,
  pub ruang_kelas:  Option<Kelayakan>,
  pub internet:     Option<bool>,
  pub transportasi: Option<bool>,
  pub akses_jalan:  Option<AksesJalan>,
  pub dapur:        Option<bool>,
  pub mck:          Option<bool>,
}

/// Educational standing of the institution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pendidikan {
  pub akreditasi: Option<Akreditasi>,
  pub kurikulum:  Option<Kurikulum>,
  /// Descriptive level grouping; stored and exposed, never weighted.
  pub jenjang:    Option<Jenjang>,
  /// Teacher-to-student ratio expressed as santri per guru.
  pub santri_per_guru: Option<i64>,
  pub persen_guru_bersertifikat: Option<i64>,
  pub prestasi:   Option<Prestasi>,
}

/// All attribute records of one pesantren. Also the upsert payload: records
/// present here are written, absent ones are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PesantrenAttributes {
  pub fisik:      Option<Fisik>,
  pub fasilitas:  Option<Fasilitas>,
  pub pendidikan: Option<Pendidikan>,
}

/// A pesantren together with its attribute records, as read by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct PesantrenBundle {
  pub pesantren:  crate::subject::Pesantren,
  pub attributes: PesantrenAttributes,
}

// ─── Santri records ──────────────────────────────────────────────────────────

/// Household income.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ekonomi {
  /// Monthly household income in rupiah.
  pub penghasilan_bulanan: Option<i64>,
  pub jumlah_tanggungan:   Option<i64>,
}

/// Housing conditions of the santri's household.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rumah {
  pub status_kepemilikan: Option<StatusKepemilikan>,
  pub akses_air:          Option<AksesAir>,
  pub dinding:            Option<JenisDinding>,
  pub atap:               Option<JenisAtap>,
  pub lantai:             Option<JenisLantai>,
}

/// Durable assets owned by the household.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aset {
  pub kendaraan:  Option<bool>,
  pub tanah:      Option<bool>,
  pub ternak:     Option<bool>,
  pub elektronik: Option<bool>,
}

/// How schooling is funded and whether payments are current.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pembiayaan {
  pub sumber_biaya:      Option<SumberBiaya>,
  pub status_pembayaran: Option<StatusPembayaran>,
}

/// Household health situation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kesehatan {
  /// Someone in the household lives with a chronic illness.
  pub penyakit_kronis: Option<bool>,
  pub akses_layanan:   Option<AksesLayanan>,
}

/// Government social-aid receipt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bansos {
  /// Number of aid programmes the household currently receives.
  pub jumlah_program: Option<i64>,
}

/// All attribute records of one santri. Doubles as the upsert payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SantriAttributes {
  pub ekonomi:    Option<Ekonomi>,
  pub rumah:      Option<Rumah>,
  pub aset:       Option<Aset>,
  pub pembiayaan: Option<Pembiayaan>,
  pub kesehatan:  Option<Kesehatan>,
  pub bansos:     Option<Bansos>,
}

/// A santri together with its attribute records, as read by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct SantriBundle {
  pub santri:     crate::subject::Santri,
  pub attributes: SantriAttributes,
}
