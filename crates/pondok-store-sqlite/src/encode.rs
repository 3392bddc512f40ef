//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, vocabulary values as their canonical tokens. Decoding
//! vocabulary columns is tolerant: the `parse` constructors fold case and
//! known synonyms, and anything unrecognised comes back as `None` so the
//! rules see the worst bracket. Identity columns (ids, timestamps, derived
//! categories) decode strictly — they are written by this crate and a
//! mismatch means corruption.

use chrono::{DateTime, Utc};
use pondok_core::{
  map::{PesantrenMapRow, SantriMapRow},
  score::{PesantrenScore, SantriScore},
  subject::{GeoPoint, Pesantren, Santri, Wilayah},
  vocab::{
    JenisKelamin, KategoriKelayakan, KategoriKemiskinan, StatusMukim,
  },
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Tolerant decode for vocabulary columns: unknown tokens become `None`.
pub fn decode_vocab<T>(
  raw: Option<String>,
  parse: fn(&str) -> Option<T>,
) -> Option<T> {
  raw.as_deref().and_then(parse)
}

fn geo_point(lat: Option<f64>, lon: Option<f64>) -> Option<GeoPoint> {
  match (lat, lon) {
    (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
    _ => None,
  }
}

// ─── Subject rows ────────────────────────────────────────────────────────────

/// Raw strings read directly from a `pesantren` row.
pub struct RawPesantren {
  pub pesantren_id:    String,
  pub nama:            String,
  pub nomor_statistik: Option<String>,
  pub provinsi:        Option<String>,
  pub kabupaten:       Option<String>,
  pub kecamatan:       Option<String>,
  pub desa:            Option<String>,
  pub latitude:        Option<f64>,
  pub longitude:       Option<f64>,
  pub created_at:      String,
}

impl RawPesantren {
  pub const COLUMNS: &'static str = "pesantren_id, nama, nomor_statistik, \
     provinsi, kabupaten, kecamatan, desa, latitude, longitude, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      pesantren_id:    row.get(0)?,
      nama:            row.get(1)?,
      nomor_statistik: row.get(2)?,
      provinsi:        row.get(3)?,
      kabupaten:       row.get(4)?,
      kecamatan:       row.get(5)?,
      desa:            row.get(6)?,
      latitude:        row.get(7)?,
      longitude:       row.get(8)?,
      created_at:      row.get(9)?,
    })
  }

  pub fn into_pesantren(self) -> Result<Pesantren> {
    Ok(Pesantren {
      pesantren_id:    decode_uuid(&self.pesantren_id)?,
      nama:            self.nama,
      nomor_statistik: self.nomor_statistik,
      wilayah:         Wilayah {
        provinsi:  self.provinsi,
        kabupaten: self.kabupaten,
        kecamatan: self.kecamatan,
        desa:      self.desa,
      },
      lokasi:          geo_point(self.latitude, self.longitude),
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `santri` row.
pub struct RawSantri {
  pub santri_id:     String,
  pub pesantren_id:  String,
  pub nama:          String,
  pub jenis_kelamin: Option<String>,
  pub status_mukim:  Option<String>,
  pub latitude:      Option<f64>,
  pub longitude:     Option<f64>,
  pub created_at:    String,
}

impl RawSantri {
  pub const COLUMNS: &'static str = "santri_id, pesantren_id, nama, \
     jenis_kelamin, status_mukim, latitude, longitude, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      santri_id:     row.get(0)?,
      pesantren_id:  row.get(1)?,
      nama:          row.get(2)?,
      jenis_kelamin: row.get(3)?,
      status_mukim:  row.get(4)?,
      latitude:      row.get(5)?,
      longitude:     row.get(6)?,
      created_at:    row.get(7)?,
    })
  }

  pub fn into_santri(self) -> Result<Santri> {
    Ok(Santri {
      santri_id:     decode_uuid(&self.santri_id)?,
      pesantren_id:  decode_uuid(&self.pesantren_id)?,
      nama:          self.nama,
      jenis_kelamin: decode_vocab(self.jenis_kelamin, JenisKelamin::parse),
      status_mukim:  decode_vocab(self.status_mukim, StatusMukim::parse),
      lokasi:        geo_point(self.latitude, self.longitude),
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

// ─── Score rows ──────────────────────────────────────────────────────────────

pub struct RawPesantrenScore {
  pub skor_id:            String,
  pub pesantren_id:       String,
  pub skor_fisik:         i64,
  pub skor_fasilitas:     i64,
  pub skor_pendidikan:    i64,
  pub skor_total:         i64,
  pub kategori_kelayakan: String,
  pub metode:             String,
  pub version:            String,
  pub calculated_at:      String,
}

impl RawPesantrenScore {
  pub const COLUMNS: &'static str = "skor_id, pesantren_id, skor_fisik, \
     skor_fasilitas, skor_pendidikan, skor_total, kategori_kelayakan, \
     metode, version, calculated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      skor_id:            row.get(0)?,
      pesantren_id:       row.get(1)?,
      skor_fisik:         row.get(2)?,
      skor_fasilitas:     row.get(3)?,
      skor_pendidikan:    row.get(4)?,
      skor_total:         row.get(5)?,
      kategori_kelayakan: row.get(6)?,
      metode:             row.get(7)?,
      version:            row.get(8)?,
      calculated_at:      row.get(9)?,
    })
  }

  pub fn into_score(self) -> Result<PesantrenScore> {
    let kategori = KategoriKelayakan::parse(&self.kategori_kelayakan)
      .ok_or_else(|| {
        Error::Decode(format!(
          "unknown kategori_kelayakan: {:?}",
          self.kategori_kelayakan
        ))
      })?;

    Ok(PesantrenScore {
      skor_id:            decode_uuid(&self.skor_id)?,
      pesantren_id:       decode_uuid(&self.pesantren_id)?,
      skor_fisik:         self.skor_fisik,
      skor_fasilitas:     self.skor_fasilitas,
      skor_pendidikan:    self.skor_pendidikan,
      skor_total:         self.skor_total,
      kategori_kelayakan: kategori,
      metode:             self.metode,
      version:            self.version,
      calculated_at:      decode_dt(&self.calculated_at)?,
    })
  }
}

pub struct RawSantriScore {
  pub skor_id:             String,
  pub santri_id:           String,
  pub skor_ekonomi:        i64,
  pub skor_rumah:          i64,
  pub skor_aset:           i64,
  pub skor_pembiayaan:     i64,
  pub skor_kesehatan:      i64,
  pub skor_bansos:         i64,
  pub skor_total:          i64,
  pub kategori_kemiskinan: String,
  pub metode:              String,
  pub version:             String,
  pub calculated_at:       String,
}

impl RawSantriScore {
  pub const COLUMNS: &'static str = "skor_id, santri_id, skor_ekonomi, \
     skor_rumah, skor_aset, skor_pembiayaan, skor_kesehatan, skor_bansos, \
     skor_total, kategori_kemiskinan, metode, version, calculated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      skor_id:             row.get(0)?,
      santri_id:           row.get(1)?,
      skor_ekonomi:        row.get(2)?,
      skor_rumah:          row.get(3)?,
      skor_aset:           row.get(4)?,
      skor_pembiayaan:     row.get(5)?,
      skor_kesehatan:      row.get(6)?,
      skor_bansos:         row.get(7)?,
      skor_total:          row.get(8)?,
      kategori_kemiskinan: row.get(9)?,
      metode:              row.get(10)?,
      version:             row.get(11)?,
      calculated_at:       row.get(12)?,
    })
  }

  pub fn into_score(self) -> Result<SantriScore> {
    let kategori = KategoriKemiskinan::parse(&self.kategori_kemiskinan)
      .ok_or_else(|| {
        Error::Decode(format!(
          "unknown kategori_kemiskinan: {:?}",
          self.kategori_kemiskinan
        ))
      })?;

    Ok(SantriScore {
      skor_id:             decode_uuid(&self.skor_id)?,
      santri_id:           decode_uuid(&self.santri_id)?,
      skor_ekonomi:        self.skor_ekonomi,
      skor_rumah:          self.skor_rumah,
      skor_aset:           self.skor_aset,
      skor_pembiayaan:     self.skor_pembiayaan,
      skor_kesehatan:      self.skor_kesehatan,
      skor_bansos:         self.skor_bansos,
      skor_total:          self.skor_total,
      kategori_kemiskinan: kategori,
      metode:              self.metode,
      version:             self.version,
      calculated_at:       decode_dt(&self.calculated_at)?,
    })
  }
}

// ─── Map rows ────────────────────────────────────────────────────────────────

pub struct RawPesantrenMap {
  pub pesantren_id:       String,
  pub nama:               String,
  pub provinsi:           Option<String>,
  pub kabupaten:          Option<String>,
  pub kecamatan:          Option<String>,
  pub desa:               Option<String>,
  pub latitude:           f64,
  pub longitude:          f64,
  pub skor_terakhir:      i64,
  pub kategori_kelayakan: String,
  pub updated_at:         String,
}

impl RawPesantrenMap {
  pub const COLUMNS: &'static str = "pesantren_id, nama, provinsi, \
     kabupaten, kecamatan, desa, latitude, longitude, skor_terakhir, \
     kategori_kelayakan, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      pesantren_id:       row.get(0)?,
      nama:               row.get(1)?,
      provinsi:           row.get(2)?,
      kabupaten:          row.get(3)?,
      kecamatan:          row.get(4)?,
      desa:               row.get(5)?,
      latitude:           row.get(6)?,
      longitude:          row.get(7)?,
      skor_terakhir:      row.get(8)?,
      kategori_kelayakan: row.get(9)?,
      updated_at:         row.get(10)?,
    })
  }

  pub fn into_row(self) -> Result<PesantrenMapRow> {
    let kategori = KategoriKelayakan::parse(&self.kategori_kelayakan)
      .ok_or_else(|| {
        Error::Decode(format!(
          "unknown kategori_kelayakan: {:?}",
          self.kategori_kelayakan
        ))
      })?;

    Ok(PesantrenMapRow {
      pesantren_id:       decode_uuid(&self.pesantren_id)?,
      nama:               self.nama,
      wilayah:            Wilayah {
        provinsi:  self.provinsi,
        kabupaten: self.kabupaten,
        kecamatan: self.kecamatan,
        desa:      self.desa,
      },
      latitude:           self.latitude,
      longitude:          self.longitude,
      skor_terakhir:      self.skor_terakhir,
      kategori_kelayakan: kategori,
      updated_at:         decode_dt(&self.updated_at)?,
    })
  }
}

pub struct RawSantriMap {
  pub santri_id:           String,
  pub pesantren_id:        String,
  pub nama:                String,
  pub provinsi:            Option<String>,
  pub kabupaten:           Option<String>,
  pub kecamatan:           Option<String>,
  pub desa:                Option<String>,
  pub latitude:            f64,
  pub longitude:           f64,
  pub skor_terakhir:       i64,
  pub kategori_kemiskinan: String,
  pub updated_at:          String,
}

impl RawSantriMap {
  pub const COLUMNS: &'static str = "santri_id, pesantren_id, nama, \
     provinsi, kabupaten, kecamatan, desa, latitude, longitude, \
     skor_terakhir, kategori_kemiskinan, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      santri_id:           row.get(0)?,
      pesantren_id:        row.get(1)?,
      nama:                row.get(2)?,
      provinsi:            row.get(3)?,
      kabupaten:           row.get(4)?,
      kecamatan:           row.get(5)?,
      desa:                row.get(6)?,
      latitude:            row.get(7)?,
      longitude:           row.get(8)?,
      skor_terakhir:       row.get(9)?,
      kategori_kemiskinan: row.get(10)?,
      updated_at:          row.get(11)?,
    })
  }

  pub fn into_row(self) -> Result<SantriMapRow> {
    let kategori = KategoriKemiskinan::parse(&self.kategori_kemiskinan)
      .ok_or_else(|| {
        Error::Decode(format!(
          "unknown kategori_kemiskinan: {:?}",
          self.kategori_kemiskinan
        ))
      })?;

    Ok(SantriMapRow {
      santri_id:           decode_uuid(&self.santri_id)?,
      pesantren_id:        decode_uuid(&self.pesantren_id)?,
      nama:                self.nama,
      wilayah:             Wilayah {
        provinsi:  self.provinsi,
        kabupaten: self.kabupaten,
        kecamatan: self.kecamatan,
        desa:      self.desa,
      },
      latitude:            self.latitude,
      longitude:           self.longitude,
      skor_terakhir:       self.skor_terakhir,
      kategori_kemiskinan: kategori,
      updated_at:          decode_dt(&self.updated_at)?,
    })
  }
}
