//! [`SqliteStore`] — the SQLite implementation of [`RegistryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use pondok_core::{
  attributes::{
    Aset, Bansos, Ekonomi, Fasilitas, Fisik, Kesehatan, Pembiayaan,
    Pendidikan, PesantrenAttributes, PesantrenBundle, Rumah,
    SantriAttributes, SantriBundle,
  },
  map::{
    PesantrenMapRow, PesantrenRegionAggregate, SantriMapRow,
    SantriRegionAggregate,
  },
  score::{NewPesantrenScore, NewSantriScore, PesantrenScore, SantriScore},
  store::RegistryStore,
  subject::{NewPesantren, NewSantri, Pesantren, Santri},
  vocab::{
    AksesAir, AksesJalan, AksesLayanan, Akreditasi, Jenjang, JenisAtap,
    JenisDinding, JenisLantai, Kelayakan, KondisiBangunan, Kurikulum,
    Prestasi, StatusKepemilikan, StatusPembayaran, SumberAir, SumberBiaya,
  },
};

use crate::{
  encode::{
    RawPesantren, RawPesantrenMap, RawPesantrenScore, RawSantri, RawSantriMap,
    RawSantriScore, decode_uuid, decode_vocab, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pondok registry store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Test seam: run raw SQL to set up legacy-shaped rows.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Attribute row helpers ───────────────────────────────────────────────────
//
// These run inside `conn.call` closures, so they speak `rusqlite::Result`.
// Reads are tolerant of legacy free text; writes store canonical tokens.

fn read_fisik(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Fisik>> {
  conn
    .query_row(
      "SELECT kondisi_bangunan, sanitasi, sumber_air, kualitas_air, keamanan,
              lantai, atap, dinding, santri_per_kamar
       FROM pesantren_fisik WHERE pesantren_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Fisik {
          kondisi_bangunan: decode_vocab(row.get(0)?, KondisiBangunan::parse),
          sanitasi:         decode_vocab(row.get(1)?, Kelayakan::parse),
          sumber_air:       decode_vocab(row.get(2)?, SumberAir::parse),
          kualitas_air:     decode_vocab(row.get(3)?, Kelayakan::parse),
          keamanan:         decode_vocab(row.get(4)?, Kelayakan::parse),
          lantai:           decode_vocab(row.get(5)?, JenisLantai::parse),
          atap:             decode_vocab(row.get(6)?, JenisAtap::parse),
          dinding:          decode_vocab(row.get(7)?, JenisDinding::parse),
          santri_per_kamar: row.get(8)?,
        })
      },
    )
    .optional()
}

fn write_fisik(
  conn: &rusqlite::Connection,
  id: &str,
  f: &Fisik,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO pesantren_fisik (
       pesantren_id, kondisi_bangunan, sanitasi, sumber_air, kualitas_air,
       keamanan, lantai, atap, dinding, santri_per_kamar
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
     ON CONFLICT(pesantren_id) DO UPDATE SET
       kondisi_bangunan = excluded.kondisi_bangunan,
       sanitasi         = excluded.sanitasi,
       sumber_air       = excluded.sumber_air,
       kualitas_air     = excluded.kualitas_air,
       keamanan         = excluded.keamanan,
       lantai           = excluded.lantai,
       atap             = excluded.atap,
       dinding          = excluded.dinding,
       santri_per_kamar = excluded.santri_per_kamar",
    rusqlite::params![
      id,
      f.kondisi_bangunan.map(KondisiBangunan::token),
      f.sanitasi.map(Kelayakan::token),
      f.sumber_air.map(SumberAir::token),
      f.kualitas_air.map(Kelayakan::token),
      f.keamanan.map(Kelayakan::token),
      f.lantai.map(JenisLantai::token),
      f.atap.map(JenisAtap::token),
      f.dinding.map(JenisDinding::token),
      f.santri_per_kamar,
    ],
  )?;
  Ok(())
}

fn read_fasilitas(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Fasilitas>> {
  conn
    .query_row(
      "SELECT asrama, ruang_kelas, internet, transportasi, akses_jalan,
              dapur, mck
       FROM pesantren_fasilitas WHERE pesantren_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Fasilitas {
          asrama:       decode_vocab(row.get(0)?, Kelayakan::parse),
          ruang_kelas:  decode_vocab(row.get(1)?, Kelayakan::parse),
          internet:     row.get(2)?,
          transportasi: row.get(3)?,
          akses_jalan:  decode_vocab(row.get(4)?, AksesJalan::parse),
          dapur:        row.get(5)?,
          mck:          row.get(6)?,
        })
      },
    )
    .optional()
}

fn write_fasilitas(
  conn: &rusqlite::Connection,
  id: &str,
  f: &Fasilitas,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO pesantren_fasilitas (
       pesantren_id, asrama, ruang_kelas, internet, transportasi,
       akses_jalan, dapur, mck
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(pesantren_id) DO UPDATE SET
       asrama       = excluded.asrama,
       ruang_kelas  = excluded.ruang_kelas,
       internet     = excluded.internet,
       transportasi = excluded.transportasi,
       akses_jalan  = excluded.akses_jalan,
       dapur        = excluded.dapur,
       mck          = excluded.mck",
    rusqlite::params![
      id,
      f.asrama.map(Kelayakan::token),
      f.ruang_kelas.map(Kelayakan::token),
      f.internet,
      f.transportasi,
      f.akses_jalan.map(AksesJalan::token),
      f.dapur,
      f.mck,
    ],
  )?;
  Ok(())
}

fn read_pendidikan(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Pendidikan>> {
  conn
    .query_row(
      "SELECT akreditasi, kurikulum, jenjang, santri_per_guru,
              persen_guru_bersertifikat, prestasi
       FROM pesantren_pendidikan WHERE pesantren_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Pendidikan {
          akreditasi: decode_vocab(row.get(0)?, Akreditasi::parse),
          kurikulum:  decode_vocab(row.get(1)?, Kurikulum::parse),
          jenjang:    decode_vocab(row.get(2)?, Jenjang::parse),
          santri_per_guru: row.get(3)?,
          persen_guru_bersertifikat: row.get(4)?,
          prestasi:   decode_vocab(row.get(5)?, Prestasi::parse),
        })
      },
    )
    .optional()
}

fn write_pendidikan(
  conn: &rusqlite::Connection,
  id: &str,
  p: &Pendidikan,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO pesantren_pendidikan (
       pesantren_id, akreditasi, kurikulum, jenjang, santri_per_guru,
       persen_guru_bersertifikat, prestasi
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(pesantren_id) DO UPDATE SET
       akreditasi                = excluded.akreditasi,
       kurikulum                 = excluded.kurikulum,
       jenjang                   = excluded.jenjang,
       santri_per_guru           = excluded.santri_per_guru,
       persen_guru_bersertifikat = excluded.persen_guru_bersertifikat,
       prestasi                  = excluded.prestasi",
    rusqlite::params![
      id,
      p.akreditasi.map(Akreditasi::token),
      p.kurikulum.map(Kurikulum::token),
      p.jenjang.map(Jenjang::token),
      p.santri_per_guru,
      p.persen_guru_bersertifikat,
      p.prestasi.map(Prestasi::token),
    ],
  )?;
  Ok(())
}

fn read_ekonomi(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Ekonomi>> {
  conn
    .query_row(
      "SELECT penghasilan_bulanan, jumlah_tanggungan
       FROM santri_ekonomi WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Ekonomi {
          penghasilan_bulanan: row.get(0)?,
          jumlah_tanggungan:   row.get(1)?,
        })
      },
    )
    .optional()
}

fn write_ekonomi(
  conn: &rusqlite::Connection,
  id: &str,
  e: &Ekonomi,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_ekonomi (santri_id, penghasilan_bulanan, jumlah_tanggungan)
     VALUES (?1, ?2, ?3)
     ON CONFLICT(santri_id) DO UPDATE SET
       penghasilan_bulanan = excluded.penghasilan_bulanan,
       jumlah_tanggungan   = excluded.jumlah_tanggungan",
    rusqlite::params![id, e.penghasilan_bulanan, e.jumlah_tanggungan],
  )?;
  Ok(())
}

fn read_rumah(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Rumah>> {
  conn
    .query_row(
      "SELECT status_kepemilikan, akses_air, dinding, atap, lantai
       FROM santri_rumah WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Rumah {
          status_kepemilikan: decode_vocab(row.get(0)?, StatusKepemilikan::parse),
          akses_air:          decode_vocab(row.get(1)?, AksesAir::parse),
          dinding:            decode_vocab(row.get(2)?, JenisDinding::parse),
          atap:               decode_vocab(row.get(3)?, JenisAtap::parse),
          lantai:             decode_vocab(row.get(4)?, JenisLantai::parse),
        })
      },
    )
    .optional()
}

fn write_rumah(
  conn: &rusqlite::Connection,
  id: &str,
  r: &Rumah,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_rumah (santri_id, status_kepemilikan, akses_air, dinding, atap, lantai)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(santri_id) DO UPDATE SET
       status_kepemilikan = excluded.status_kepemilikan,
       akses_air          = excluded.akses_air,
       dinding            = excluded.dinding,
       atap               = excluded.atap,
       lantai             = excluded.lantai",
    rusqlite::params![
      id,
      r.status_kepemilikan.map(StatusKepemilikan::token),
      r.akses_air.map(AksesAir::token),
      r.dinding.map(JenisDinding::token),
      r.atap.map(JenisAtap::token),
      r.lantai.map(JenisLantai::token),
    ],
  )?;
  Ok(())
}

fn read_aset(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Aset>> {
  conn
    .query_row(
      "SELECT kendaraan, tanah, ternak, elektronik
       FROM santri_aset WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Aset {
          kendaraan:  row.get(0)?,
          tanah:      row.get(1)?,
          ternak:     row.get(2)?,
          elektronik: row.get(3)?,
        })
      },
    )
    .optional()
}

fn write_aset(
  conn: &rusqlite::Connection,
  id: &str,
  a: &Aset,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_aset (santri_id, kendaraan, tanah, ternak, elektronik)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(santri_id) DO UPDATE SET
       kendaraan  = excluded.kendaraan,
       tanah      = excluded.tanah,
       ternak     = excluded.ternak,
       elektronik = excluded.elektronik",
    rusqlite::params![id, a.kendaraan, a.tanah, a.ternak, a.elektronik],
  )?;
  Ok(())
}

fn read_pembiayaan(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Pembiayaan>> {
  conn
    .query_row(
      "SELECT sumber_biaya, status_pembayaran
       FROM santri_pembiayaan WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Pembiayaan {
          sumber_biaya:      decode_vocab(row.get(0)?, SumberBiaya::parse),
          status_pembayaran: decode_vocab(row.get(1)?, StatusPembayaran::parse),
        })
      },
    )
    .optional()
}

fn write_pembiayaan(
  conn: &rusqlite::Connection,
  id: &str,
  p: &Pembiayaan,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_pembiayaan (santri_id, sumber_biaya, status_pembayaran)
     VALUES (?1, ?2, ?3)
     ON CONFLICT(santri_id) DO UPDATE SET
       sumber_biaya      = excluded.sumber_biaya,
       status_pembayaran = excluded.status_pembayaran",
    rusqlite::params![
      id,
      p.sumber_biaya.map(SumberBiaya::token),
      p.status_pembayaran.map(StatusPembayaran::token),
    ],
  )?;
  Ok(())
}

fn read_kesehatan(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Kesehatan>> {
  conn
    .query_row(
      "SELECT penyakit_kronis, akses_layanan
       FROM santri_kesehatan WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(Kesehatan {
          penyakit_kronis: row.get(0)?,
          akses_layanan:   decode_vocab(row.get(1)?, AksesLayanan::parse),
        })
      },
    )
    .optional()
}

fn write_kesehatan(
  conn: &rusqlite::Connection,
  id: &str,
  k: &Kesehatan,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_kesehatan (santri_id, penyakit_kronis, akses_layanan)
     VALUES (?1, ?2, ?3)
     ON CONFLICT(santri_id) DO UPDATE SET
       penyakit_kronis = excluded.penyakit_kronis,
       akses_layanan   = excluded.akses_layanan",
    rusqlite::params![
      id,
      k.penyakit_kronis,
      k.akses_layanan.map(AksesLayanan::token),
    ],
  )?;
  Ok(())
}

fn read_bansos(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<Bansos>> {
  conn
    .query_row(
      "SELECT jumlah_program FROM santri_bansos WHERE santri_id = ?1",
      rusqlite::params![id],
      |row| Ok(Bansos { jumlah_program: row.get(0)? }),
    )
    .optional()
}

fn write_bansos(
  conn: &rusqlite::Connection,
  id: &str,
  b: &Bansos,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO santri_bansos (santri_id, jumlah_program)
     VALUES (?1, ?2)
     ON CONFLICT(santri_id) DO UPDATE SET
       jumlah_program = excluded.jumlah_program",
    rusqlite::params![id, b.jumlah_program],
  )?;
  Ok(())
}

// ─── RegistryStore impl ──────────────────────────────────────────────────────

impl RegistryStore for SqliteStore {
  type Error = Error;

  // ── Pesantren subjects ────────────────────────────────────────────────────

  async fn add_pesantren(&self, input: NewPesantren) -> Result<Pesantren> {
    let pesantren = Pesantren {
      pesantren_id:    Uuid::new_v4(),
      nama:            input.nama,
      nomor_statistik: input.nomor_statistik,
      wilayah:         input.wilayah,
      lokasi:          input.lokasi,
      created_at:      Utc::now(),
    };

    let id_str = encode_uuid(pesantren.pesantren_id);
    let at_str = encode_dt(pesantren.created_at);
    let p = pesantren.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO pesantren (
             pesantren_id, nama, nomor_statistik, provinsi, kabupaten,
             kecamatan, desa, latitude, longitude, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            p.nama,
            p.nomor_statistik,
            p.wilayah.provinsi,
            p.wilayah.kabupaten,
            p.wilayah.kecamatan,
            p.wilayah.desa,
            p.lokasi.map(|g| g.latitude),
            p.lokasi.map(|g| g.longitude),
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(pesantren)
  }

  async fn get_pesantren(&self, id: Uuid) -> Result<Option<Pesantren>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPesantren> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM pesantren WHERE pesantren_id = ?1",
                RawPesantren::COLUMNS
              ),
              rusqlite::params![id_str],
              RawPesantren::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPesantren::into_pesantren).transpose()
  }

  async fn list_pesantren(&self) -> Result<Vec<Pesantren>> {
    let raws: Vec<RawPesantren> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM pesantren ORDER BY nama",
          RawPesantren::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawPesantren::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPesantren::into_pesantren).collect()
  }

  async fn delete_pesantren(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM pesantren WHERE pesantren_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  // ── Santri subjects ───────────────────────────────────────────────────────

  async fn add_santri(&self, input: NewSantri) -> Result<Santri> {
    let santri = Santri {
      santri_id:     Uuid::new_v4(),
      pesantren_id:  input.pesantren_id,
      nama:          input.nama,
      jenis_kelamin: input.jenis_kelamin,
      status_mukim:  input.status_mukim,
      lokasi:        input.lokasi,
      created_at:    Utc::now(),
    };

    let id_str = encode_uuid(santri.santri_id);
    let pesantren_id_str = encode_uuid(santri.pesantren_id);
    let at_str = encode_dt(santri.created_at);
    let s = santri.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let parent: Option<i64> = conn
          .query_row(
            "SELECT 1 FROM pesantren WHERE pesantren_id = ?1",
            rusqlite::params![pesantren_id_str],
            |row| row.get(0),
          )
          .optional()?;
        if parent.is_none() {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO santri (
             santri_id, pesantren_id, nama, jenis_kelamin, status_mukim,
             latitude, longitude, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            pesantren_id_str,
            s.nama,
            s.jenis_kelamin.map(|j| j.token()),
            s.status_mukim.map(|m| m.token()),
            s.lokasi.map(|g| g.latitude),
            s.lokasi.map(|g| g.longitude),
            at_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::SubjectNotFound(santri.pesantren_id));
    }

    Ok(santri)
  }

  async fn get_santri(&self, id: Uuid) -> Result<Option<Santri>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSantri> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM santri WHERE santri_id = ?1",
                RawSantri::COLUMNS
              ),
              rusqlite::params![id_str],
              RawSantri::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSantri::into_santri).transpose()
  }

  async fn list_santri(&self, pesantren_id: Option<Uuid>) -> Result<Vec<Santri>> {
    let filter = pesantren_id.map(encode_uuid);

    let raws: Vec<RawSantri> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(pid) = filter {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM santri WHERE pesantren_id = ?1 ORDER BY nama",
            RawSantri::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![pid], RawSantri::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM santri ORDER BY nama",
            RawSantri::COLUMNS
          ))?;
          stmt
            .query_map([], RawSantri::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSantri::into_santri).collect()
  }

  async fn delete_santri(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM santri WHERE santri_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  // ── Coordinates ───────────────────────────────────────────────────────────

  async fn set_pesantren_lokasi(
    &self,
    id: Uuid,
    lokasi: Option<pondok_core::subject::GeoPoint>,
  ) -> Result<bool> {
    let id_str = encode_uuid(id);

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let n = tx.execute(
          "UPDATE pesantren SET latitude = ?2, longitude = ?3
           WHERE pesantren_id = ?1",
          rusqlite::params![
            id_str,
            lokasi.map(|g| g.latitude),
            lokasi.map(|g| g.longitude),
          ],
        )?;

        if lokasi.is_none() {
          tx.execute(
            "DELETE FROM pesantren_map WHERE pesantren_id = ?1",
            rusqlite::params![id_str],
          )?;
        }

        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    Ok(updated)
  }

  async fn set_santri_lokasi(
    &self,
    id: Uuid,
    lokasi: Option<pondok_core::subject::GeoPoint>,
  ) -> Result<bool> {
    let id_str = encode_uuid(id);

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let n = tx.execute(
          "UPDATE santri SET latitude = ?2, longitude = ?3
           WHERE santri_id = ?1",
          rusqlite::params![
            id_str,
            lokasi.map(|g| g.latitude),
            lokasi.map(|g| g.longitude),
          ],
        )?;

        if lokasi.is_none() {
          tx.execute(
            "DELETE FROM santri_map WHERE santri_id = ?1",
            rusqlite::params![id_str],
          )?;
        }

        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    Ok(updated)
  }

  // ── Attribute records ─────────────────────────────────────────────────────

  async fn put_pesantren_attributes(
    &self,
    id: Uuid,
    attrs: PesantrenAttributes,
  ) -> Result<()> {
    let id_str = encode_uuid(id);

    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
          .query_row(
            "SELECT 1 FROM pesantren WHERE pesantren_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        if exists.is_none() {
          return Ok(false);
        }

        if let Some(fisik) = &attrs.fisik {
          write_fisik(&tx, &id_str, fisik)?;
        }
        if let Some(fasilitas) = &attrs.fasilitas {
          write_fasilitas(&tx, &id_str, fasilitas)?;
        }
        if let Some(pendidikan) = &attrs.pendidikan {
          write_pendidikan(&tx, &id_str, pendidikan)?;
        }

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::SubjectNotFound(id));
    }
    Ok(())
  }

  async fn put_santri_attributes(
    &self,
    id: Uuid,
    attrs: SantriAttributes,
  ) -> Result<()> {
    let id_str = encode_uuid(id);

    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
          .query_row(
            "SELECT 1 FROM santri WHERE santri_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        if exists.is_none() {
          return Ok(false);
        }

        if let Some(ekonomi) = &attrs.ekonomi {
          write_ekonomi(&tx, &id_str, ekonomi)?;
        }
        if let Some(rumah) = &attrs.rumah {
          write_rumah(&tx, &id_str, rumah)?;
        }
        if let Some(aset) = &attrs.aset {
          write_aset(&tx, &id_str, aset)?;
        }
        if let Some(pembiayaan) = &attrs.pembiayaan {
          write_pembiayaan(&tx, &id_str, pembiayaan)?;
        }
        if let Some(kesehatan) = &attrs.kesehatan {
          write_kesehatan(&tx, &id_str, kesehatan)?;
        }
        if let Some(bansos) = &attrs.bansos {
          write_bansos(&tx, &id_str, bansos)?;
        }

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::SubjectNotFound(id));
    }
    Ok(())
  }

  // ── Attribute readers ─────────────────────────────────────────────────────

  async fn load_pesantren_bundle(&self, id: Uuid) -> Result<PesantrenBundle> {
    let id_str = encode_uuid(id);

    let loaded: Option<(RawPesantren, PesantrenAttributes)> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!(
              "SELECT {} FROM pesantren WHERE pesantren_id = ?1",
              RawPesantren::COLUMNS
            ),
            rusqlite::params![id_str],
            RawPesantren::from_row,
          )
          .optional()?;

        let Some(raw) = raw else { return Ok(None) };

        let attributes = PesantrenAttributes {
          fisik:      read_fisik(conn, &id_str)?,
          fasilitas:  read_fasilitas(conn, &id_str)?,
          pendidikan: read_pendidikan(conn, &id_str)?,
        };

        Ok(Some((raw, attributes)))
      })
      .await?;

    let Some((raw, attributes)) = loaded else {
      return Err(Error::SubjectNotFound(id));
    };

    Ok(PesantrenBundle { pesantren: raw.into_pesantren()?, attributes })
  }

  async fn load_santri_bundle(&self, id: Uuid) -> Result<SantriBundle> {
    let id_str = encode_uuid(id);

    let loaded: Option<(RawSantri, SantriAttributes)> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!(
              "SELECT {} FROM santri WHERE santri_id = ?1",
              RawSantri::COLUMNS
            ),
            rusqlite::params![id_str],
            RawSantri::from_row,
          )
          .optional()?;

        let Some(raw) = raw else { return Ok(None) };

        let attributes = SantriAttributes {
          ekonomi:    read_ekonomi(conn, &id_str)?,
          rumah:      read_rumah(conn, &id_str)?,
          aset:       read_aset(conn, &id_str)?,
          pembiayaan: read_pembiayaan(conn, &id_str)?,
          kesehatan:  read_kesehatan(conn, &id_str)?,
          bansos:     read_bansos(conn, &id_str)?,
        };

        Ok(Some((raw, attributes)))
      })
      .await?;

    let Some((raw, attributes)) = loaded else {
      return Err(Error::SubjectNotFound(id));
    };

    Ok(SantriBundle { santri: raw.into_santri()?, attributes })
  }

  // ── Score persistence & map projection ────────────────────────────────────

  async fn save_pesantren_score(
    &self,
    draft: NewPesantrenScore,
  ) -> Result<PesantrenScore> {
    let calculated_at = Utc::now();
    let id_str = encode_uuid(draft.pesantren_id);
    let fresh_skor_id = encode_uuid(Uuid::new_v4());
    let at_str = encode_dt(calculated_at);
    let kategori = draft.kategori_kelayakan.token();
    let metode = draft.metode.clone();
    let version = draft.version.clone();
    let (skor_fisik, skor_fasilitas, skor_pendidikan, skor_total) = (
      draft.skor_fisik,
      draft.skor_fasilitas,
      draft.skor_pendidikan,
      draft.skor_total,
    );

    let skor_id: Option<String> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // The subject is re-read inside the write transaction so the map
        // row reflects exactly the committed state.
        let subject: Option<(
          String,
          Option<String>,
          Option<String>,
          Option<String>,
          Option<String>,
          Option<f64>,
          Option<f64>,
        )> = tx
          .query_row(
            "SELECT nama, provinsi, kabupaten, kecamatan, desa,
                    latitude, longitude
             FROM pesantren WHERE pesantren_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
              ))
            },
          )
          .optional()?;

        let Some((nama, provinsi, kabupaten, kecamatan, desa, lat, lon)) =
          subject
        else {
          return Ok(None);
        };

        tx.execute(
          "INSERT INTO pesantren_skor (
             skor_id, pesantren_id, skor_fisik, skor_fasilitas,
             skor_pendidikan, skor_total, kategori_kelayakan, metode,
             version, calculated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
           ON CONFLICT(pesantren_id) DO UPDATE SET
             skor_fisik         = excluded.skor_fisik,
             skor_fasilitas     = excluded.skor_fasilitas,
             skor_pendidikan    = excluded.skor_pendidikan,
             skor_total         = excluded.skor_total,
             kategori_kelayakan = excluded.kategori_kelayakan,
             metode             = excluded.metode,
             version            = excluded.version,
             calculated_at      = excluded.calculated_at",
          rusqlite::params![
            fresh_skor_id,
            id_str,
            skor_fisik,
            skor_fasilitas,
            skor_pendidikan,
            skor_total,
            kategori,
            metode,
            version,
            at_str,
          ],
        )?;

        match (lat, lon) {
          (Some(latitude), Some(longitude)) => {
            tx.execute(
              "INSERT INTO pesantren_map (
                 pesantren_id, nama, provinsi, kabupaten, kecamatan, desa,
                 latitude, longitude, skor_terakhir, kategori_kelayakan,
                 updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
               ON CONFLICT(pesantren_id) DO UPDATE SET
                 nama               = excluded.nama,
                 provinsi           = excluded.provinsi,
                 kabupaten          = excluded.kabupaten,
                 kecamatan          = excluded.kecamatan,
                 desa               = excluded.desa,
                 latitude           = excluded.latitude,
                 longitude          = excluded.longitude,
                 skor_terakhir      = excluded.skor_terakhir,
                 kategori_kelayakan = excluded.kategori_kelayakan,
                 updated_at         = excluded.updated_at",
              rusqlite::params![
                id_str, nama, provinsi, kabupaten, kecamatan, desa,
                latitude, longitude, skor_total, kategori, at_str,
              ],
            )?;
          }
          _ => {
            tx.execute(
              "DELETE FROM pesantren_map WHERE pesantren_id = ?1",
              rusqlite::params![id_str],
            )?;
          }
        }

        let skor_id: String = tx.query_row(
          "SELECT skor_id FROM pesantren_skor WHERE pesantren_id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(Some(skor_id))
      })
      .await?;

    let Some(skor_id) = skor_id else {
      return Err(Error::SubjectNotFound(draft.pesantren_id));
    };

    Ok(PesantrenScore {
      skor_id:            decode_uuid(&skor_id)?,
      pesantren_id:       draft.pesantren_id,
      skor_fisik:         draft.skor_fisik,
      skor_fasilitas:     draft.skor_fasilitas,
      skor_pendidikan:    draft.skor_pendidikan,
      skor_total:         draft.skor_total,
      kategori_kelayakan: draft.kategori_kelayakan,
      metode:             draft.metode,
      version:            draft.version,
      calculated_at,
    })
  }

  async fn save_santri_score(
    &self,
    draft: NewSantriScore,
  ) -> Result<SantriScore> {
    let calculated_at = Utc::now();
    let id_str = encode_uuid(draft.santri_id);
    let fresh_skor_id = encode_uuid(Uuid::new_v4());
    let at_str = encode_dt(calculated_at);
    let kategori = draft.kategori_kemiskinan.token();
    let metode = draft.metode.clone();
    let version = draft.version.clone();
    let (
      skor_ekonomi,
      skor_rumah,
      skor_aset,
      skor_pembiayaan,
      skor_kesehatan,
      skor_bansos,
      skor_total,
    ) = (
      draft.skor_ekonomi,
      draft.skor_rumah,
      draft.skor_aset,
      draft.skor_pembiayaan,
      draft.skor_kesehatan,
      draft.skor_bansos,
      draft.skor_total,
    );

    let skor_id: Option<String> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Labels for the map row come from the parent pesantren.
        let subject: Option<(
          String,
          String,
          Option<f64>,
          Option<f64>,
          Option<String>,
          Option<String>,
          Option<String>,
          Option<String>,
        )> = tx
          .query_row(
            "SELECT s.nama, s.pesantren_id, s.latitude, s.longitude,
                    p.provinsi, p.kabupaten, p.kecamatan, p.desa
             FROM santri s
             JOIN pesantren p ON p.pesantren_id = s.pesantren_id
             WHERE s.santri_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
              ))
            },
          )
          .optional()?;

        let Some((
          nama,
          pesantren_id,
          lat,
          lon,
          provinsi,
          kabupaten,
          kecamatan,
          desa,
        )) = subject
        else {
          return Ok(None);
        };

        tx.execute(
          "INSERT INTO santri_skor (
             skor_id, santri_id, skor_ekonomi, skor_rumah, skor_aset,
             skor_pembiayaan, skor_kesehatan, skor_bansos, skor_total,
             kategori_kemiskinan, metode, version, calculated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
           ON CONFLICT(santri_id) DO UPDATE SET
             skor_ekonomi        = excluded.skor_ekonomi,
             skor_rumah          = excluded.skor_rumah,
             skor_aset           = excluded.skor_aset,
             skor_pembiayaan     = excluded.skor_pembiayaan,
             skor_kesehatan      = excluded.skor_kesehatan,
             skor_bansos         = excluded.skor_bansos,
             skor_total          = excluded.skor_total,
             kategori_kemiskinan = excluded.kategori_kemiskinan,
             metode              = excluded.metode,
             version             = excluded.version,
             calculated_at       = excluded.calculated_at",
          rusqlite::params![
            fresh_skor_id,
            id_str,
            skor_ekonomi,
            skor_rumah,
            skor_aset,
            skor_pembiayaan,
            skor_kesehatan,
            skor_bansos,
            skor_total,
            kategori,
            metode,
            version,
            at_str,
          ],
        )?;

        match (lat, lon) {
          (Some(latitude), Some(longitude)) => {
            tx.execute(
              "INSERT INTO santri_map (
                 santri_id, pesantren_id, nama, provinsi, kabupaten,
                 kecamatan, desa, latitude, longitude, skor_terakhir,
                 kategori_kemiskinan, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
               ON CONFLICT(santri_id) DO UPDATE SET
                 pesantren_id        = excluded.pesantren_id,
                 nama                = excluded.nama,
                 provinsi            = excluded.provinsi,
                 kabupaten           = excluded.kabupaten,
                 kecamatan           = excluded.kecamatan,
                 desa                = excluded.desa,
                 latitude            = excluded.latitude,
                 longitude           = excluded.longitude,
                 skor_terakhir       = excluded.skor_terakhir,
                 kategori_kemiskinan = excluded.kategori_kemiskinan,
                 updated_at          = excluded.updated_at",
              rusqlite::params![
                id_str, pesantren_id, nama, provinsi, kabupaten, kecamatan,
                desa, latitude, longitude, skor_total, kategori, at_str,
              ],
            )?;
          }
          _ => {
            tx.execute(
              "DELETE FROM santri_map WHERE santri_id = ?1",
              rusqlite::params![id_str],
            )?;
          }
        }

        let skor_id: String = tx.query_row(
          "SELECT skor_id FROM santri_skor WHERE santri_id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(Some(skor_id))
      })
      .await?;

    let Some(skor_id) = skor_id else {
      return Err(Error::SubjectNotFound(draft.santri_id));
    };

    Ok(SantriScore {
      skor_id:             decode_uuid(&skor_id)?,
      santri_id:           draft.santri_id,
      skor_ekonomi:        draft.skor_ekonomi,
      skor_rumah:          draft.skor_rumah,
      skor_aset:           draft.skor_aset,
      skor_pembiayaan:     draft.skor_pembiayaan,
      skor_kesehatan:      draft.skor_kesehatan,
      skor_bansos:         draft.skor_bansos,
      skor_total:          draft.skor_total,
      kategori_kemiskinan: draft.kategori_kemiskinan,
      metode:              draft.metode,
      version:             draft.version,
      calculated_at,
    })
  }

  async fn get_pesantren_score(&self, id: Uuid) -> Result<Option<PesantrenScore>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPesantrenScore> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM pesantren_skor WHERE pesantren_id = ?1",
                RawPesantrenScore::COLUMNS
              ),
              rusqlite::params![id_str],
              RawPesantrenScore::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPesantrenScore::into_score).transpose()
  }

  async fn get_santri_score(&self, id: Uuid) -> Result<Option<SantriScore>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSantriScore> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM santri_skor WHERE santri_id = ?1",
                RawSantriScore::COLUMNS
              ),
              rusqlite::params![id_str],
              RawSantriScore::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSantriScore::into_score).transpose()
  }

  // ── Map reads ─────────────────────────────────────────────────────────────

  async fn list_pesantren_map(&self) -> Result<Vec<PesantrenMapRow>> {
    let raws: Vec<RawPesantrenMap> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM pesantren_map ORDER BY nama",
          RawPesantrenMap::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawPesantrenMap::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPesantrenMap::into_row).collect()
  }

  async fn list_santri_map(&self) -> Result<Vec<SantriMapRow>> {
    let raws: Vec<RawSantriMap> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM santri_map ORDER BY nama",
          RawSantriMap::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawSantriMap::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSantriMap::into_row).collect()
  }

  async fn pesantren_choropleth(&self) -> Result<Vec<PesantrenRegionAggregate>> {
    let buckets = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT provinsi,
                  COUNT(*),
                  AVG(skor_terakhir),
                  SUM(CASE WHEN kategori_kelayakan = 'layak' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN kategori_kelayakan = 'cukup_layak' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN kategori_kelayakan = 'tidak_layak' THEN 1 ELSE 0 END)
           FROM pesantren_map
           GROUP BY provinsi
           ORDER BY provinsi",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(PesantrenRegionAggregate {
              provinsi:       row.get(0)?,
              jumlah:         row.get(1)?,
              rata_rata_skor: row.get(2)?,
              layak:          row.get(3)?,
              cukup_layak:    row.get(4)?,
              tidak_layak:    row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(buckets)
  }

  async fn santri_choropleth(&self) -> Result<Vec<SantriRegionAggregate>> {
    let buckets = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT provinsi,
                  COUNT(*),
                  AVG(skor_terakhir),
                  SUM(CASE WHEN kategori_kemiskinan = 'sangat_miskin' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN kategori_kemiskinan = 'miskin' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN kategori_kemiskinan = 'rentan_miskin' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN kategori_kemiskinan = 'tidak_miskin' THEN 1 ELSE 0 END)
           FROM santri_map
           GROUP BY provinsi
           ORDER BY provinsi",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(SantriRegionAggregate {
              provinsi:       row.get(0)?,
              jumlah:         row.get(1)?,
              rata_rata_skor: row.get(2)?,
              sangat_miskin:  row.get(3)?,
              miskin:         row.get(4)?,
              rentan_miskin:  row.get(5)?,
              tidak_miskin:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(buckets)
  }
}
