//! Sub-score rules for santri dimensions.
//!
//! Higher scores mean a better-off household; the poverty category bands in
//! [`crate::compose`] run from `sangat_miskin` at the bottom of the total
//! range to `tidak_miskin` at the top. Missing data therefore scores low,
//! keeping unknown households on the needs-attention side.

use crate::{
  attributes::{Aset, Bansos, Ekonomi, Kesehatan, Pembiayaan, Rumah},
  vocab::{
    AksesAir, AksesLayanan, JenisAtap, JenisDinding, JenisLantai,
    StatusKepemilikan, StatusPembayaran, SumberBiaya,
  },
};

pub const SKOR_EKONOMI_MAX: i64 = 25;
pub const SKOR_RUMAH_MAX: i64 = 20;
pub const SKOR_ASET_MAX: i64 = 15;
pub const SKOR_PEMBIAYAAN_MAX: i64 = 15;
pub const SKOR_KESEHATAN_MAX: i64 = 15;
pub const SKOR_BANSOS_MAX: i64 = 10;

// ─── Ekonomi ─────────────────────────────────────────────────────────────────

/// Household-income score, 0–25.
pub fn skor_ekonomi(record: Option<&Ekonomi>) -> i64 {
  let Some(e) = record else { return 0 };

  let penghasilan = match e.penghasilan_bulanan {
    Some(n) if n >= 3_500_000 => 22,
    Some(n) if n >= 2_000_000 => 18,
    Some(n) if n >= 1_000_000 => 12,
    Some(n) if n >= 500_000 => 6,
    _ => 0,
  };

  let tanggungan = match e.jumlah_tanggungan {
    Some(n) if n <= 2 => 3,
    Some(n) if n <= 4 => 2,
    Some(n) if n <= 6 => 1,
    _ => 0,
  };

  (penghasilan + tanggungan).clamp(0, SKOR_EKONOMI_MAX)
}

// ─── Rumah ───────────────────────────────────────────────────────────────────

/// Housing score, 0–20.
pub fn skor_rumah(record: Option<&Rumah>) -> i64 {
  let Some(r) = record else { return 0 };

  let kepemilikan = match r.status_kepemilikan {
    Some(StatusKepemilikan::MilikSendiri) => 6,
    Some(StatusKepemilikan::Kontrak) => 3,
    Some(StatusKepemilikan::Menumpang) | None => 0,
  };

  let air = match r.akses_air {
    Some(AksesAir::Layak) => 4,
    Some(AksesAir::TidakLayak) | None => 0,
  };

  let dinding = match r.dinding {
    Some(JenisDinding::Tembok) => 4,
    Some(JenisDinding::Kayu) => 2,
    Some(JenisDinding::Bambu) | None => 0,
  };

  let atap = match r.atap {
    Some(JenisAtap::Genteng) => 3,
    Some(JenisAtap::Seng) => 2,
    Some(JenisAtap::Asbes) => 1,
    Some(JenisAtap::Rumbia) | None => 0,
  };

  let lantai = match r.lantai {
    Some(JenisLantai::Keramik) => 3,
    Some(JenisLantai::Semen) => 2,
    Some(JenisLantai::Kayu) => 1,
    Some(JenisLantai::Tanah) | None => 0,
  };

  (kepemilikan + air + dinding + atap + lantai).clamp(0, SKOR_RUMAH_MAX)
}

// ─── Aset ────────────────────────────────────────────────────────────────────

/// Durable-asset score, 0–15. Each owned asset class contributes.
pub fn skor_aset(record: Option<&Aset>) -> i64 {
  let Some(a) = record else { return 0 };

  let kendaraan = if a.kendaraan.unwrap_or(false) { 4 } else { 0 };
  let tanah = if a.tanah.unwrap_or(false) { 4 } else { 0 };
  let ternak = if a.ternak.unwrap_or(false) { 3 } else { 0 };
  let elektronik = if a.elektronik.unwrap_or(false) { 4 } else { 0 };

  (kendaraan + tanah + ternak + elektronik).clamp(0, SKOR_ASET_MAX)
}

// ─── Pembiayaan ──────────────────────────────────────────────────────────────

/// Financing score, 0–15.
pub fn skor_pembiayaan(record: Option<&Pembiayaan>) -> i64 {
  let Some(p) = record else { return 0 };

  let sumber = match p.sumber_biaya {
    Some(SumberBiaya::OrangTua) => 7,
    Some(SumberBiaya::Wali) => 5,
    Some(SumberBiaya::Beasiswa) => 3,
    Some(SumberBiaya::Bantuan) | None => 0,
  };

  let pembayaran = match p.status_pembayaran {
    Some(StatusPembayaran::Lancar) => 8,
    Some(StatusPembayaran::Terlambat) => 4,
    Some(StatusPembayaran::Menunggak) | None => 0,
  };

  (sumber + pembayaran).clamp(0, SKOR_PEMBIAYAAN_MAX)
}

// ─── Kesehatan ───────────────────────────────────────────────────────────────

/// Health score, 0–15. Chronic illness counts against the household only
/// when it is positively recorded.
pub fn skor_kesehatan(record: Option<&Kesehatan>) -> i64 {
  let Some(k) = record else { return 0 };

  let kronis = match k.penyakit_kronis {
    Some(false) => 8,
    Some(true) | None => 0,
  };

  let akses = match k.akses_layanan {
    Some(AksesLayanan::Mudah) => 7,
    Some(AksesLayanan::Sedang) => 4,
    Some(AksesLayanan::Sulit) | None => 0,
  };

  (kronis + akses).clamp(0, SKOR_KESEHATAN_MAX)
}

// ─── Bansos ──────────────────────────────────────────────────────────────────

/// Social-aid score, 0–10. Receiving more programmes indicates deeper need.
pub fn skor_bansos(record: Option<&Bansos>) -> i64 {
  let Some(b) = record else { return 0 };

  let skor = match b.jumlah_program {
    Some(n) if n <= 0 => 10,
    Some(1) => 4,
    Some(_) => 0,
    None => 0,
  };

  skor.clamp(0, SKOR_BANSOS_MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ekonomi_income_brackets_are_monotone() {
    let mut prev = -1;
    for penghasilan in [200_000, 700_000, 1_500_000, 2_500_000, 4_000_000] {
      let e = Ekonomi {
        penghasilan_bulanan: Some(penghasilan),
        jumlah_tanggungan:   Some(3),
      };
      let s = skor_ekonomi(Some(&e));
      assert!(s > prev, "income {penghasilan} should strictly improve");
      prev = s;
    }
  }

  #[test]
  fn ekonomi_best_case_hits_the_maximum() {
    let e = Ekonomi {
      penghasilan_bulanan: Some(5_000_000),
      jumlah_tanggungan:   Some(1),
    };
    assert_eq!(skor_ekonomi(Some(&e)), SKOR_EKONOMI_MAX);
  }

  #[test]
  fn rumah_best_case_hits_the_maximum() {
    let r = Rumah {
      status_kepemilikan: Some(StatusKepemilikan::MilikSendiri),
      akses_air:          Some(AksesAir::Layak),
      dinding:            Some(JenisDinding::Tembok),
      atap:               Some(JenisAtap::Genteng),
      lantai:             Some(JenisLantai::Keramik),
    };
    assert_eq!(skor_rumah(Some(&r)), SKOR_RUMAH_MAX);
  }

  #[test]
  fn rumah_tenure_upgrade_never_decreases() {
    let mut r = Rumah::default();
    r.status_kepemilikan = Some(StatusKepemilikan::Menumpang);
    let menumpang = skor_rumah(Some(&r));
    r.status_kepemilikan = Some(StatusKepemilikan::Kontrak);
    let kontrak = skor_rumah(Some(&r));
    r.status_kepemilikan = Some(StatusKepemilikan::MilikSendiri);
    let milik = skor_rumah(Some(&r));
    assert!(menumpang < kontrak && kontrak < milik);
  }

  #[test]
  fn aset_all_assets_hit_the_maximum() {
    let a = Aset {
      kendaraan:  Some(true),
      tanah:      Some(true),
      ternak:     Some(true),
      elektronik: Some(true),
    };
    assert_eq!(skor_aset(Some(&a)), SKOR_ASET_MAX);
  }

  #[test]
  fn pembiayaan_arrears_score_worst() {
    let p = Pembiayaan {
      sumber_biaya:      Some(SumberBiaya::Bantuan),
      status_pembayaran: Some(StatusPembayaran::Menunggak),
    };
    assert_eq!(skor_pembiayaan(Some(&p)), 0);
  }

  #[test]
  fn kesehatan_chronic_illness_drops_the_component() {
    let sehat = Kesehatan {
      penyakit_kronis: Some(false),
      akses_layanan:   Some(AksesLayanan::Mudah),
    };
    let kronis = Kesehatan {
      penyakit_kronis: Some(true),
      akses_layanan:   Some(AksesLayanan::Mudah),
    };
    assert_eq!(skor_kesehatan(Some(&sehat)), SKOR_KESEHATAN_MAX);
    assert_eq!(skor_kesehatan(Some(&kronis)), 7);
  }

  #[test]
  fn bansos_counts_degrade_with_programmes() {
    let bansos = |n| Bansos { jumlah_program: Some(n) };
    assert_eq!(skor_bansos(Some(&bansos(0))), SKOR_BANSOS_MAX);
    assert_eq!(skor_bansos(Some(&bansos(1))), 4);
    assert_eq!(skor_bansos(Some(&bansos(3))), 0);
  }

  #[test]
  fn missing_records_score_zero_everywhere() {
    assert_eq!(skor_ekonomi(None), 0);
    assert_eq!(skor_rumah(None), 0);
    assert_eq!(skor_aset(None), 0);
    assert_eq!(skor_pembiayaan(None), 0);
    assert_eq!(skor_kesehatan(None), 0);
    assert_eq!(skor_bansos(None), 0);
  }
}
