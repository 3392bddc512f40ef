//! Score composition: range validation, totals, and banding.
//!
//! The composer is the one place sub-scores are checked against their
//! declared ranges. A violation means a rule bug and surfaces as
//! [`Error::ConstraintMismatch`] naming the dimension and value; it is
//! never retried.

use uuid::Uuid;

use crate::{
  Error, Result,
  rules::{pesantren as pr, santri as sr},
  score::{NewPesantrenScore, NewSantriScore},
  vocab::{KategoriKelayakan, KategoriKemiskinan},
};

/// Tag identifying the rule set that produced a score.
pub const METODE: &str = "rule-based-v1";

/// Semantic version of the weight tables.
pub const VERSION: &str = "1.0.0";

pub const SKOR_TOTAL_MAX: i64 = 100;

fn check_range(dimension: &'static str, value: i64, max: i64) -> Result<i64> {
  if (0..=max).contains(&value) {
    Ok(value)
  } else {
    Err(Error::ConstraintMismatch { dimension, value })
  }
}

// ─── Banding ─────────────────────────────────────────────────────────────────

/// Eligibility band for a pesantren total. Total over 0..=100.
pub fn kategori_kelayakan(skor_total: i64) -> KategoriKelayakan {
  match skor_total {
    0..=49 => KategoriKelayakan::TidakLayak,
    50..=74 => KategoriKelayakan::CukupLayak,
    _ => KategoriKelayakan::Layak,
  }
}

/// Poverty band for a santri total. Total over 0..=100.
pub fn kategori_kemiskinan(skor_total: i64) -> KategoriKemiskinan {
  match skor_total {
    0..=29 => KategoriKemiskinan::SangatMiskin,
    30..=49 => KategoriKemiskinan::Miskin,
    50..=69 => KategoriKemiskinan::RentanMiskin,
    _ => KategoriKemiskinan::TidakMiskin,
  }
}

// ─── Composition ─────────────────────────────────────────────────────────────

/// Sub-scores of the three pesantren dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PesantrenSubScores {
  pub fisik:      i64,
  pub fasilitas:  i64,
  pub pendidikan: i64,
}

/// Validate, total, band, and stamp a pesantren score draft.
pub fn compose_pesantren(
  pesantren_id: Uuid,
  sub: PesantrenSubScores,
) -> Result<NewPesantrenScore> {
  let skor_fisik = check_range("skor_fisik", sub.fisik, pr::SKOR_FISIK_MAX)?;
  let skor_fasilitas =
    check_range("skor_fasilitas", sub.fasilitas, pr::SKOR_FASILITAS_MAX)?;
  let skor_pendidikan =
    check_range("skor_pendidikan", sub.pendidikan, pr::SKOR_PENDIDIKAN_MAX)?;

  let skor_total = skor_fisik + skor_fasilitas + skor_pendidikan;
  check_range("skor_total", skor_total, SKOR_TOTAL_MAX)?;

  Ok(NewPesantrenScore {
    pesantren_id,
    skor_fisik,
    skor_fasilitas,
    skor_pendidikan,
    skor_total,
    kategori_kelayakan: kategori_kelayakan(skor_total),
    metode: METODE.to_owned(),
    version: VERSION.to_owned(),
  })
}

/// Sub-scores of the six santri dimensions.
#[derive(Debug, Clone, Copy)]
pub struct SantriSubScores {
  pub ekonomi:    i64,
  pub rumah:      i64,
  pub aset:       i64,
  pub pembiayaan: i64,
  pub kesehatan:  i64,
  pub bansos:     i64,
}

/// Validate, total, band, and stamp a santri score draft.
pub fn compose_santri(
  santri_id: Uuid,
  sub: SantriSubScores,
) -> Result<NewSantriScore> {
  let skor_ekonomi =
    check_range("skor_ekonomi", sub.ekonomi, sr::SKOR_EKONOMI_MAX)?;
  let skor_rumah = check_range("skor_rumah", sub.rumah, sr::SKOR_RUMAH_MAX)?;
  let skor_aset = check_range("skor_aset", sub.aset, sr::SKOR_ASET_MAX)?;
  let skor_pembiayaan =
    check_range("skor_pembiayaan", sub.pembiayaan, sr::SKOR_PEMBIAYAAN_MAX)?;
  let skor_kesehatan =
    check_range("skor_kesehatan", sub.kesehatan, sr::SKOR_KESEHATAN_MAX)?;
  let skor_bansos =
    check_range("skor_bansos", sub.bansos, sr::SKOR_BANSOS_MAX)?;

  let skor_total = skor_ekonomi
    + skor_rumah
    + skor_aset
    + skor_pembiayaan
    + skor_kesehatan
    + skor_bansos;
  check_range("skor_total", skor_total, SKOR_TOTAL_MAX)?;

  Ok(NewSantriScore {
    santri_id,
    skor_ekonomi,
    skor_rumah,
    skor_aset,
    skor_pembiayaan,
    skor_kesehatan,
    skor_bansos,
    skor_total,
    kategori_kemiskinan: kategori_kemiskinan(skor_total),
    metode: METODE.to_owned(),
    version: VERSION.to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kelayakan_banding_is_total_over_the_range() {
    for t in 0..=100 {
      let _ = kategori_kelayakan(t);
      let _ = kategori_kemiskinan(t);
    }
    assert_eq!(kategori_kelayakan(0), KategoriKelayakan::TidakLayak);
    assert_eq!(kategori_kelayakan(49), KategoriKelayakan::TidakLayak);
    assert_eq!(kategori_kelayakan(50), KategoriKelayakan::CukupLayak);
    assert_eq!(kategori_kelayakan(74), KategoriKelayakan::CukupLayak);
    assert_eq!(kategori_kelayakan(75), KategoriKelayakan::Layak);
    assert_eq!(kategori_kelayakan(100), KategoriKelayakan::Layak);
  }

  #[test]
  fn kemiskinan_banding_boundaries() {
    assert_eq!(kategori_kemiskinan(0), KategoriKemiskinan::SangatMiskin);
    assert_eq!(kategori_kemiskinan(29), KategoriKemiskinan::SangatMiskin);
    assert_eq!(kategori_kemiskinan(30), KategoriKemiskinan::Miskin);
    assert_eq!(kategori_kemiskinan(49), KategoriKemiskinan::Miskin);
    assert_eq!(kategori_kemiskinan(50), KategoriKemiskinan::RentanMiskin);
    assert_eq!(kategori_kemiskinan(69), KategoriKemiskinan::RentanMiskin);
    assert_eq!(kategori_kemiskinan(70), KategoriKemiskinan::TidakMiskin);
    assert_eq!(kategori_kemiskinan(100), KategoriKemiskinan::TidakMiskin);
  }

  #[test]
  fn compose_pesantren_totals_and_stamps() {
    let draft = compose_pesantren(
      Uuid::new_v4(),
      PesantrenSubScores { fisik: 30, fasilitas: 20, pendidikan: 25 },
    )
    .unwrap();
    assert_eq!(draft.skor_total, 75);
    assert_eq!(draft.kategori_kelayakan, KategoriKelayakan::Layak);
    assert_eq!(draft.metode, METODE);
    assert_eq!(draft.version, VERSION);
  }

  #[test]
  fn compose_rejects_out_of_range_sub_score() {
    let err = compose_pesantren(
      Uuid::new_v4(),
      PesantrenSubScores { fisik: 41, fasilitas: 0, pendidikan: 0 },
    )
    .unwrap_err();
    match err {
      crate::Error::ConstraintMismatch { dimension, value } => {
        assert_eq!(dimension, "skor_fisik");
        assert_eq!(value, 41);
      }
      other => panic!("expected ConstraintMismatch, got {other:?}"),
    }
  }

  #[test]
  fn compose_santri_sum_closure() {
    let sub = SantriSubScores {
      ekonomi:    15,
      rumah:      13,
      aset:       4,
      pembiayaan: 15,
      kesehatan:  12,
      bansos:     10,
    };
    let draft = compose_santri(Uuid::new_v4(), sub).unwrap();
    assert_eq!(
      draft.skor_total,
      draft.skor_ekonomi
        + draft.skor_rumah
        + draft.skor_aset
        + draft.skor_pembiayaan
        + draft.skor_kesehatan
        + draft.skor_bansos
    );
    assert_eq!(draft.kategori_kemiskinan, KategoriKemiskinan::TidakMiskin);
  }

  #[test]
  fn compose_rejects_negative_sub_score() {
    let err = compose_santri(
      Uuid::new_v4(),
      SantriSubScores {
        ekonomi:    -1,
        rumah:      0,
        aset:       0,
        pembiayaan: 0,
        kesehatan:  0,
        bansos:     0,
      },
    )
    .unwrap_err();
    assert!(matches!(
      err,
      crate::Error::ConstraintMismatch { dimension: "skor_ekonomi", value: -1 }
    ));
  }
}
