//! Sub-score rules for pesantren dimensions.

use crate::{
  attributes::{Fasilitas, Fisik, Pendidikan},
  vocab::{
    AksesJalan, Akreditasi, JenisAtap, JenisDinding, JenisLantai, Kelayakan,
    KondisiBangunan, Kurikulum, Prestasi, SumberAir,
  },
};

pub const SKOR_FISIK_MAX: i64 = 40;
pub const SKOR_FASILITAS_MAX: i64 = 30;
pub const SKOR_PENDIDIKAN_MAX: i64 = 30;

fn kelayakan_points(k: Option<Kelayakan>, layak: i64, cukup: i64) -> i64 {
  match k {
    Some(Kelayakan::Layak) => layak,
    Some(Kelayakan::Cukup) => cukup,
    Some(Kelayakan::TidakLayak) | None => 0,
  }
}

// ─── Fisik ───────────────────────────────────────────────────────────────────

/// Physical-plant score, 0–40.
pub fn skor_fisik(record: Option<&Fisik>) -> i64 {
  let Some(f) = record else { return 0 };

  let bangunan = match f.kondisi_bangunan {
    Some(KondisiBangunan::Baik) => 8,
    Some(KondisiBangunan::Sedang) => 5,
    Some(KondisiBangunan::RusakRingan) => 2,
    Some(KondisiBangunan::RusakBerat) | None => 0,
  };

  let sanitasi = kelayakan_points(f.sanitasi, 6, 3);

  let sumber_air = match f.sumber_air {
    Some(SumberAir::Pam) => 4,
    Some(SumberAir::SumurBor) => 3,
    Some(SumberAir::SumurGali) | Some(SumberAir::MataAir) => 2,
    Some(SumberAir::Sungai) => 1,
    Some(SumberAir::TadahHujan) | None => 0,
  };

  let kualitas_air = kelayakan_points(f.kualitas_air, 4, 2);
  let keamanan = kelayakan_points(f.keamanan, 4, 2);

  let lantai = match f.lantai {
    Some(JenisLantai::Keramik) => 3,
    Some(JenisLantai::Semen) => 2,
    Some(JenisLantai::Kayu) => 1,
    Some(JenisLantai::Tanah) | None => 0,
  };

  let atap = match f.atap {
    Some(JenisAtap::Genteng) => 3,
    Some(JenisAtap::Seng) => 2,
    Some(JenisAtap::Asbes) => 1,
    Some(JenisAtap::Rumbia) | None => 0,
  };

  let dinding = match f.dinding {
    Some(JenisDinding::Tembok) => 3,
    Some(JenisDinding::Kayu) => 1,
    Some(JenisDinding::Bambu) | None => 0,
  };

  let kepadatan = match f.santri_per_kamar {
    Some(n) if n <= 4 => 5,
    Some(n) if n <= 8 => 3,
    Some(n) if n <= 12 => 1,
    _ => 0,
  };

  (bangunan
    + sanitasi
    + sumber_air
    + kualitas_air
    + keamanan
    + lantai
    + atap
    + dinding
    + kepadatan)
    .clamp(0, SKOR_FISIK_MAX)
}

// ─── Fasilitas ───────────────────────────────────────────────────────────────

/// Facilities score, 0–30.
pub fn skor_fasilitas(record: Option<&Fasilitas>) -> i64 {
  let Some(f) = record else { return 0 };

  let asrama = kelayakan_points(f.asrama, 6, 3);
  let ruang_kelas = kelayakan_points(f.ruang_kelas, 6, 3);

  let internet = if f.internet.unwrap_or(false) { 4 } else { 0 };
  let transportasi = if f.transportasi.unwrap_or(false) { 4 } else { 0 };

  let jalan = match f.akses_jalan {
    Some(AksesJalan::Aspal) => 4,
    Some(AksesJalan::CorBlock) => 3,
    Some(AksesJalan::Kerikil) => 1,
    Some(AksesJalan::Tanah) | None => 0,
  };

  let dapur = if f.dapur.unwrap_or(false) { 3 } else { 0 };
  let mck = if f.mck.unwrap_or(false) { 3 } else { 0 };

  (asrama + ruang_kelas + internet + transportasi + jalan + dapur + mck)
    .clamp(0, SKOR_FASILITAS_MAX)
}

// ─── Pendidikan ──────────────────────────────────────────────────────────────

/// Educational-standing score, 0–30.
pub fn skor_pendidikan(record: Option<&Pendidikan>) -> i64 {
  let Some(p) = record else { return 0 };

  let akreditasi = match p.akreditasi {
    Some(Akreditasi::A) => 10,
    Some(Akreditasi::B) => 7,
    Some(Akreditasi::C) => 4,
    Some(Akreditasi::Belum) | None => 0,
  };

  let kurikulum = match p.kurikulum {
    Some(Kurikulum::Terstandar) => 8,
    Some(Kurikulum::Internal) => 4,
    Some(Kurikulum::TidakJelas) | None => 0,
  };

  let rasio = match p.santri_per_guru {
    Some(n) if n <= 15 => 5,
    Some(n) if n <= 25 => 3,
    Some(n) if n <= 40 => 1,
    _ => 0,
  };

  let sertifikasi = match p.persen_guru_bersertifikat {
    Some(n) if n >= 75 => 4,
    Some(n) if n >= 50 => 3,
    Some(n) if n >= 25 => 1,
    _ => 0,
  };

  let prestasi = match p.prestasi {
    Some(Prestasi::Nasional) => 3,
    Some(Prestasi::Regional) => 2,
    Some(Prestasi::TidakAda) | None => 0,
  };

  (akreditasi + kurikulum + rasio + sertifikasi + prestasi)
    .clamp(0, SKOR_PENDIDIKAN_MAX)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vocab::Kelayakan;

  fn fisik_terbaik() -> Fisik {
    Fisik {
      kondisi_bangunan: Some(KondisiBangunan::Baik),
      sanitasi:         Some(Kelayakan::Layak),
      sumber_air:       Some(SumberAir::Pam),
      kualitas_air:     Some(Kelayakan::Layak),
      keamanan:         Some(Kelayakan::Layak),
      lantai:           Some(JenisLantai::Keramik),
      atap:             Some(JenisAtap::Genteng),
      dinding:          Some(JenisDinding::Tembok),
      santri_per_kamar: Some(4),
    }
  }

  #[test]
  fn fisik_best_case_hits_the_maximum() {
    assert_eq!(skor_fisik(Some(&fisik_terbaik())), SKOR_FISIK_MAX);
  }

  #[test]
  fn fisik_missing_record_scores_zero() {
    assert_eq!(skor_fisik(None), 0);
  }

  #[test]
  fn fisik_empty_record_scores_zero() {
    assert_eq!(skor_fisik(Some(&Fisik::default())), 0);
  }

  #[test]
  fn fisik_density_brackets_are_monotone() {
    let mut f = Fisik::default();
    let mut prev = i64::MAX;
    for n in [3, 6, 10, 20] {
      f.santri_per_kamar = Some(n);
      let s = skor_fisik(Some(&f));
      assert!(s <= prev, "density {n} should not raise the score");
      prev = s;
    }
  }

  #[test]
  fn fisik_density_clamps_below_lowest_bracket() {
    let mut f = Fisik::default();
    f.santri_per_kamar = Some(0);
    assert_eq!(skor_fisik(Some(&f)), 5);
  }

  #[test]
  fn fasilitas_best_case_hits_the_maximum() {
    let f = Fasilitas {
      asrama:       Some(Kelayakan::Layak),
      ruang_kelas:  Some(Kelayakan::Layak),
      internet:     Some(true),
      transportasi: Some(true),
      akses_jalan:  Some(AksesJalan::Aspal),
      dapur:        Some(true),
      mck:          Some(true),
    };
    assert_eq!(skor_fasilitas(Some(&f)), SKOR_FASILITAS_MAX);
  }

  #[test]
  fn fasilitas_road_ordering_is_monotone() {
    let mut f = Fasilitas::default();
    let ordered = [
      AksesJalan::Tanah,
      AksesJalan::Kerikil,
      AksesJalan::CorBlock,
      AksesJalan::Aspal,
    ];
    let mut prev = -1;
    for jalan in ordered {
      f.akses_jalan = Some(jalan);
      let s = skor_fasilitas(Some(&f));
      assert!(s >= prev);
      prev = s;
    }
  }

  #[test]
  fn pendidikan_best_case_hits_the_maximum() {
    let p = Pendidikan {
      akreditasi: Some(Akreditasi::A),
      kurikulum:  Some(Kurikulum::Terstandar),
      jenjang:    None,
      santri_per_guru: Some(12),
      persen_guru_bersertifikat: Some(80),
      prestasi:   Some(Prestasi::Nasional),
    };
    assert_eq!(skor_pendidikan(Some(&p)), SKOR_PENDIDIKAN_MAX);
  }

  #[test]
  fn pendidikan_accreditation_upgrade_never_decreases() {
    let mut p = Pendidikan::default();
    p.akreditasi = Some(Akreditasi::B);
    let b = skor_pendidikan(Some(&p));
    p.akreditasi = Some(Akreditasi::A);
    let a = skor_pendidikan(Some(&p));
    assert!(a >= b);
  }

  #[test]
  fn pendidikan_certified_percentage_clamps_above_hundred() {
    let mut p = Pendidikan::default();
    p.persen_guru_bersertifikat = Some(140);
    assert_eq!(skor_pendidikan(Some(&p)), 4);
  }

  #[test]
  fn jenjang_is_not_weighted() {
    let mut p = Pendidikan::default();
    let none = skor_pendidikan(Some(&p));
    p.jenjang = Some(crate::vocab::Jenjang::SemuaRaMa);
    assert_eq!(skor_pendidikan(Some(&p)), none);
  }
}
