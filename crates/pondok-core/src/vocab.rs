//! Controlled vocabularies consumed by the scoring rules.
//!
//! Every enum lists its variants from best to worst bracket. JSON uses the
//! canonical lowercase tokens; a `#[serde(other)]` fallback on the worst
//! variant means unrecognised tokens degrade instead of erroring. The
//! `parse` constructors are the tolerant path used when reading stored rows:
//! they case-fold, trim, and fold known synonyms, returning `None` for
//! anything unrecognised so the rules fall back to the worst bracket.

use serde::{Deserialize, Serialize};

/// Case-fold and normalise separators before token matching.
fn normalize(raw: &str) -> String {
  raw.trim().to_lowercase().replace([' ', '-'], "_")
}

// ─── Pendidikan ──────────────────────────────────────────────────────────────

/// School accreditation grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Akreditasi {
  A,
  B,
  C,
  #[serde(other)]
  Belum,
}

impl Akreditasi {
  pub fn token(self) -> &'static str {
    match self {
      Self::A => "a",
      Self::B => "b",
      Self::C => "c",
      Self::Belum => "belum",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "a" => Some(Self::A),
      "b" => Some(Self::B),
      "c" => Some(Self::C),
      "belum" | "belum_terakreditasi" => Some(Self::Belum),
      _ => None,
    }
  }
}

/// Curriculum classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kurikulum {
  Terstandar,
  Internal,
  #[serde(other)]
  TidakJelas,
}

impl Kurikulum {
  pub fn token(self) -> &'static str {
    match self {
      Self::Terstandar => "terstandar",
      Self::Internal => "internal",
      Self::TidakJelas => "tidak_jelas",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "terstandar" => Some(Self::Terstandar),
      "internal" => Some(Self::Internal),
      "tidak_jelas" => Some(Self::TidakJelas),
      _ => None,
    }
  }
}

/// Institutional achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prestasi {
  Nasional,
  Regional,
  #[serde(other)]
  TidakAda,
}

impl Prestasi {
  pub fn token(self) -> &'static str {
    match self {
      Self::Nasional => "nasional",
      Self::Regional => "regional",
      Self::TidakAda => "tidak_ada",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "nasional" => Some(Self::Nasional),
      "regional" => Some(Self::Regional),
      "tidak_ada" => Some(Self::TidakAda),
      _ => None,
    }
  }
}

/// Education-level grouping. Descriptive only; never weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jenjang {
  SemuaRaMa,
  PendidikanDasar,
  DasarMenengahPertama,
  DasarMenengahAtas,
  SatuJenjang,
}

impl Jenjang {
  pub fn token(self) -> &'static str {
    match self {
      Self::SemuaRaMa => "semua_ra_ma",
      Self::PendidikanDasar => "pendidikan_dasar",
      Self::DasarMenengahPertama => "dasar_menengah_pertama",
      Self::DasarMenengahAtas => "dasar_menengah_atas",
      Self::SatuJenjang => "satu_jenjang",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "semua_ra_ma" => Some(Self::SemuaRaMa),
      "pendidikan_dasar" => Some(Self::PendidikanDasar),
      "dasar_menengah_pertama" => Some(Self::DasarMenengahPertama),
      "dasar_menengah_atas" => Some(Self::DasarMenengahAtas),
      "satu_jenjang" => Some(Self::SatuJenjang),
      _ => None,
    }
  }
}

// ─── Subject descriptors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JenisKelamin {
  L,
  P,
}

impl JenisKelamin {
  pub fn token(self) -> &'static str {
    match self {
      Self::L => "L",
      Self::P => "P",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "l" | "laki_laki" => Some(Self::L),
      "p" | "perempuan" => Some(Self::P),
      _ => None,
    }
  }
}

/// Residence status of a santri.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMukim {
  Mondok,
  Pp,
  Mukim,
}

impl StatusMukim {
  pub fn token(self) -> &'static str {
    match self {
      Self::Mondok => "mondok",
      Self::Pp => "pp",
      Self::Mukim => "mukim",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "mondok" => Some(Self::Mondok),
      "pp" => Some(Self::Pp),
      "mukim" => Some(Self::Mukim),
      _ => None,
    }
  }
}

// ─── Adequacy scales ─────────────────────────────────────────────────────────

/// Three-level facility adequacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kelayakan {
  Layak,
  Cukup,
  #[serde(other)]
  TidakLayak,
}

impl Kelayakan {
  pub fn token(self) -> &'static str {
    match self {
      Self::Layak => "layak",
      Self::Cukup => "cukup",
      Self::TidakLayak => "tidak_layak",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "layak" | "baik" => Some(Self::Layak),
      "cukup" | "sedang" => Some(Self::Cukup),
      "tidak_layak" | "buruk" => Some(Self::TidakLayak),
      _ => None,
    }
  }
}

/// Two-level water access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AksesAir {
  Layak,
  #[serde(other)]
  TidakLayak,
}

impl AksesAir {
  pub fn token(self) -> &'static str {
    match self {
      Self::Layak => "layak",
      Self::TidakLayak => "tidak_layak",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "layak" => Some(Self::Layak),
      "tidak_layak" => Some(Self::TidakLayak),
      _ => None,
    }
  }
}

// ─── Housing ─────────────────────────────────────────────────────────────────

/// Housing tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKepemilikan {
  MilikSendiri,
  Kontrak,
  #[serde(other)]
  Menumpang,
}

impl StatusKepemilikan {
  pub fn token(self) -> &'static str {
    match self {
      Self::MilikSendiri => "milik_sendiri",
      Self::Kontrak => "kontrak",
      Self::Menumpang => "menumpang",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "milik_sendiri" => Some(Self::MilikSendiri),
      // Legacy rows recorded rented housing as "sewa".
      "kontrak" | "sewa" => Some(Self::Kontrak),
      "menumpang" => Some(Self::Menumpang),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisDinding {
  Tembok,
  Kayu,
  #[serde(other)]
  Bambu,
}

impl JenisDinding {
  pub fn token(self) -> &'static str {
    match self {
      Self::Tembok => "tembok",
      Self::Kayu => "kayu",
      Self::Bambu => "bambu",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "tembok" => Some(Self::Tembok),
      "kayu" => Some(Self::Kayu),
      "bambu" => Some(Self::Bambu),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisAtap {
  Genteng,
  Seng,
  Asbes,
  #[serde(other)]
  Rumbia,
}

impl JenisAtap {
  pub fn token(self) -> &'static str {
    match self {
      Self::Genteng => "genteng",
      Self::Seng => "seng",
      Self::Asbes => "asbes",
      Self::Rumbia => "rumbia",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "genteng" => Some(Self::Genteng),
      "seng" => Some(Self::Seng),
      "asbes" => Some(Self::Asbes),
      "rumbia" | "ijuk" => Some(Self::Rumbia),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisLantai {
  Keramik,
  Semen,
  Kayu,
  #[serde(other)]
  Tanah,
}

impl JenisLantai {
  pub fn token(self) -> &'static str {
    match self {
      Self::Keramik => "keramik",
      Self::Semen => "semen",
      Self::Kayu => "kayu",
      Self::Tanah => "tanah",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "keramik" | "ubin" => Some(Self::Keramik),
      "semen" => Some(Self::Semen),
      "kayu" => Some(Self::Kayu),
      "tanah" => Some(Self::Tanah),
      _ => None,
    }
  }
}

// ─── Physical plant ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KondisiBangunan {
  Baik,
  Sedang,
  RusakRingan,
  #[serde(other)]
  RusakBerat,
}

impl KondisiBangunan {
  pub fn token(self) -> &'static str {
    match self {
      Self::Baik => "baik",
      Self::Sedang => "sedang",
      Self::RusakRingan => "rusak_ringan",
      Self::RusakBerat => "rusak_berat",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "baik" => Some(Self::Baik),
      "sedang" => Some(Self::Sedang),
      "rusak_ringan" => Some(Self::RusakRingan),
      "rusak_berat" => Some(Self::RusakBerat),
      _ => None,
    }
  }
}

/// Drinking-water source, ordered by reliability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumberAir {
  Pam,
  SumurBor,
  SumurGali,
  MataAir,
  Sungai,
  #[serde(other)]
  TadahHujan,
}

impl SumberAir {
  pub fn token(self) -> &'static str {
    match self {
      Self::Pam => "pam",
      Self::SumurBor => "sumur_bor",
      Self::SumurGali => "sumur_gali",
      Self::MataAir => "mata_air",
      Self::Sungai => "sungai",
      Self::TadahHujan => "tadah_hujan",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      // Legacy rows used the utility name or "ledeng" for piped water.
      "pam" | "pdam" | "ledeng" => Some(Self::Pam),
      "sumur_bor" => Some(Self::SumurBor),
      "sumur_gali" | "sumur" => Some(Self::SumurGali),
      "mata_air" => Some(Self::MataAir),
      "sungai" => Some(Self::Sungai),
      "tadah_hujan" => Some(Self::TadahHujan),
      _ => None,
    }
  }
}

/// Road surface leading to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AksesJalan {
  Aspal,
  CorBlock,
  Kerikil,
  #[serde(other)]
  Tanah,
}

impl AksesJalan {
  pub fn token(self) -> &'static str {
    match self {
      Self::Aspal => "aspal",
      Self::CorBlock => "cor_block",
      Self::Kerikil => "kerikil",
      Self::Tanah => "tanah",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "aspal" => Some(Self::Aspal),
      "cor_block" | "paving" => Some(Self::CorBlock),
      "kerikil" => Some(Self::Kerikil),
      "tanah" => Some(Self::Tanah),
      _ => None,
    }
  }
}

// ─── Financing & services ────────────────────────────────────────────────────

/// Who pays the santri's fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumberBiaya {
  OrangTua,
  Wali,
  Beasiswa,
  #[serde(other)]
  Bantuan,
}

impl SumberBiaya {
  pub fn token(self) -> &'static str {
    match self {
      Self::OrangTua => "orang_tua",
      Self::Wali => "wali",
      Self::Beasiswa => "beasiswa",
      Self::Bantuan => "bantuan",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "orang_tua" => Some(Self::OrangTua),
      "wali" => Some(Self::Wali),
      "beasiswa" => Some(Self::Beasiswa),
      "bantuan" => Some(Self::Bantuan),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPembayaran {
  Lancar,
  Terlambat,
  #[serde(other)]
  Menunggak,
}

impl StatusPembayaran {
  pub fn token(self) -> &'static str {
    match self {
      Self::Lancar => "lancar",
      Self::Terlambat => "terlambat",
      Self::Menunggak => "menunggak",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "lancar" => Some(Self::Lancar),
      "terlambat" => Some(Self::Terlambat),
      "menunggak" => Some(Self::Menunggak),
      _ => None,
    }
  }
}

/// How readily the household can reach health services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AksesLayanan {
  Mudah,
  Sedang,
  #[serde(other)]
  Sulit,
}

impl AksesLayanan {
  pub fn token(self) -> &'static str {
    match self {
      Self::Mudah => "mudah",
      Self::Sedang => "sedang",
      Self::Sulit => "sulit",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "mudah" => Some(Self::Mudah),
      "sedang" => Some(Self::Sedang),
      "sulit" => Some(Self::Sulit),
      _ => None,
    }
  }
}

// ─── Derived categories ──────────────────────────────────────────────────────

/// Eligibility band for a pesantren, derived from `skor_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KategoriKelayakan {
  Layak,
  CukupLayak,
  TidakLayak,
}

impl KategoriKelayakan {
  pub fn token(self) -> &'static str {
    match self {
      Self::Layak => "layak",
      Self::CukupLayak => "cukup_layak",
      Self::TidakLayak => "tidak_layak",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "layak" => Some(Self::Layak),
      "cukup_layak" => Some(Self::CukupLayak),
      "tidak_layak" => Some(Self::TidakLayak),
      _ => None,
    }
  }
}

/// Poverty band for a santri, derived from `skor_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KategoriKemiskinan {
  SangatMiskin,
  Miskin,
  RentanMiskin,
  TidakMiskin,
}

impl KategoriKemiskinan {
  pub fn token(self) -> &'static str {
    match self {
      Self::SangatMiskin => "sangat_miskin",
      Self::Miskin => "miskin",
      Self::RentanMiskin => "rentan_miskin",
      Self::TidakMiskin => "tidak_miskin",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match normalize(raw).as_str() {
      "sangat_miskin" => Some(Self::SangatMiskin),
      "miskin" => Some(Self::Miskin),
      "rentan_miskin" => Some(Self::RentanMiskin),
      "tidak_miskin" => Some(Self::TidakMiskin),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_is_case_insensitive_and_trims() {
    assert_eq!(Akreditasi::parse("  A "), Some(Akreditasi::A));
    assert_eq!(Kelayakan::parse("LAYAK"), Some(Kelayakan::Layak));
    assert_eq!(AksesJalan::parse("Cor Block"), Some(AksesJalan::CorBlock));
  }

  #[test]
  fn parse_folds_known_synonyms() {
    assert_eq!(
      StatusKepemilikan::parse("sewa"),
      Some(StatusKepemilikan::Kontrak)
    );
    assert_eq!(SumberAir::parse("PDAM"), Some(SumberAir::Pam));
    assert_eq!(SumberAir::parse("ledeng"), Some(SumberAir::Pam));
    assert_eq!(JenisKelamin::parse("laki-laki"), Some(JenisKelamin::L));
  }

  #[test]
  fn parse_rejects_unknown_tokens() {
    assert_eq!(Akreditasi::parse("z"), None);
    assert_eq!(StatusPembayaran::parse(""), None);
    assert_eq!(SumberAir::parse("solar panel"), None);
  }

  #[test]
  fn tokens_round_trip_through_parse() {
    for k in [Kelayakan::Layak, Kelayakan::Cukup, Kelayakan::TidakLayak] {
      assert_eq!(Kelayakan::parse(k.token()), Some(k));
    }
    for j in [
      AksesJalan::Aspal,
      AksesJalan::CorBlock,
      AksesJalan::Kerikil,
      AksesJalan::Tanah,
    ] {
      assert_eq!(AksesJalan::parse(j.token()), Some(j));
    }
  }
}
