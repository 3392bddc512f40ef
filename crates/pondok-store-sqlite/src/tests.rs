//! Integration tests for `SqliteStore` against an in-memory database.

use pondok_core::{
  attributes::{
    Aset, Bansos, Ekonomi, Fasilitas, Fisik, Kesehatan, Pembiayaan,
    Pendidikan, PesantrenAttributes, Rumah, SantriAttributes,
  },
  engine::{compute_pesantren_score, compute_santri_score},
  store::RegistryStore,
  subject::{GeoPoint, NewPesantren, NewSantri, Wilayah},
  vocab::{
    AksesAir, AksesJalan, AksesLayanan, Akreditasi, JenisAtap, JenisDinding,
    JenisLantai, Kelayakan, KondisiBangunan, Kurikulum, KategoriKelayakan,
    KategoriKemiskinan, Prestasi, StatusKepemilikan, StatusPembayaran,
    SumberAir, SumberBiaya,
  },
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn jakarta() -> GeoPoint {
  GeoPoint { latitude: -6.2088, longitude: 106.8456 }
}

fn pesantren_baru(nama: &str, lokasi: Option<GeoPoint>) -> NewPesantren {
  NewPesantren {
    nama: nama.into(),
    nomor_statistik: Some("510032750001".into()),
    wilayah: Wilayah {
      provinsi:  Some("jawa barat".into()),
      kabupaten: Some("bandung".into()),
      kecamatan: Some("cibiru".into()),
      desa:      Some("cipadung".into()),
    },
    lokasi,
  }
}

fn santri_baru(pesantren_id: Uuid, nama: &str, lokasi: Option<GeoPoint>) -> NewSantri {
  NewSantri {
    pesantren_id,
    nama: nama.into(),
    jenis_kelamin: None,
    status_mukim: None,
    lokasi,
  }
}

/// Everything in its best bracket; totals exactly 100.
fn atribut_unggul() -> PesantrenAttributes {
  PesantrenAttributes {
    fisik:      Some(Fisik {
      kondisi_bangunan: Some(KondisiBangunan::Baik),
      sanitasi:         Some(Kelayakan::Layak),
      sumber_air:       Some(SumberAir::Pam),
      kualitas_air:     Some(Kelayakan::Layak),
      keamanan:         Some(Kelayakan::Layak),
      lantai:           Some(JenisLantai::Keramik),
      atap:             Some(JenisAtap::Genteng),
      dinding:          Some(JenisDinding::Tembok),
      santri_per_kamar: Some(4),
    }),
    fasilitas:  Some(Fasilitas {
      asrama:       Some(Kelayakan::Layak),
      ruang_kelas:  Some(Kelayakan::Layak),
      internet:     Some(true),
      transportasi: Some(true),
      akses_jalan:  Some(AksesJalan::Aspal),
      dapur:        Some(true),
      mck:          Some(true),
    }),
    pendidikan: Some(Pendidikan {
      akreditasi: Some(Akreditasi::A),
      kurikulum:  Some(Kurikulum::Terstandar),
      jenjang:    None,
      santri_per_guru: Some(12),
      persen_guru_bersertifikat: Some(80),
      prestasi:   Some(Prestasi::Nasional),
    }),
  }
}

/// Middling attributes; fisik 22 + fasilitas 17 + pendidikan 19 = 58.
fn atribut_sedang() -> PesantrenAttributes {
  PesantrenAttributes {
    fisik:      Some(Fisik {
      kondisi_bangunan: Some(KondisiBangunan::Sedang),
      sanitasi:         Some(Kelayakan::Cukup),
      sumber_air:       Some(SumberAir::SumurGali),
      kualitas_air:     Some(Kelayakan::Cukup),
      keamanan:         Some(Kelayakan::Cukup),
      lantai:           Some(JenisLantai::Semen),
      atap:             Some(JenisAtap::Seng),
      dinding:          Some(JenisDinding::Kayu),
      santri_per_kamar: Some(8),
    }),
    fasilitas:  Some(Fasilitas {
      asrama:       Some(Kelayakan::Cukup),
      ruang_kelas:  Some(Kelayakan::Cukup),
      internet:     Some(true),
      transportasi: Some(false),
      akses_jalan:  Some(AksesJalan::Kerikil),
      dapur:        Some(true),
      mck:          Some(true),
    }),
    pendidikan: Some(pendidikan_sedang(Akreditasi::B)),
  }
}

fn pendidikan_sedang(akreditasi: Akreditasi) -> Pendidikan {
  Pendidikan {
    akreditasi: Some(akreditasi),
    kurikulum:  Some(Kurikulum::Internal),
    jenjang:    None,
    santri_per_guru: Some(20),
    persen_guru_bersertifikat: Some(60),
    prestasi:   Some(Prestasi::Regional),
  }
}

/// The worst bracket everywhere.
fn atribut_santri_miskin() -> SantriAttributes {
  SantriAttributes {
    ekonomi:    Some(Ekonomi {
      penghasilan_bulanan: Some(300_000),
      jumlah_tanggungan:   Some(7),
    }),
    rumah:      Some(Rumah {
      status_kepemilikan: Some(StatusKepemilikan::Menumpang),
      akses_air:          Some(AksesAir::TidakLayak),
      dinding:            Some(JenisDinding::Bambu),
      atap:               Some(JenisAtap::Rumbia),
      lantai:             Some(JenisLantai::Tanah),
    }),
    aset:       Some(Aset {
      kendaraan:  Some(false),
      tanah:      Some(false),
      ternak:     Some(false),
      elektronik: Some(false),
    }),
    pembiayaan: Some(Pembiayaan {
      sumber_biaya:      Some(SumberBiaya::Bantuan),
      status_pembayaran: Some(StatusPembayaran::Menunggak),
    }),
    kesehatan:  Some(Kesehatan {
      penyakit_kronis: Some(true),
      akses_layanan:   Some(AksesLayanan::Sulit),
    }),
    bansos:     Some(Bansos { jumlah_program: Some(2) }),
  }
}

/// Mid income, rented housing, current payments, no aid; no asset record.
/// Totals 15 + 13 + 0 + 15 + 12 + 10 = 65.
fn atribut_santri_menengah() -> SantriAttributes {
  SantriAttributes {
    ekonomi:    Some(Ekonomi {
      penghasilan_bulanan: Some(1_500_000),
      jumlah_tanggungan:   Some(2),
    }),
    rumah:      Some(Rumah {
      status_kepemilikan: Some(StatusKepemilikan::Kontrak),
      akses_air:          Some(AksesAir::Layak),
      dinding:            Some(JenisDinding::Kayu),
      atap:               Some(JenisAtap::Seng),
      lantai:             Some(JenisLantai::Semen),
    }),
    aset:       None,
    pembiayaan: Some(Pembiayaan {
      sumber_biaya:      Some(SumberBiaya::OrangTua),
      status_pembayaran: Some(StatusPembayaran::Lancar),
    }),
    kesehatan:  Some(Kesehatan {
      penyakit_kronis: Some(false),
      akses_layanan:   Some(AksesLayanan::Sedang),
    }),
    bansos:     Some(Bansos { jumlah_program: Some(0) }),
  }
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_pesantren() {
  let s = store().await;

  let p = s
    .add_pesantren(pesantren_baru("Al-Hikmah", Some(jakarta())))
    .await
    .unwrap();

  let fetched = s.get_pesantren(p.pesantren_id).await.unwrap().unwrap();
  assert_eq!(fetched.pesantren_id, p.pesantren_id);
  assert_eq!(fetched.nama, "Al-Hikmah");
  assert_eq!(fetched.wilayah.provinsi.as_deref(), Some("jawa barat"));
  assert!(fetched.lokasi.is_some());
}

#[tokio::test]
async fn get_pesantren_missing_returns_none() {
  let s = store().await;
  assert!(s.get_pesantren(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_santri_requires_existing_pesantren() {
  let s = store().await;
  let orphan = santri_baru(Uuid::new_v4(), "Umar", None);
  let err = s.add_santri(orphan).await.unwrap_err();
  assert!(matches!(err, crate::Error::SubjectNotFound(_)));
}

#[tokio::test]
async fn list_santri_filtered_by_pesantren() {
  let s = store().await;
  let p1 = s.add_pesantren(pesantren_baru("A", None)).await.unwrap();
  let p2 = s.add_pesantren(pesantren_baru("B", None)).await.unwrap();

  s.add_santri(santri_baru(p1.pesantren_id, "Aisyah", None))
    .await
    .unwrap();
  s.add_santri(santri_baru(p1.pesantren_id, "Bilal", None))
    .await
    .unwrap();
  s.add_santri(santri_baru(p2.pesantren_id, "Citra", None))
    .await
    .unwrap();

  let all = s.list_santri(None).await.unwrap();
  assert_eq!(all.len(), 3);

  let of_p1 = s.list_santri(Some(p1.pesantren_id)).await.unwrap();
  assert_eq!(of_p1.len(), 2);
  assert!(of_p1.iter().all(|x| x.pesantren_id == p1.pesantren_id));
}

// ─── Pesantren scoring ───────────────────────────────────────────────────────

#[tokio::test]
async fn pesantren_unggul_scores_layak() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Darul Ulum", Some(jakarta())))
    .await
    .unwrap();
  s.put_pesantren_attributes(p.pesantren_id, atribut_unggul())
    .await
    .unwrap();

  let score = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert!(score.skor_total >= 85);
  assert_eq!(score.kategori_kelayakan, KategoriKelayakan::Layak);
  assert_eq!(
    score.skor_total,
    score.skor_fisik + score.skor_fasilitas + score.skor_pendidikan
  );

  // Map view carries the same score and category.
  let map = s.list_pesantren_map().await.unwrap();
  assert_eq!(map.len(), 1);
  assert_eq!(map[0].pesantren_id, p.pesantren_id);
  assert_eq!(map[0].skor_terakhir, score.skor_total);
  assert_eq!(map[0].kategori_kelayakan, score.kategori_kelayakan);
}

#[tokio::test]
async fn pesantren_without_attribute_rows_scores_minimum() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Baru Berdiri", Some(jakarta())))
    .await
    .unwrap();

  let score = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert_eq!(score.skor_fisik, 0);
  assert_eq!(score.skor_fasilitas, 0);
  assert_eq!(score.skor_pendidikan, 0);
  assert!(score.skor_total <= 10);
  assert_eq!(score.kategori_kelayakan, KategoriKelayakan::TidakLayak);
}

#[tokio::test]
async fn compute_for_unknown_pesantren_is_subject_not_found() {
  let s = store().await;
  let err = compute_pesantren_score(&s, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, pondok_core::Error::SubjectNotFound(_)));
}

#[tokio::test]
async fn recompute_is_idempotent() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Nurul Iman", Some(jakarta())))
    .await
    .unwrap();
  s.put_pesantren_attributes(p.pesantren_id, atribut_sedang())
    .await
    .unwrap();

  let first = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();
  let second = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert_eq!(second.skor_id, first.skor_id);
  assert_eq!(second.skor_fisik, first.skor_fisik);
  assert_eq!(second.skor_fasilitas, first.skor_fasilitas);
  assert_eq!(second.skor_pendidikan, first.skor_pendidikan);
  assert_eq!(second.skor_total, first.skor_total);
  assert_eq!(second.kategori_kelayakan, first.kategori_kelayakan);
  assert!(second.calculated_at >= first.calculated_at);

  // Still exactly one map row.
  assert_eq!(s.list_pesantren_map().await.unwrap().len(), 1);
}

#[tokio::test]
async fn accreditation_upgrade_strictly_increases_total() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Miftahul Huda", Some(jakarta())))
    .await
    .unwrap();
  s.put_pesantren_attributes(p.pesantren_id, atribut_sedang())
    .await
    .unwrap();

  let before = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  s.put_pesantren_attributes(
    p.pesantren_id,
    PesantrenAttributes {
      pendidikan: Some(pendidikan_sedang(Akreditasi::A)),
      ..Default::default()
    },
  )
  .await
  .unwrap();

  let after = compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert!(after.skor_total > before.skor_total);
  assert_eq!(after.skor_id, before.skor_id);

  let map = s.list_pesantren_map().await.unwrap();
  assert_eq!(map.len(), 1);
  assert_eq!(map[0].skor_terakhir, after.skor_total);
}

#[tokio::test]
async fn concurrent_recompute_converges_on_one_row() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Raudhatul Jannah", Some(jakarta())))
    .await
    .unwrap();
  s.put_pesantren_attributes(p.pesantren_id, atribut_sedang())
    .await
    .unwrap();

  let (a, b) = tokio::join!(
    compute_pesantren_score(&s, p.pesantren_id),
    compute_pesantren_score(&s, p.pesantren_id),
  );
  let a = a.unwrap();
  let b = b.unwrap();

  assert_eq!(a.skor_id, b.skor_id);
  assert_eq!(a.skor_total, b.skor_total);
  assert_eq!(s.list_pesantren_map().await.unwrap().len(), 1);
}

// ─── Santri scoring ──────────────────────────────────────────────────────────

#[tokio::test]
async fn santri_in_deep_poverty_scores_sangat_miskin() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Al-Falah", None)).await.unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Fatimah", None))
    .await
    .unwrap();
  s.put_santri_attributes(santri.santri_id, atribut_santri_miskin())
    .await
    .unwrap();

  let score = compute_santri_score(&s, santri.santri_id).await.unwrap();

  assert!(score.skor_total < 30);
  assert_eq!(score.kategori_kemiskinan, KategoriKemiskinan::SangatMiskin);
  assert_eq!(
    score.skor_total,
    score.skor_ekonomi
      + score.skor_rumah
      + score.skor_aset
      + score.skor_pembiayaan
      + score.skor_kesehatan
      + score.skor_bansos
  );
}

#[tokio::test]
async fn santri_with_mid_income_scores_rentan_miskin() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Al-Falah", None)).await.unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Hasan", None))
    .await
    .unwrap();
  s.put_santri_attributes(santri.santri_id, atribut_santri_menengah())
    .await
    .unwrap();

  let score = compute_santri_score(&s, santri.santri_id).await.unwrap();

  assert!((50..=69).contains(&score.skor_total));
  assert_eq!(score.kategori_kemiskinan, KategoriKemiskinan::RentanMiskin);
  // The missing asset record contributes its minimum.
  assert_eq!(score.skor_aset, 0);
}

#[tokio::test]
async fn santri_map_copies_labels_from_parent_pesantren() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Daarut Tauhiid", None))
    .await
    .unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Zaid", Some(jakarta())))
    .await
    .unwrap();

  compute_santri_score(&s, santri.santri_id).await.unwrap();

  let map = s.list_santri_map().await.unwrap();
  assert_eq!(map.len(), 1);
  assert_eq!(map[0].santri_id, santri.santri_id);
  assert_eq!(map[0].pesantren_id, p.pesantren_id);
  assert_eq!(map[0].wilayah.provinsi.as_deref(), Some("jawa barat"));
  assert_eq!(map[0].wilayah.desa.as_deref(), Some("cipadung"));
}

#[tokio::test]
async fn santri_without_coordinates_is_absent_from_map() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Al-Falah", None)).await.unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Salma", None))
    .await
    .unwrap();

  let score = compute_santri_score(&s, santri.santri_id).await.unwrap();

  assert!(s.list_santri_map().await.unwrap().is_empty());
  // The score row exists regardless.
  let stored = s.get_santri_score(santri.santri_id).await.unwrap().unwrap();
  assert_eq!(stored.skor_id, score.skor_id);
}

// ─── Coordinates & cascade ───────────────────────────────────────────────────

#[tokio::test]
async fn clearing_coordinates_removes_the_map_row() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Tebuireng", Some(jakarta())))
    .await
    .unwrap();
  s.put_pesantren_attributes(p.pesantren_id, atribut_sedang())
    .await
    .unwrap();

  compute_pesantren_score(&s, p.pesantren_id).await.unwrap();
  assert_eq!(s.list_pesantren_map().await.unwrap().len(), 1);

  s.set_pesantren_lokasi(p.pesantren_id, None).await.unwrap();
  compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert!(s.list_pesantren_map().await.unwrap().is_empty());
  assert!(s.get_pesantren_score(p.pesantren_id).await.unwrap().is_some());
}

#[tokio::test]
async fn setting_coordinates_restores_the_map_row_on_recompute() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Lirboyo", None)).await.unwrap();

  compute_pesantren_score(&s, p.pesantren_id).await.unwrap();
  assert!(s.list_pesantren_map().await.unwrap().is_empty());

  s.set_pesantren_lokasi(p.pesantren_id, Some(jakarta()))
    .await
    .unwrap();
  compute_pesantren_score(&s, p.pesantren_id).await.unwrap();

  assert_eq!(s.list_pesantren_map().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_pesantren_cascades_everywhere() {
  let s = store().await;
  let p = s
    .add_pesantren(pesantren_baru("Gontor", Some(jakarta())))
    .await
    .unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Ibrahim", Some(jakarta())))
    .await
    .unwrap();

  compute_pesantren_score(&s, p.pesantren_id).await.unwrap();
  compute_santri_score(&s, santri.santri_id).await.unwrap();

  assert!(s.delete_pesantren(p.pesantren_id).await.unwrap());

  assert!(s.get_pesantren(p.pesantren_id).await.unwrap().is_none());
  assert!(s.get_pesantren_score(p.pesantren_id).await.unwrap().is_none());
  assert!(s.get_santri(santri.santri_id).await.unwrap().is_none());
  assert!(s.get_santri_score(santri.santri_id).await.unwrap().is_none());
  assert!(s.list_pesantren_map().await.unwrap().is_empty());
  assert!(s.list_santri_map().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_santri_cascades_score_and_map() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Gontor", None)).await.unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Yusuf", Some(jakarta())))
    .await
    .unwrap();

  compute_santri_score(&s, santri.santri_id).await.unwrap();
  assert!(s.delete_santri(santri.santri_id).await.unwrap());

  assert!(s.get_santri_score(santri.santri_id).await.unwrap().is_none());
  assert!(s.list_santri_map().await.unwrap().is_empty());
}

// ─── Legacy data ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn legacy_free_text_tokens_fold_to_canonical_brackets() {
  let s = store().await;
  let p = s.add_pesantren(pesantren_baru("Assalam", None)).await.unwrap();
  let santri = s
    .add_santri(santri_baru(p.pesantren_id, "Luthfi", None))
    .await
    .unwrap();

  // Rows as an old importer left them: mixed case, synonyms, junk.
  s.execute_raw(format!(
    "INSERT INTO santri_rumah
       (santri_id, status_kepemilikan, akses_air, dinding, atap, lantai)
     VALUES ('{}', 'Sewa', 'LAYAK', 'bambu', 'solar panel', NULL);",
    santri.santri_id
  ))
  .await
  .unwrap();

  let score = compute_santri_score(&s, santri.santri_id).await.unwrap();

  // 'Sewa' folds to kontrak (3) and 'LAYAK' to layak (4); the junk roof
  // token and missing floor fall to the worst bracket.
  assert_eq!(score.skor_rumah, 7);
}

// ─── Choropleth ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn choropleth_aggregates_per_province() {
  let s = store().await;

  let mut barat_unggul = pesantren_baru("Unggul", Some(jakarta()));
  barat_unggul.wilayah.provinsi = Some("jawa barat".into());
  let mut barat_baru = pesantren_baru("Baru", Some(jakarta()));
  barat_baru.wilayah.provinsi = Some("jawa barat".into());
  let mut timur = pesantren_baru("Timur", Some(jakarta()));
  timur.wilayah.provinsi = Some("jawa timur".into());

  let p1 = s.add_pesantren(barat_unggul).await.unwrap();
  let p2 = s.add_pesantren(barat_baru).await.unwrap();
  let p3 = s.add_pesantren(timur).await.unwrap();

  s.put_pesantren_attributes(p1.pesantren_id, atribut_unggul())
    .await
    .unwrap();

  compute_pesantren_score(&s, p1.pesantren_id).await.unwrap();
  compute_pesantren_score(&s, p2.pesantren_id).await.unwrap();
  compute_pesantren_score(&s, p3.pesantren_id).await.unwrap();

  let buckets = s.pesantren_choropleth().await.unwrap();
  assert_eq!(buckets.len(), 2);

  let barat = &buckets[0];
  assert_eq!(barat.provinsi.as_deref(), Some("jawa barat"));
  assert_eq!(barat.jumlah, 2);
  assert_eq!(barat.rata_rata_skor, 50.0);
  assert_eq!(barat.layak, 1);
  assert_eq!(barat.cukup_layak, 0);
  assert_eq!(barat.tidak_layak, 1);

  let timur = &buckets[1];
  assert_eq!(timur.provinsi.as_deref(), Some("jawa timur"));
  assert_eq!(timur.jumlah, 1);
  assert_eq!(timur.tidak_layak, 1);
}
