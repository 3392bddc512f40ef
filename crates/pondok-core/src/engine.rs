//! Engine orchestration: read attributes, apply rules, compose, persist.
//!
//! One call scores one subject. The attribute read happens before the write
//! transaction; the operation is idempotent, so a stale read converges on
//! the next recompute. The store's `save_*_score` owns the transaction that
//! covers the score upsert and the map-view refresh.

use uuid::Uuid;

use crate::{
  Result,
  compose::{
    PesantrenSubScores, SantriSubScores, compose_pesantren, compose_santri,
  },
  rules,
  score::{PesantrenScore, SantriScore},
  store::RegistryStore,
};

/// Compute, persist, and return the eligibility score for one pesantren.
pub async fn compute_pesantren_score<S: RegistryStore>(
  store: &S,
  pesantren_id: Uuid,
) -> Result<PesantrenScore> {
  let bundle = store
    .load_pesantren_bundle(pesantren_id)
    .await
    .map_err(Into::into)?;

  let attrs = &bundle.attributes;
  let sub = PesantrenSubScores {
    fisik:      rules::pesantren::skor_fisik(attrs.fisik.as_ref()),
    fasilitas:  rules::pesantren::skor_fasilitas(attrs.fasilitas.as_ref()),
    pendidikan: rules::pesantren::skor_pendidikan(attrs.pendidikan.as_ref()),
  };

  let draft = compose_pesantren(pesantren_id, sub)?;
  store.save_pesantren_score(draft).await.map_err(Into::into)
}

/// Compute, persist, and return the poverty score for one santri.
pub async fn compute_santri_score<S: RegistryStore>(
  store: &S,
  santri_id: Uuid,
) -> Result<SantriScore> {
  let bundle = store
    .load_santri_bundle(santri_id)
    .await
    .map_err(Into::into)?;

  let attrs = &bundle.attributes;
  let sub = SantriSubScores {
    ekonomi:    rules::santri::skor_ekonomi(attrs.ekonomi.as_ref()),
    rumah:      rules::santri::skor_rumah(attrs.rumah.as_ref()),
    aset:       rules::santri::skor_aset(attrs.aset.as_ref()),
    pembiayaan: rules::santri::skor_pembiayaan(attrs.pembiayaan.as_ref()),
    kesehatan:  rules::santri::skor_kesehatan(attrs.kesehatan.as_ref()),
    bansos:     rules::santri::skor_bansos(attrs.bansos.as_ref()),
  };

  let draft = compose_santri(santri_id, sub)?;
  store.save_santri_score(draft).await.map_err(Into::into)
}
