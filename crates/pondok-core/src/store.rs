//! The `RegistryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `pondok-store-sqlite`).
//! Higher layers (`pondok-api`, the engine in [`crate::engine`]) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  attributes::{PesantrenAttributes, PesantrenBundle, SantriAttributes, SantriBundle},
  map::{
    PesantrenMapRow, PesantrenRegionAggregate, SantriMapRow,
    SantriRegionAggregate,
  },
  score::{NewPesantrenScore, NewSantriScore, PesantrenScore, SantriScore},
  subject::{NewPesantren, NewSantri, Pesantren, Santri},
};

/// Abstraction over a Pondok registry backend.
///
/// Score writes are transactional: `save_*_score` upserts the score row and
/// maintains the corresponding map-view row in one transaction, keyed by the
/// subject id's unique constraint rather than a pre-select, so concurrent
/// recomputations of one subject converge on a single row.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error converts into the [`crate::Error`] taxonomy; no other failure kind
/// escapes through the engine.
pub trait RegistryStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Pesantren subjects ────────────────────────────────────────────────

  fn add_pesantren(
    &self,
    input: NewPesantren,
  ) -> impl Future<Output = Result<Pesantren, Self::Error>> + Send + '_;

  /// Retrieve a pesantren by id. Returns `None` if not found.
  fn get_pesantren(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Pesantren>, Self::Error>> + Send + '_;

  fn list_pesantren(
    &self,
  ) -> impl Future<Output = Result<Vec<Pesantren>, Self::Error>> + Send + '_;

  /// Delete a pesantren. Cascades to santri, attributes, scores, and map
  /// rows. Returns `false` if the id was unknown.
  fn delete_pesantren(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Santri subjects ───────────────────────────────────────────────────

  /// Create a santri. Fails with the `SubjectNotFound` kind when the
  /// referenced pesantren does not exist.
  fn add_santri(
    &self,
    input: NewSantri,
  ) -> impl Future<Output = Result<Santri, Self::Error>> + Send + '_;

  fn get_santri(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Santri>, Self::Error>> + Send + '_;

  /// List santri, optionally restricted to one pesantren.
  fn list_santri(
    &self,
    pesantren_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Santri>, Self::Error>> + Send + '_;

  fn delete_santri(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Coordinates ───────────────────────────────────────────────────────

  /// Replace the subject's coordinates. Clearing them (`None`) also deletes
  /// any map-view row immediately; newly set coordinates appear on the map
  /// on the next score computation. Returns `false` for an unknown id.
  fn set_pesantren_lokasi(
    &self,
    id: Uuid,
    lokasi: Option<crate::subject::GeoPoint>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn set_santri_lokasi(
    &self,
    id: Uuid,
    lokasi: Option<crate::subject::GeoPoint>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Attribute records ─────────────────────────────────────────────────

  /// Upsert the attribute records present in `attrs`; absent records are
  /// left untouched.
  fn put_pesantren_attributes(
    &self,
    id: Uuid,
    attrs: PesantrenAttributes,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn put_santri_attributes(
    &self,
    id: Uuid,
    attrs: SantriAttributes,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Attribute readers ─────────────────────────────────────────────────

  /// The subject row plus every attribute record the rules may consult.
  /// Missing records come back as `None`; only a missing subject is an
  /// error (`SubjectNotFound` kind).
  fn load_pesantren_bundle(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<PesantrenBundle, Self::Error>> + Send + '_;

  fn load_santri_bundle(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<SantriBundle, Self::Error>> + Send + '_;

  // ── Score persistence & map projection ────────────────────────────────

  /// Upsert the score row and refresh the map-view row in one transaction.
  /// The stored `skor_id` is kept on update; `calculated_at` is always
  /// refreshed. Returns the persisted row.
  fn save_pesantren_score(
    &self,
    draft: NewPesantrenScore,
  ) -> impl Future<Output = Result<PesantrenScore, Self::Error>> + Send + '_;

  fn save_santri_score(
    &self,
    draft: NewSantriScore,
  ) -> impl Future<Output = Result<SantriScore, Self::Error>> + Send + '_;

  fn get_pesantren_score(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PesantrenScore>, Self::Error>> + Send + '_;

  fn get_santri_score(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SantriScore>, Self::Error>> + Send + '_;

  // ── Map reads ─────────────────────────────────────────────────────────

  fn list_pesantren_map(
    &self,
  ) -> impl Future<Output = Result<Vec<PesantrenMapRow>, Self::Error>> + Send + '_;

  fn list_santri_map(
    &self,
  ) -> impl Future<Output = Result<Vec<SantriMapRow>, Self::Error>> + Send + '_;

  fn pesantren_choropleth(
    &self,
  ) -> impl Future<Output = Result<Vec<PesantrenRegionAggregate>, Self::Error>>
  + Send
  + '_;

  fn santri_choropleth(
    &self,
  ) -> impl Future<Output = Result<Vec<SantriRegionAggregate>, Self::Error>>
  + Send
  + '_;
}
