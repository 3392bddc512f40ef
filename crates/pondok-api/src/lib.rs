//! JSON REST API for the Pondok registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`pondok_core::store::RegistryStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pondok_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod map;
pub mod pesantren;
pub mod santri;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use pondok_core::store::RegistryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RegistryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Pesantren
    .route(
      "/pesantren",
      get(pesantren::list::<S>).post(pesantren::create::<S>),
    )
    .route(
      "/pesantren/{id}",
      get(pesantren::get_one::<S>).delete(pesantren::delete_one::<S>),
    )
    .route("/pesantren/{id}/atribut", put(pesantren::put_atribut::<S>))
    .route("/pesantren/{id}/lokasi", put(pesantren::put_lokasi::<S>))
    .route(
      "/pesantren/{id}/skor",
      get(pesantren::get_skor::<S>).post(pesantren::hitung_skor::<S>),
    )
    // Santri
    .route("/santri", get(santri::list::<S>).post(santri::create::<S>))
    .route(
      "/santri/{id}",
      get(santri::get_one::<S>).delete(santri::delete_one::<S>),
    )
    .route("/santri/{id}/atribut", put(santri::put_atribut::<S>))
    .route("/santri/{id}/lokasi", put(santri::put_lokasi::<S>))
    .route(
      "/santri/{id}/skor",
      get(santri::get_skor::<S>).post(santri::hitung_skor::<S>),
    )
    // Map views
    .route("/map/pesantren", get(map::pesantren_geojson::<S>))
    .route("/map/santri", get(map::santri_geojson::<S>))
    .route(
      "/map/pesantren/choropleth",
      get(map::pesantren_choropleth::<S>),
    )
    .route("/map/santri/choropleth", get(map::santri_choropleth::<S>))
    .with_state(store)
}
